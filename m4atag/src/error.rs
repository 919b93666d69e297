//! Contains the errors that can arise within m4atag
//!
//! The primary error is [`M4aTagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Errors fall into two groups:
//!
//! * Structural errors ([`ErrorKind::InvalidFile`], [`ErrorKind::InvalidBlockType`]) abort a
//!   parse before any atom tree is handed out.
//! * Metadata errors ([`ErrorKind::MalformedMetadataEntry`], [`ErrorKind::UnsupportedShapeWidth`])
//!   only ever affect a single field read.

use crate::ilst::AtomIdent;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, M4aTagError>`
pub type Result<T> = std::result::Result<T, M4aTagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Atom tree errors
	/// The input is not a well-formed sequence of atoms
	///
	/// This occurs when the input is too short to hold a single atom header, when an atom
	/// declares a size smaller than its own header, or when the atoms do not exactly span
	/// their parent (or the whole input).
	InvalidFile(&'static str),
	/// Encountered an atom identifier outside the set of known types
	///
	/// For top-level atoms, the identifier must be one of the known MP4 top-level types. For
	/// nested atoms, every byte must be printable ASCII or `0xA9` (`©`). Invalid nested identifiers
	/// are only reported with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict).
	InvalidBlockType([u8; 4]),
	/// Attempting to write an atom whose size cannot be represented in its header
	TooMuchData,

	// Metadata errors
	/// A metadata entry's `data` wrapper failed validation, or the identifier cannot hold an entry
	MalformedMetadataEntry {
		/// The identifier of the offending entry
		ident: AtomIdent<'static>,
		/// What exactly was wrong with it
		reason: &'static str,
	},
	/// A fixed-width integer was requested, but the stored value has a different width
	UnsupportedShapeWidth {
		/// The width implied by the requested shape
		expected: usize,
		/// The width of the stored value
		found: usize,
	},
	/// Attempted to create a metadata entry in a file without a `moov.udta.meta.ilst` chain
	///
	/// See [`WriteOptions::create_missing_containers`](crate::config::WriteOptions::create_missing_containers).
	MetadataContainerAbsent,

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// Errors that could occur within m4atag
pub struct M4aTagError {
	pub(crate) kind: ErrorKind,
}

impl M4aTagError {
	/// Create an `M4aTagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::error::{ErrorKind, M4aTagError};
	///
	/// let no_container = M4aTagError::new(ErrorKind::MetadataContainerAbsent);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::error::{ErrorKind, M4aTagError};
	///
	/// let no_container = M4aTagError::new(ErrorKind::MetadataContainerAbsent);
	/// if let ErrorKind::MetadataContainerAbsent = no_container.kind() {
	/// 	println!("Where is the `ilst` atom?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	pub(crate) fn malformed(ident: &AtomIdent<'_>, reason: &'static str) -> Self {
		Self::new(ErrorKind::MalformedMetadataEntry {
			ident: ident.as_borrowed().into_owned(),
			reason,
		})
	}
}

impl std::error::Error for M4aTagError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::StringFromUtf8(ref err) => Some(err),
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::Alloc(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for M4aTagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<std::io::Error> for M4aTagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for M4aTagError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for M4aTagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for M4aTagError {
	fn from(input: std::convert::Infallible) -> Self {
		match input {}
	}
}

impl Display for M4aTagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::InvalidFile(message) => write!(f, "Invalid file: {message}"),
			ErrorKind::InvalidBlockType(ident) => write!(
				f,
				"Encountered an atom with an unknown type: \"{}\"",
				ident.escape_ascii()
			),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to write an atom too large for its size field"
			),
			ErrorKind::MalformedMetadataEntry { ref ident, reason } => {
				write!(f, "Malformed metadata entry `{ident}`: {reason}")
			},
			ErrorKind::UnsupportedShapeWidth { expected, found } => write!(
				f,
				"Expected an integer of {expected} byte(s), found {found} byte(s)"
			),
			ErrorKind::MetadataContainerAbsent => write!(
				f,
				"No `moov.udta.meta.ilst` atom exists to hold new metadata"
			),
		}
	}
}
