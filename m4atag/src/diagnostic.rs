//! Recoverable problems found while reading a file
//!
//! Unlike [`M4aTagError`](crate::error::M4aTagError)s, diagnostics never stop a parse. They are
//! collected alongside the atom tree (see [`ParsedAtoms`](crate::atom::ParsedAtoms) and
//! [`Mp4File::diagnostics`](crate::file::Mp4File::diagnostics)) and logged as they are found.

use crate::ilst::AtomIdent;

use std::fmt::{Display, Formatter};

/// A recoverable problem found while reading a file
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
	/// An `ilst` entry uses an identifier the catalogue does not know about
	///
	/// The entry is still part of the tree and is written back untouched.
	UnrecognizedMetadataIdentifier(AtomIdent<'static>),
	/// A container's children could not be decoded
	///
	/// This only occurs with [`ParsingMode::BestAttempt`](crate::config::ParsingMode::BestAttempt).
	/// The atom is kept as raw bytes, anything inside of it is unreachable.
	OpaqueContainer {
		/// The identifier of the container
		ident: [u8; 4],
		/// Why its children could not be decoded
		reason: &'static str,
	},
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Diagnostic::UnrecognizedMetadataIdentifier(ident) => {
				write!(f, "Unrecognized metadata identifier `{ident}`")
			},
			Diagnostic::OpaqueContainer { ident, reason } => write!(
				f,
				"Kept \"{}\" as raw bytes: {reason}",
				ident.escape_ascii()
			),
		}
	}
}
