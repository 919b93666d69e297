/// Options to control how m4atag parses a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) check_identifiers: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	check_identifiers: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			check_identifiers: true,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to check `ilst` entries against the identifier catalogue
	///
	/// Unrecognized identifiers never cause a parse to fail, they are reported as
	/// [`Diagnostic::UnrecognizedMetadataIdentifier`](crate::diagnostic::Diagnostic::UnrecognizedMetadataIdentifier).
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::ParseOptions;
	///
	/// // My files are full of custom atoms, I don't need to hear about them!
	/// let parsing_options = ParseOptions::new().check_identifiers(false);
	/// ```
	pub fn check_identifiers(&mut self, check_identifiers: bool) -> Self {
		self.check_identifiers = check_identifiers;
		*self
	}
}

/// The parsing strictness mode
///
/// This only affects nested atoms. The top-level atoms must always exactly span the input,
/// and unknown top-level atom types are always rejected.
///
/// # Examples
///
/// ```rust
/// use m4atag::config::{ParseOptions, ParsingMode};
///
/// // We only want to read well-formed inputs
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * A `udta` atom whose children overrun it - The parser will error and the entire input is discarded
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// Containers whose children cannot be decoded are kept as opaque atoms, so the file
	/// still round-trips byte for byte. A [`Diagnostic::OpaqueContainer`](crate::diagnostic::Diagnostic::OpaqueContainer)
	/// is recorded for each.
	///
	/// ## Examples of behavior
	///
	/// * A `udta` atom whose children overrun it - The `udta` atom is kept as raw bytes, and any metadata inside it is unreachable
	#[default]
	BestAttempt,
}
