use super::registry::{container_prefix, is_known_type, is_valid_identifier_byte};
use super::{ATOM_HEADER_LEN, Atom, EXTENDED_HEADER_LEN, IDENTIFIER_LEN};
use crate::config::{ParseOptions, ParsingMode};
use crate::diagnostic::Diagnostic;
use crate::error::{ErrorKind, Result};
use crate::macros::{err, parse_mode_choice, try_vec};

use byteorder::{BigEndian, ByteOrder};

// moov.udta.meta.ilst.<entry>
//
// Anything deeper is never decoded as a container, regardless of its identifier.
const MAX_CONTAINER_DEPTH: usize = 4;

/// The result of [`parse`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParsedAtoms {
	/// The top-level atoms, in file order
	pub atoms: Vec<Atom>,
	/// Recoverable problems encountered while parsing
	pub diagnostics: Vec<Diagnostic>,
}

/// Parse a buffer into a sequence of atoms
///
/// The top-level atoms must exactly span `buffer`. Nested containers are handled according to the
/// [`ParsingMode`](crate::config::ParsingMode) in `parse_options`.
///
/// NOTE: [`ParseOptions::check_identifiers`] has no effect here, the atom tree knows nothing about
/// metadata identifiers. See [`check_identifiers`](crate::ilst::check_identifiers).
///
/// # Errors
///
/// * `buffer` is shorter than a single atom header
/// * An atom declares a size smaller than its header, or larger than the space remaining in its parent
/// * A top-level atom has an unknown type
/// * A nested container fails to decode (bad sizes, or an identifier with invalid characters) while
///   using [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::parse;
/// use m4atag::config::ParseOptions;
///
/// # fn main() -> m4atag::error::Result<()> {
/// let input = b"\x00\x00\x00\x10ftypM4A \x00\x00\x00\x00\x00\x00\x00\x08free";
/// let parsed = parse(input, ParseOptions::new())?;
///
/// assert_eq!(parsed.atoms.len(), 2);
/// assert_eq!(parsed.atoms[0].ident(), *b"ftyp");
/// assert_eq!(parsed.atoms[0].payload(), b"M4A \x00\x00\x00\x00");
/// # Ok(()) }
/// ```
pub fn parse(buffer: &[u8], parse_options: ParseOptions) -> Result<ParsedAtoms> {
	log::debug!("Parsing atom tree, {} bytes", buffer.len());

	if buffer.len() < ATOM_HEADER_LEN {
		err!(InvalidFile("Input is too short to contain an atom"));
	}

	let mut diagnostics = Vec::new();
	let atoms = AtomReader::new(buffer, None, 0).read_all(
		parse_options.parsing_mode,
		&mut diagnostics,
	)?;

	log::debug!(
		"Parsed {} top-level atoms with {} diagnostic(s)",
		atoms.len(),
		diagnostics.len()
	);

	Ok(ParsedAtoms { atoms, diagnostics })
}

struct AtomHeader {
	len: usize,
	extended: bool,
	ident: [u8; 4],
}

impl AtomHeader {
	fn header_len(&self) -> usize {
		if self.extended {
			EXTENDED_HEADER_LEN
		} else {
			ATOM_HEADER_LEN
		}
	}
}

/// Walks a sequence of sibling atoms
struct AtomReader<'a> {
	data: &'a [u8],
	pos: usize,
	parent: Option<[u8; 4]>,
	depth: usize,
}

impl<'a> AtomReader<'a> {
	fn new(data: &'a [u8], parent: Option<[u8; 4]>, depth: usize) -> Self {
		Self {
			data,
			pos: 0,
			parent,
			depth,
		}
	}

	fn read_all(
		mut self,
		parse_mode: ParsingMode,
		diagnostics: &mut Vec<Diagnostic>,
	) -> Result<Vec<Atom>> {
		let mut atoms = Vec::new();
		while let Some((header, content)) = self.next_atom()? {
			atoms.push(self.decode(header, content, parse_mode, diagnostics)?);
		}

		Ok(atoms)
	}

	fn next_atom(&mut self) -> Result<Option<(AtomHeader, &'a [u8])>> {
		let remaining = &self.data[self.pos..];
		if remaining.is_empty() {
			return Ok(None);
		}

		let header = self.read_header(remaining)?;
		let content = &remaining[header.header_len()..header.len];

		log::trace!(
			"Found atom \"{}\" at offset {} ({} bytes)",
			header.ident.escape_ascii(),
			self.pos,
			header.len
		);

		self.pos += header.len;
		Ok(Some((header, content)))
	}

	fn read_header(&self, remaining: &[u8]) -> Result<AtomHeader> {
		if remaining.len() < ATOM_HEADER_LEN {
			err!(InvalidFile("Found trailing bytes too short to be an atom"));
		}

		let len_raw = BigEndian::read_u32(&remaining[..4]);

		let mut ident = [0; IDENTIFIER_LEN];
		ident.copy_from_slice(&remaining[4..ATOM_HEADER_LEN]);

		if self.parent.is_none() {
			if !is_known_type(ident) {
				err!(InvalidBlockType(ident));
			}
		} else if !ident.iter().copied().all(is_valid_identifier_byte) {
			err!(InvalidBlockType(ident));
		}

		let (len, extended) = match len_raw {
			0 => err!(InvalidFile(
				"Atoms extending to the end of their parent are unsupported"
			)),
			// There's an extended length
			1 if ident == *b"mdat" => {
				if remaining.len() < EXTENDED_HEADER_LEN {
					err!(InvalidFile("Found an incomplete extended size"));
				}

				let len = BigEndian::read_u64(&remaining[ATOM_HEADER_LEN..EXTENDED_HEADER_LEN]);
				if len < EXTENDED_HEADER_LEN as u64 {
					err!(InvalidFile("Found an invalid extended length (< 16)"));
				}

				(len, true)
			},
			1..=7 => err!(InvalidFile("Found an invalid length (< 8)")),
			_ => (u64::from(len_raw), false),
		};

		// `len` includes the header
		if len > remaining.len() as u64 {
			err!(InvalidFile("Atom extends past the end of its parent"));
		}

		Ok(AtomHeader {
			// Bounded by the remaining length above
			len: len as usize,
			extended,
			ident,
		})
	}

	fn decode(
		&self,
		header: AtomHeader,
		content: &[u8],
		parse_mode: ParsingMode,
		diagnostics: &mut Vec<Diagnostic>,
	) -> Result<Atom> {
		let AtomHeader {
			ident, extended, ..
		} = header;

		let prefix_len = if self.depth > MAX_CONTAINER_DEPTH {
			None
		} else {
			container_prefix(self.parent, ident, content)
		};

		let Some(prefix_len) = prefix_len else {
			let mut atom = Atom::new(ident, try_vec!(content));
			atom.extended = extended;
			return Ok(atom);
		};

		let (prefix, body) = content.split_at(prefix_len);

		// Only keep the diagnostics of containers that actually decode
		let mut local_diagnostics = Vec::new();
		let children = AtomReader::new(body, Some(ident), self.depth + 1)
			.read_all(parse_mode, &mut local_diagnostics);

		match children {
			Ok(children) => {
				diagnostics.append(&mut local_diagnostics);

				let mut atom = Atom::container_with_prefix(ident, try_vec!(prefix), children);
				atom.extended = extended;
				Ok(atom)
			},
			Err(e) => {
				// A bad nested identifier only poisons its parent, the rest of the file is still usable
				let reason = match e.kind {
					ErrorKind::InvalidFile(reason) => reason,
					ErrorKind::InvalidBlockType(_) => "Found an atom with an invalid identifier",
					_ => return Err(e),
				};

				parse_mode_choice!(
					parse_mode,
					STRICT: Err(e),
					DEFAULT: {
						log::warn!(
							"Unable to decode the children of \"{}\" ({reason}), keeping it as raw bytes",
							ident.escape_ascii()
						);

						diagnostics.push(Diagnostic::OpaqueContainer { ident, reason });

						let mut atom = Atom::new(ident, try_vec!(content));
						atom.extended = extended;
						Ok(atom)
					}
				)
			},
		}
	}
}
