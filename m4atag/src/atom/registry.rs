//! The atom types m4atag knows about
//!
//! There are two tables here:
//!
//! * The closed set of identifiers allowed at the top level of a file. Anything else means the
//!   input is not an MP4 file (or is corrupt), and the parse is aborted.
//! * The set of atoms decoded as containers. Every other atom is kept as raw bytes.

use super::ATOM_HEADER_LEN;

const KNOWN_TOP_LEVEL_TYPES: &[[u8; 4]] = &[
	*b"ftyp", // File type
	*b"mdat", // Media data
	*b"moov", // Movie
	*b"pnot", // Preview
	*b"udta", // User data
	*b"meta", // Extended metadata
	*b"moof", // Movie fragment
	*b"mfra", // Movie fragment random access
	*b"free", // Free space
	*b"skip", // Free space
	*b"wide", // Reserved space for a future extended size
	*b"uuid", // User extension
	*b"pdin", // Progressive download information
	*b"sidx", // Segment index
	*b"styp", // Segment type
	// Legacy QuickTime
	*b"PICT",
	*b"pict",
	*b"junk",
];

// Atoms that may directly follow the version/flags of a full `meta` atom
const META_CHILDREN: &[[u8; 4]] = &[*b"hdlr", *b"ilst", *b"mhdr", *b"ctry", *b"lang", *b"keys"];

/// Whether `ident` is allowed at the top level of a file
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::is_known_type;
///
/// assert!(is_known_type(*b"moov"));
/// assert!(!is_known_type(*b"zzzz"));
/// ```
pub fn is_known_type(ident: [u8; 4]) -> bool {
	KNOWN_TOP_LEVEL_TYPES.contains(&ident)
}

// MP4 permits any characters to be used in atom identifiers. This doesn't
// leave us any room for error detection.
//
// TagLib has decided on a character set to consider valid, so we will do the same:
// <https://github.com/taglib/taglib/issues/1077#issuecomment-1440385838>
pub(crate) fn is_valid_identifier_byte(b: u8) -> bool {
	(b' '..=b'~').contains(&b) || b == b'\xA9'
}

/// Determines whether an atom is decoded as a container
///
/// Returns the number of bytes preceding the first child, or `None` for leaf atoms.
///
/// Containers are only recognized along the `moov.udta.meta.ilst` chain, which keeps the
/// nesting depth bounded regardless of the input.
pub(crate) fn container_prefix(
	parent: Option<[u8; 4]>,
	ident: [u8; 4],
	content: &[u8],
) -> Option<usize> {
	match (parent.as_ref(), &ident) {
		(None, b"moov") => Some(0),
		(None | Some(b"moov"), b"udta") => Some(0),
		(None | Some(b"moov" | b"udta"), b"meta") => meta_prefix(content),
		(Some(b"meta"), b"ilst") => Some(0),
		// Padding inside `ilst` is not an entry
		(Some(b"ilst"), b"free" | b"skip") => None,
		(Some(b"ilst"), _) => Some(0),
		_ => None,
	}
}

fn meta_prefix(content: &[u8]) -> Option<usize> {
	// A full `meta` atom should have the following:
	//
	// Version (1)
	// Flags (3)
	//
	// However, it's possible that it is written as a normal atom,
	// meaning the first four bytes are the size of the next atom.
	if content.len() >= ATOM_HEADER_LEN {
		let possible_ident = &content[4..ATOM_HEADER_LEN];
		if META_CHILDREN.iter().any(|ident| ident == possible_ident) {
			log::warn!("File contains a non-full 'meta' atom");
			return Some(0);
		}
	}

	if content.len() < 4 {
		return None;
	}

	Some(4)
}
