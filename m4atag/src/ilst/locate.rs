use super::ident::AtomIdent;
use crate::atom::{Atom, AtomPath};
use crate::error::Result;
use crate::macros::err;

use std::borrow::Cow;

/// The chain of atoms leading to the `ilst` atom, starting from `moov`
pub(crate) const METADATA_PATH: [[u8; 4]; 4] = [*b"moov", *b"udta", *b"meta", *b"ilst"];

// Version (1) + Flags (3)
pub(crate) const FULL_ATOM_PREFIX_LEN: usize = 4;

// Version/flags (4) + Predefined (4) + Handler type (4) + Reserved (12) + Empty name (1)
const HDLR_PAYLOAD: [u8; 25] = *b"\0\0\0\0\0\0\0\0mdirappl\0\0\0\0\0\0\0\0\0";

/// Find the `moov.udta.meta.ilst` atom
///
/// The first atom with the expected identifier is taken at each level.
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::ilst::find_metadata_container;
///
/// let meta = Atom::container_with_prefix(*b"meta", vec![0; 4], vec![Atom::container(*b"ilst", Vec::new())]);
/// let atoms = vec![Atom::container(*b"moov", vec![Atom::container(*b"udta", vec![meta])])];
///
/// let ilst = find_metadata_container(&atoms).unwrap();
/// assert_eq!(ilst.indices(), &[0, 0, 0, 0]);
/// ```
pub fn find_metadata_container(atoms: &[Atom]) -> Option<AtomPath> {
	let (moov_ident, rest) = METADATA_PATH.split_first()?;

	let moov_index = atoms.iter().position(|atom| atom.ident == *moov_ident)?;

	let mut path = AtomPath::new(moov_index);
	let mut current = &atoms[moov_index];
	for ident in rest {
		let index = current
			.children
			.iter()
			.position(|child| child.ident == *ident)?;

		path = path.child(index);
		current = &current.children[index];
	}

	Some(path)
}

/// Find the first entry in `ilst` matching `ident`
///
/// Returns the index of the entry in [`Atom::children`]. Any later entries with the same identifier
/// are never visible.
pub fn find_entry(ilst: &Atom, ident: &AtomIdent<'_>) -> Option<usize> {
	ilst.children
		.iter()
		.position(|entry| entry_ident(entry).is_some_and(|found| found == *ident))
}

/// Get the identifier of an `ilst` entry
///
/// Freeform (`----`) entries resolve to an [`AtomIdent::Freeform`], provided their `mean` and `name`
/// children are intact. Otherwise, they are reported as `AtomIdent::Fourcc(*b"----")`.
///
/// Returns `None` for padding.
pub fn entry_ident(entry: &Atom) -> Option<AtomIdent<'_>> {
	match &entry.ident {
		b"free" | b"skip" => None,
		b"----" => Some(freeform_ident(entry).unwrap_or(AtomIdent::Fourcc(*b"----"))),
		fourcc => Some(AtomIdent::Fourcc(*fourcc)),
	}
}

fn freeform_ident(entry: &Atom) -> Option<AtomIdent<'_>> {
	let mean = freeform_chunk(entry, *b"mean")?;
	let name = freeform_chunk(entry, *b"name")?;

	Some(AtomIdent::Freeform {
		mean: Cow::Borrowed(mean),
		name: Cow::Borrowed(name),
	})
}

fn freeform_chunk(entry: &Atom, ident: [u8; 4]) -> Option<&str> {
	let chunk = entry.child(ident)?;
	let content = chunk.payload.get(FULL_ATOM_PREFIX_LEN..)?;

	match std::str::from_utf8(content) {
		Ok(s) => Some(s),
		Err(_) => {
			log::warn!("Found a non UTF-8 string while reading freeform identifier");
			None
		},
	}
}

/// Get the `moov.udta.meta.ilst` atom, creating any missing atoms along the way
///
/// Missing atoms are appended to the first `moov` atom:
///
/// * `udta`
/// * `meta`, as a full atom with an `hdlr` atom marking it as iTunes metadata
/// * `ilst`
///
/// # Errors
///
/// * There is no `moov` atom
/// * One of the atoms along the way was kept as raw bytes (see [`Diagnostic::OpaqueContainer`](crate::diagnostic::Diagnostic::OpaqueContainer))
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::ilst::{ensure_metadata_container, find_metadata_container};
///
/// # fn main() -> m4atag::error::Result<()> {
/// let mut atoms = vec![Atom::container(*b"moov", Vec::new())];
/// assert!(find_metadata_container(&atoms).is_none());
///
/// let ilst = ensure_metadata_container(&mut atoms)?;
/// assert_eq!(find_metadata_container(&atoms), Some(ilst));
/// # Ok(()) }
/// ```
pub fn ensure_metadata_container(atoms: &mut Vec<Atom>) -> Result<AtomPath> {
	let Some(moov_index) = atoms.iter().position(|atom| atom.ident == *b"moov") else {
		log::warn!("Unable to create an `ilst` atom, no `moov` atom exists");
		err!(MetadataContainerAbsent);
	};

	let mut path = AtomPath::new(moov_index);
	let mut current = &mut atoms[moov_index];
	for ident in &METADATA_PATH[1..] {
		if !current.container {
			log::warn!(
				"Unable to create an `ilst` atom, \"{}\" could not be decoded",
				current.ident.escape_ascii()
			);
			err!(MetadataContainerAbsent);
		}

		let index = match current.children.iter().position(|child| child.ident == *ident) {
			Some(index) => index,
			None => {
				log::debug!(
					"Creating missing \"{}\" atom",
					ident.escape_ascii()
				);

				current.children.push(new_container(*ident));
				current.children.len() - 1
			},
		};

		path = path.child(index);
		current = &mut current.children[index];
	}

	if !current.container {
		err!(MetadataContainerAbsent);
	}

	Ok(path)
}

fn new_container(ident: [u8; 4]) -> Atom {
	match &ident {
		b"meta" => Atom::container_with_prefix(
			ident,
			vec![0; FULL_ATOM_PREFIX_LEN],
			vec![Atom::new(*b"hdlr", HDLR_PAYLOAD.to_vec())],
		),
		_ => Atom::container(ident, Vec::new()),
	}
}
