use super::Atom;
use crate::error::Result;
use crate::macros::err;
use crate::util::alloc::VecFallibleCapacity;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Serialize a sequence of atoms
///
/// Every size is recomputed from the atom's content, so this can be called after any number of
/// edits to the tree.
///
/// # Errors
///
/// * A non-extended atom grew beyond [`u32::MAX`] bytes
/// * The output cannot be allocated
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::{Atom, serialize};
///
/// # fn main() -> m4atag::error::Result<()> {
/// let atoms = [Atom::new(*b"free", Vec::new())];
/// assert_eq!(serialize(&atoms)?, b"\x00\x00\x00\x08free");
/// # Ok(()) }
/// ```
pub fn serialize(atoms: &[Atom]) -> Result<Vec<u8>> {
	let total_len = atoms.iter().map(Atom::len).sum::<u64>();
	log::debug!(
		"Serializing {} top-level atoms, {} bytes",
		atoms.len(),
		total_len
	);

	let Ok(total_len) = usize::try_from(total_len) else {
		err!(TooMuchData);
	};

	let mut output = Vec::try_with_capacity_stable(total_len)?;
	write_atoms(&mut output, atoms)?;

	Ok(output)
}

/// Write a sequence of atoms to `writer`
///
/// This produces the same bytes as [`serialize`].
///
/// # Errors
///
/// * A non-extended atom grew beyond [`u32::MAX`] bytes
/// * `writer` fails to write
pub fn write_atoms<W>(writer: &mut W, atoms: &[Atom]) -> Result<()>
where
	W: Write,
{
	for atom in atoms {
		write_atom(writer, atom)?;
	}

	Ok(())
}

fn write_atom<W>(writer: &mut W, atom: &Atom) -> Result<()>
where
	W: Write,
{
	let len = atom.len();

	if atom.extended {
		writer.write_u32::<BigEndian>(1)?;
		writer.write_all(&atom.ident)?;
		writer.write_u64::<BigEndian>(len)?;
	} else {
		let Ok(len) = u32::try_from(len) else {
			log::error!(
				"Atom \"{}\" is too large for a 32-bit size ({} bytes)",
				atom.ident.escape_ascii(),
				len
			);
			err!(TooMuchData);
		};

		writer.write_u32::<BigEndian>(len)?;
		writer.write_all(&atom.ident)?;
	}

	writer.write_all(&atom.payload)?;

	// Children are written after the payload, which only ever holds a container's prefix
	write_atoms(writer, &atom.children)
}
