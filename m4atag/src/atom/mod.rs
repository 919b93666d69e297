//! The MP4 atom tree
//!
//! An MP4 file is a sequence of atoms (also called boxes). Every atom starts with a header:
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────┐
//! │ size u32 │ ident    │ content (size - 8)      │
//! └──────────┴──────────┴─────────────────────────┘
//! ```
//!
//! A size of `1` on an `mdat` atom means the real size is stored as a `u64` directly after the
//! identifier, making the header 16 bytes long.
//!
//! Some atoms (`moov`, `udta`, `meta`, `ilst`, and the `ilst` entries) are containers, their content
//! is itself a sequence of atoms. These are decoded into [`Atom::children`], everything else is kept
//! as raw bytes in [`Atom::payload`].
//!
//! Sizes are never stored. They are recomputed from the content when the tree is serialized, so any
//! edit automatically propagates to every ancestor.

mod read;
pub(crate) mod registry;
mod write;

pub use read::{ParsedAtoms, parse};
pub use registry::is_known_type;
pub use write::{serialize, write_atoms};

use std::fmt::{Debug, Formatter};

pub(crate) const FOURCC_LEN: usize = 4;
pub(crate) const IDENTIFIER_LEN: usize = 4;
pub(crate) const ATOM_HEADER_LEN: usize = FOURCC_LEN + IDENTIFIER_LEN;
pub(crate) const EXTENDED_HEADER_LEN: usize = ATOM_HEADER_LEN + 8;

/// A single atom and, for containers, all of its descendants
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::{Atom, serialize};
///
/// # fn main() -> m4atag::error::Result<()> {
/// let free = Atom::new(*b"free", vec![0; 4]);
/// assert_eq!(free.len(), 12);
///
/// let udta = Atom::container(*b"udta", vec![free]);
/// assert_eq!(udta.len(), 20);
///
/// let bytes = serialize(&[udta])?;
/// assert_eq!(&bytes[..8], b"\x00\x00\x00\x14udta");
/// # Ok(()) }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Atom {
	pub(crate) ident: [u8; 4],
	pub(crate) payload: Vec<u8>,
	pub(crate) children: Vec<Atom>,
	pub(crate) extended: bool,
	pub(crate) container: bool,
}

impl Atom {
	/// Create a leaf atom holding raw bytes
	#[must_use]
	pub const fn new(ident: [u8; 4], payload: Vec<u8>) -> Self {
		Self {
			ident,
			payload,
			children: Vec::new(),
			extended: false,
			container: false,
		}
	}

	/// Create a container atom
	#[must_use]
	pub const fn container(ident: [u8; 4], children: Vec<Atom>) -> Self {
		Self::container_with_prefix(ident, Vec::new(), children)
	}

	/// Create a container atom with bytes preceding its children
	///
	/// This is needed for "full" atoms, such as `meta`, which store a version and flags
	/// before their children.
	#[must_use]
	pub const fn container_with_prefix(ident: [u8; 4], prefix: Vec<u8>, children: Vec<Atom>) -> Self {
		Self {
			ident,
			payload: prefix,
			children,
			extended: false,
			container: true,
		}
	}

	/// The atom's identifier
	pub fn ident(&self) -> [u8; 4] {
		self.ident
	}

	/// The raw content of the atom
	///
	/// For leaf atoms this is the entire content. For containers, these are the bytes between
	/// the header and the first child, usually empty.
	pub fn payload(&self) -> &[u8] {
		&self.payload
	}

	/// Mutable access to [`Atom::payload`]
	pub fn payload_mut(&mut self) -> &mut Vec<u8> {
		&mut self.payload
	}

	/// The atom's children, empty for leaf atoms
	pub fn children(&self) -> &[Atom] {
		&self.children
	}

	/// Mutable access to [`Atom::children`]
	pub fn children_mut(&mut self) -> &mut Vec<Atom> {
		&mut self.children
	}

	/// Whether the content of this atom was decoded as (or created as) a sequence of atoms
	pub fn is_container(&self) -> bool {
		self.container
	}

	/// Whether this atom uses the 16-byte extended size header
	pub fn is_extended(&self) -> bool {
		self.extended
	}

	/// The first direct child with the given identifier
	pub fn child(&self, ident: [u8; 4]) -> Option<&Atom> {
		self.children.iter().find(|child| child.ident == ident)
	}

	/// The length of the header, 8 or 16 bytes
	pub fn header_len(&self) -> u64 {
		if self.extended {
			EXTENDED_HEADER_LEN as u64
		} else {
			ATOM_HEADER_LEN as u64
		}
	}

	/// The full size of the atom, as it will be written
	///
	/// This includes the header, payload, and all children.
	pub fn len(&self) -> u64 {
		let children_len = self.children.iter().map(Atom::len).sum::<u64>();
		self.header_len() + self.payload.len() as u64 + children_len
	}
}

impl Debug for Atom {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Atom");
		s.field("ident", &format_args!("\"{}\"", self.ident.escape_ascii()))
			.field("payload_len", &self.payload.len());

		if self.extended {
			s.field("extended", &true);
		}

		if self.container {
			s.field("children", &self.children);
		}

		s.finish()
	}
}

/// The location of an atom within a tree
///
/// Atoms do not hold references to their parents. Instead, an atom is addressed by the
/// indices leading to it from the top-level sequence, and its parent is found by dropping the
/// last index.
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::{Atom, AtomPath};
///
/// let atoms = vec![Atom::container(
/// 	*b"moov",
/// 	vec![Atom::container(*b"udta", Vec::new())],
/// )];
///
/// let udta = AtomPath::new(0).child(0);
/// assert_eq!(udta.resolve(&atoms).map(Atom::ident), Some(*b"udta"));
///
/// let moov = udta.parent().unwrap();
/// assert_eq!(moov.resolve(&atoms).map(Atom::ident), Some(*b"moov"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtomPath(Vec<usize>);

impl AtomPath {
	/// A path to a top-level atom
	#[must_use]
	pub fn new(index: usize) -> Self {
		Self(vec![index])
	}

	/// A path to the `index`th child of this atom
	#[must_use]
	pub fn child(&self, index: usize) -> Self {
		let mut indices = self.0.clone();
		indices.push(index);
		Self(indices)
	}

	/// The path to this atom's parent, `None` for top-level atoms
	pub fn parent(&self) -> Option<Self> {
		match self.0.len() {
			0 | 1 => None,
			len => Some(Self(self.0[..len - 1].to_vec())),
		}
	}

	/// The indices making up this path, starting at the top level
	pub fn indices(&self) -> &[usize] {
		&self.0
	}

	/// Find the atom this path points to
	pub fn resolve<'a>(&self, atoms: &'a [Atom]) -> Option<&'a Atom> {
		let (first, rest) = self.0.split_first()?;

		let mut atom = atoms.get(*first)?;
		for index in rest {
			atom = atom.children.get(*index)?;
		}

		Some(atom)
	}

	/// Find the atom this path points to, mutably
	pub fn resolve_mut<'a>(&self, atoms: &'a mut [Atom]) -> Option<&'a mut Atom> {
		let (first, rest) = self.0.split_first()?;

		let mut atom = atoms.get_mut(*first)?;
		for index in rest {
			atom = atom.children.get_mut(*index)?;
		}

		Some(atom)
	}
}
