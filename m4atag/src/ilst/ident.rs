use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The identifier of an `ilst` entry
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum AtomIdent<'a> {
	/// A four byte identifier
	///
	/// Many FOURCCs start with `0xA9` (©), and should be human-readable.
	Fourcc([u8; 4]),
	/// A freeform identifier
	///
	/// # Example
	///
	/// ```text
	/// ----:com.apple.iTunes:SUBTITLE
	/// ─┬── ────────┬─────── ───┬────
	///  ╰freeform identifier    ╰name
	///              |
	///              ╰mean
	/// ```
	Freeform {
		/// A string using a reverse DNS naming convention
		mean: Cow<'a, str>,
		/// A string identifying the atom
		name: Cow<'a, str>,
	},
}

impl<'a> AtomIdent<'a> {
	/// Obtains a borrowed instance
	pub fn as_borrowed(&'a self) -> Self {
		match self {
			Self::Fourcc(fourcc) => Self::Fourcc(*fourcc),
			Self::Freeform { mean, name } => Self::Freeform {
				mean: Cow::Borrowed(mean),
				name: Cow::Borrowed(name),
			},
		}
	}

	/// Obtains an owned instance
	pub fn into_owned(self) -> AtomIdent<'static> {
		match self {
			Self::Fourcc(fourcc) => AtomIdent::Fourcc(fourcc),
			Self::Freeform { mean, name } => AtomIdent::Freeform {
				mean: Cow::Owned(mean.into_owned()),
				name: Cow::Owned(name.into_owned()),
			},
		}
	}

	/// The identifier of the atom holding this entry
	///
	/// This is the FOURCC itself, or `----` for freeform identifiers.
	pub fn fourcc(&self) -> [u8; 4] {
		match self {
			Self::Fourcc(fourcc) => *fourcc,
			Self::Freeform { .. } => *b"----",
		}
	}
}

impl Display for AtomIdent<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// ISO-8859-1, so `0xA9` is displayed as `©`
			Self::Fourcc(fourcc) => fourcc
				.iter()
				.try_for_each(|b| write!(f, "{}", char::from(*b))),
			Self::Freeform { mean, name } => write!(f, "----:{mean}:{name}"),
		}
	}
}

impl From<[u8; 4]> for AtomIdent<'_> {
	fn from(fourcc: [u8; 4]) -> Self {
		Self::Fourcc(fourcc)
	}
}
