use super::catalogue::MetadataCatalogue;
use super::constants::WELL_KNOWN_TYPE_SET;
use super::data_type::DataType;
use super::ident::AtomIdent;
use super::locate::{entry_ident, find_metadata_container};
use super::value::{MetadataValue, ValueShape};
use crate::atom::Atom;
use crate::diagnostic::Diagnostic;
use crate::error::{ErrorKind, M4aTagError, Result};
use crate::macros::{malformed, try_vec};

use byteorder::{BigEndian, ByteOrder};

// Type indicator (4) + Locale (4)
pub(crate) const DATA_HEADER_LEN: usize = 8;

/// Decode the value of an `ilst` entry
///
/// The entry must hold exactly one `data` atom (freeform entries may additionally hold their
/// `mean` and `name` atoms), with a data type that fits `shape`.
///
/// # Errors
///
/// * The entry does not hold exactly one `data` atom
/// * The `data` atom is too short, or has an unknown type set or locale
/// * The data type cannot hold `shape` (ex. a [`DataType::Utf8`] value read as [`ValueShape::UInt32`])
/// * `shape` is an integer, and the value has a different width ([`ErrorKind::UnsupportedShapeWidth`])
/// * A [`ValueShape::Pair`] is shorter than 6 bytes
/// * A [`ValueShape::String`] is not valid UTF-8
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::ilst::{MetadataValue, ValueShape, decode};
///
/// # fn main() -> m4atag::error::Result<()> {
/// let data = Atom::new(*b"data", b"\x00\x00\x00\x01\x00\x00\x00\x00Hello".to_vec());
/// let entry = Atom::container(*b"\xA9nam", vec![data]);
///
/// let title = decode(&entry, ValueShape::String)?;
/// assert_eq!(title, MetadataValue::String(String::from("Hello")));
/// # Ok(()) }
/// ```
pub fn decode(entry: &Atom, shape: ValueShape) -> Result<MetadataValue> {
	let ident = entry_ident(entry).unwrap_or(AtomIdent::Fourcc(entry.ident));
	let (data_type, value) = split_data(entry, &ident)?;

	if !data_type.is_accepted_for(shape) {
		log::warn!(
			"Entry `{}` has data type {:?}, which cannot hold a {:?}",
			ident,
			data_type,
			shape
		);
		malformed!(@BAIL &ident, "Data type does not match the requested shape");
	}

	if let Some(expected) = shape.width() {
		if value.len() != expected {
			return Err(M4aTagError::new(ErrorKind::UnsupportedShapeWidth {
				expected,
				found: value.len(),
			}));
		}
	}

	let decoded = match shape {
		ValueShape::String => MetadataValue::String(String::from_utf8(try_vec!(value))?),
		ValueShape::UInt8 => MetadataValue::UInt8(value[0]),
		ValueShape::UInt16 => MetadataValue::UInt16(BigEndian::read_u16(value)),
		ValueShape::UInt32 => MetadataValue::UInt32(BigEndian::read_u32(value)),
		ValueShape::UInt64 => MetadataValue::UInt64(BigEndian::read_u64(value)),
		ValueShape::Pair => {
			// Reserved (2) + Number (2) + Total (2), optionally followed by more reserved bytes
			if value.len() < 6 {
				malformed!(@BAIL &ident, "Pair value is too short");
			}

			MetadataValue::Pair(
				BigEndian::read_u16(&value[2..4]),
				BigEndian::read_u16(&value[4..6]),
			)
		},
		ValueShape::Image => MetadataValue::Image(try_vec!(value)),
	};

	Ok(decoded)
}

/// Validates the `data` atom of an entry, returning its data type and value
pub(crate) fn split_data<'a>(entry: &'a Atom, ident: &AtomIdent<'_>) -> Result<(DataType, &'a [u8])> {
	let data = data_atom(entry, ident)?;
	let payload = data.payload.as_slice();

	if payload.len() < DATA_HEADER_LEN {
		malformed!(@BAIL ident, "`data` atom is too short");
	}

	// We don't support any other type set
	if payload[0] != WELL_KNOWN_TYPE_SET {
		malformed!(@BAIL ident, "Unknown type set in `data` atom");
	}

	// Only the default locale is supported
	if payload[4..DATA_HEADER_LEN] != [0; 4] {
		malformed!(@BAIL ident, "Unexpected locale in `data` atom");
	}

	let data_type = DataType::from(BigEndian::read_u24(&payload[1..4]));
	Ok((data_type, &payload[DATA_HEADER_LEN..]))
}

fn data_atom<'a>(entry: &'a Atom, ident: &AtomIdent<'_>) -> Result<&'a Atom> {
	if !entry.container {
		malformed!(@BAIL ident, "Entry could not be decoded");
	}

	// Freeform entries also hold their `mean` and `name` atoms
	let freeform = matches!(ident, AtomIdent::Freeform { .. });
	let mut children = entry
		.children
		.iter()
		.filter(|child| !(freeform && matches!(&child.ident, b"mean" | b"name")));

	match (children.next(), children.next()) {
		(Some(data), None) if data.ident == *b"data" => Ok(data),
		(None, _) => Err(malformed!(ident, "Entry has no `data` atom")),
		_ => Err(malformed!(ident, "Expected exactly one `data` atom")),
	}
}

/// Check every `ilst` entry against `catalogue`
///
/// Each entry with an unknown identifier is reported as a
/// [`Diagnostic::UnrecognizedMetadataIdentifier`]. The tree is never modified.
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::diagnostic::Diagnostic;
/// use m4atag::ilst::{AtomIdent, StandardCatalogue, check_identifiers};
///
/// let ilst = Atom::container(*b"ilst", vec![Atom::container(*b"abcd", Vec::new())]);
/// let meta = Atom::container_with_prefix(*b"meta", vec![0; 4], vec![ilst]);
/// let atoms = vec![Atom::container(*b"moov", vec![Atom::container(*b"udta", vec![meta])])];
///
/// let diagnostics = check_identifiers(&atoms, &StandardCatalogue);
/// assert_eq!(
/// 	diagnostics,
/// 	[Diagnostic::UnrecognizedMetadataIdentifier(AtomIdent::Fourcc(*b"abcd"))]
/// );
/// ```
pub fn check_identifiers<C>(atoms: &[Atom], catalogue: &C) -> Vec<Diagnostic>
where
	C: MetadataCatalogue + ?Sized,
{
	let Some(ilst) = find_metadata_container(atoms).and_then(|path| path.resolve(atoms)) else {
		return Vec::new();
	};

	let mut diagnostics = Vec::new();
	for ident in ilst.children.iter().filter_map(entry_ident) {
		if catalogue.is_known(&ident) {
			continue;
		}

		log::warn!("Encountered an unrecognized metadata identifier `{ident}`");
		diagnostics.push(Diagnostic::UnrecognizedMetadataIdentifier(
			ident.into_owned(),
		));
	}

	diagnostics
}
