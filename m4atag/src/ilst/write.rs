use super::constants::WELL_KNOWN_TYPE_SET;
use super::data_type::DataType;
use super::ident::AtomIdent;
use super::locate::{
	FULL_ATOM_PREFIX_LEN, ensure_metadata_container, entry_ident, find_entry,
	find_metadata_container,
};
use super::read::{DATA_HEADER_LEN, split_data};
use super::value::MetadataValue;
use crate::atom::Atom;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::{err, malformed};
use crate::util::alloc::VecFallibleCapacity;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Set the value of an `ilst` entry
///
/// If an entry with the identifier exists, its `data` atom is replaced. Otherwise, a new entry is
/// appended to the `ilst` atom.
///
/// See [`WriteOptions`] for the options that affect this.
///
/// # Errors
///
/// * There is no `moov.udta.meta.ilst` atom, and [`WriteOptions::create_missing_containers`] is not set
/// * [`WriteOptions::create_missing_containers`] is set, but there is no `moov` atom
/// * `ident` is `free` or `skip`, which are never treated as entries ([`ErrorKind::MalformedMetadataEntry`](crate::error::ErrorKind::MalformedMetadataEntry))
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::config::WriteOptions;
/// use m4atag::ilst::{MetadataValue, ValueShape, constants, decode, find_entry, upsert};
///
/// # fn main() -> m4atag::error::Result<()> {
/// let mut atoms = vec![Atom::container(*b"moov", Vec::new())];
///
/// let write_options = WriteOptions::new().create_missing_containers(true);
/// upsert(&mut atoms, &constants::TRACK, MetadataValue::Pair(3, 16), write_options)?;
///
/// let ilst = &atoms[0].children()[0].children()[0].children()[1];
/// let entry = &ilst.children()[find_entry(ilst, &constants::TRACK).unwrap()];
/// assert_eq!(decode(entry, ValueShape::Pair)?, MetadataValue::Pair(3, 16));
/// # Ok(()) }
/// ```
pub fn upsert(
	atoms: &mut Vec<Atom>,
	ident: &AtomIdent<'_>,
	value: MetadataValue,
	write_options: WriteOptions,
) -> Result<()> {
	// Padding is skipped when looking up entries, so these could never be read back
	if matches!(ident, AtomIdent::Fourcc(fourcc) if matches!(fourcc, b"free" | b"skip")) {
		log::warn!("Unable to write `{ident}`, padding atoms cannot hold metadata");
		malformed!(@BAIL ident, "Padding atoms cannot hold metadata");
	}

	let path = match find_metadata_container(atoms) {
		Some(path) => path,
		None if write_options.create_missing_containers => ensure_metadata_container(atoms)?,
		None => {
			log::warn!("Unable to write `{ident}`, the file has no `ilst` atom");
			err!(MetadataContainerAbsent);
		},
	};

	let Some(ilst) = path.resolve_mut(atoms) else {
		err!(MetadataContainerAbsent);
	};

	if !ilst.container {
		log::warn!("Unable to write `{ident}`, the `ilst` atom could not be decoded");
		err!(MetadataContainerAbsent);
	}

	match find_entry(ilst, ident) {
		Some(index) => {
			log::debug!("Replacing the value of `{ident}`");
			overwrite_entry(&mut ilst.children[index], ident, value, write_options)
		},
		None => {
			log::debug!("Creating a new entry for `{ident}`");

			let data_type = value.default_data_type();
			let bytes = value_bytes(ident, value);
			ilst.children.push(new_entry(ident, data_atom(data_type, &bytes)?)?);

			Ok(())
		},
	}
}

fn overwrite_entry(
	entry: &mut Atom,
	ident: &AtomIdent<'_>,
	value: MetadataValue,
	write_options: WriteOptions,
) -> Result<()> {
	let shape = value.shape();
	let mut data_type = value.default_data_type();

	let mut bytes = None;
	if let Ok((existing_type, existing_value)) = split_data(entry, ident) {
		let accepted = existing_type.is_accepted_for(shape);

		// Images are only sniffed when the stored type can't be kept
		if write_options.preserve_data_type && accepted {
			data_type = existing_type;
		}

		// Only the number and total are replaced, the reserved bytes around them stay untouched
		if let MetadataValue::Pair(number, total) = value {
			if accepted && existing_value.len() >= 6 {
				let mut patched = existing_value.to_vec();
				patched[2..4].copy_from_slice(&number.to_be_bytes());
				patched[4..6].copy_from_slice(&total.to_be_bytes());
				bytes = Some(patched);
			}
		}
	}

	let bytes = bytes.unwrap_or_else(|| value_bytes(ident, value));

	let data = data_atom(data_type, &bytes)?;

	// Freeform entries need to keep their `mean` and `name` atoms
	let freeform = matches!(ident, AtomIdent::Freeform { .. });
	entry
		.children
		.retain(|child| freeform && matches!(&child.ident, b"mean" | b"name"));
	entry.children.push(data);

	// The entry may have been kept as raw bytes
	entry.payload.clear();
	entry.container = true;

	Ok(())
}

fn value_bytes(ident: &AtomIdent<'_>, value: MetadataValue) -> Vec<u8> {
	match value {
		MetadataValue::String(s) => s.into_bytes(),
		MetadataValue::UInt8(n) => vec![n],
		MetadataValue::UInt16(n) => n.to_be_bytes().to_vec(),
		MetadataValue::UInt32(n) => n.to_be_bytes().to_vec(),
		MetadataValue::UInt64(n) => n.to_be_bytes().to_vec(),
		MetadataValue::Pair(number, total) => {
			let [number_hi, number_lo] = number.to_be_bytes();
			let [total_hi, total_lo] = total.to_be_bytes();

			// Reserved (2) + Number (2) + Total (2)
			let mut bytes = vec![0, 0, number_hi, number_lo, total_hi, total_lo];

			// Track numbers have 2 more reserved bytes
			if *ident != AtomIdent::Fourcc(*b"disk") {
				bytes.extend_from_slice(&[0, 0]);
			}

			bytes
		},
		MetadataValue::Image(image) => image,
	}
}

fn data_atom(data_type: DataType, value: &[u8]) -> Result<Atom> {
	let mut payload = Vec::try_with_capacity_stable(DATA_HEADER_LEN + value.len())?;

	// Type set (1) + Type (3)
	let type_indicator =
		(u32::from(WELL_KNOWN_TYPE_SET) << 24) | (u32::from(data_type) & DataType::MAX);
	payload.write_u32::<BigEndian>(type_indicator)?;

	// Locale
	payload.write_u32::<BigEndian>(0)?;
	payload.write_all(value)?;

	Ok(Atom::new(*b"data", payload))
}

fn new_entry(ident: &AtomIdent<'_>, data: Atom) -> Result<Atom> {
	match ident {
		AtomIdent::Fourcc(fourcc) => Ok(Atom::container(*fourcc, vec![data])),
		AtomIdent::Freeform { mean, name } => Ok(Atom::container(
			*b"----",
			vec![
				freeform_chunk(*b"mean", mean)?,
				freeform_chunk(*b"name", name)?,
				data,
			],
		)),
	}
}

fn freeform_chunk(ident: [u8; 4], value: &str) -> Result<Atom> {
	let mut payload = Vec::try_with_capacity_stable(FULL_ATOM_PREFIX_LEN + value.len())?;

	// Version (1) + Flags (3)
	payload.extend_from_slice(&[0; FULL_ATOM_PREFIX_LEN]);
	payload.extend_from_slice(value.as_bytes());

	Ok(Atom::new(ident, payload))
}

/// Remove every `ilst` entry matching `ident`
///
/// Returns `true` if any entries were removed.
///
/// # Examples
///
/// ```rust
/// use m4atag::atom::Atom;
/// use m4atag::ilst::{constants, remove};
///
/// let ilst = Atom::container(*b"ilst", vec![Atom::container(*b"\xA9nam", Vec::new())]);
/// let meta = Atom::container_with_prefix(*b"meta", vec![0; 4], vec![ilst]);
/// let mut atoms = vec![Atom::container(*b"moov", vec![Atom::container(*b"udta", vec![meta])])];
///
/// assert!(remove(&mut atoms, &constants::TITLE));
/// assert!(!remove(&mut atoms, &constants::TITLE));
/// ```
pub fn remove(atoms: &mut [Atom], ident: &AtomIdent<'_>) -> bool {
	let Some(path) = find_metadata_container(atoms) else {
		return false;
	};

	let Some(ilst) = path.resolve_mut(atoms) else {
		return false;
	};

	let before = ilst.children.len();
	ilst.children
		.retain(|entry| entry_ident(entry).is_none_or(|found| found != *ident));

	let removed = before - ilst.children.len();
	if removed > 0 {
		log::debug!("Removed {removed} entries for `{ident}`");
	}

	removed > 0
}
