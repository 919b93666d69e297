//! A parsed MP4 file
//!
//! [`Mp4File`] ties the [`atom`](crate::atom) and [`ilst`](crate::ilst) modules together: it owns the
//! atom tree, the diagnostics gathered while reading it, and provides typed access to the metadata.

use crate::atom::{self, Atom, ParsedAtoms};
use crate::config::{ParseOptions, WriteOptions};
use crate::diagnostic::Diagnostic;
use crate::error::{M4aTagError, Result};
use crate::ilst::{
	self, AtomIdent, MetadataCatalogue, MetadataValue, StandardCatalogue, ValueShape, constants,
};
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Write};

/// Values that can be read and written through the named accessors of [`Mp4File`]
trait AccessorValue: Sized {
	const SHAPE: ValueShape;

	fn from_value(value: MetadataValue) -> Option<Self>;
	fn into_value(self) -> MetadataValue;
}

macro_rules! impl_accessor_value {
	($($ty:ty => $variant:ident),+ $(,)?) => {
		$(
			impl AccessorValue for $ty {
				const SHAPE: ValueShape = ValueShape::$variant;

				fn from_value(value: MetadataValue) -> Option<Self> {
					match value {
						MetadataValue::$variant(value) => Some(value),
						_ => None,
					}
				}

				fn into_value(self) -> MetadataValue {
					MetadataValue::$variant(self)
				}
			}
		)+
	};
}

impl_accessor_value!(
	String => String,
	u8 => UInt8,
	u16 => UInt16,
	Vec<u8> => Image,
);

impl AccessorValue for (u16, u16) {
	const SHAPE: ValueShape = ValueShape::Pair;

	fn from_value(value: MetadataValue) -> Option<Self> {
		value.as_pair()
	}

	fn into_value(self) -> MetadataValue {
		MetadataValue::Pair(self.0, self.1)
	}
}

macro_rules! impl_accessors {
	($($name:ident => $const:ident: $ty:ty;)+) => {
		paste::paste! {
			$(
				#[doc = "Gets the value of the [`" $const "`](constants::" $const ") entry"]
				///
				/// This will be `None` if the entry doesn't exist, or it could not be decoded.
				pub fn $name(&self) -> Option<$ty> {
					self.get(&constants::$const, <$ty as AccessorValue>::SHAPE)
						.and_then(<$ty as AccessorValue>::from_value)
				}

				#[doc = "Sets the value of the [`" $const "`](constants::" $const ") entry"]
				///
				/// # Errors
				///
				/// See [`Mp4File::set`]
				pub fn [<set_ $name>](&mut self, value: $ty) -> Result<()> {
					self.set(&constants::$const, value.into_value())
				}

				#[doc = "Removes the [`" $const "`](constants::" $const ") entry"]
				///
				/// Returns `true` if the entry existed.
				pub fn [<remove_ $name>](&mut self) -> bool {
					self.remove(&constants::$const)
				}
			)+
		}
	};
}

/// An MP4 file
///
/// # Examples
///
/// ```rust
/// use m4atag::config::{ParseOptions, WriteOptions};
/// use m4atag::file::Mp4File;
///
/// # fn main() -> m4atag::error::Result<()> {
/// # let input = m4atag::atom::serialize(&[
/// # 	m4atag::atom::Atom::new(*b"ftyp", b"M4A \x00\x00\x00\x00".to_vec()),
/// # 	m4atag::atom::Atom::container(*b"moov", Vec::new()),
/// # ])?;
/// let mut m4a_file = Mp4File::parse(&input, ParseOptions::new())?;
/// assert_eq!(m4a_file.major_brand(), Some(*b"M4A "));
///
/// // This file has no metadata yet, so we need to allow `m4atag` to create it
/// m4a_file.set_write_options(WriteOptions::new().create_missing_containers(true));
///
/// m4a_file.set_title(String::from("Foo title"))?;
/// m4a_file.set_track((1, 12))?;
///
/// let bytes = m4a_file.to_bytes()?;
///
/// let reparsed = Mp4File::parse(&bytes, ParseOptions::new())?;
/// assert_eq!(reparsed.title().as_deref(), Some("Foo title"));
/// assert_eq!(reparsed.track(), Some((1, 12)));
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp4File {
	pub(crate) atoms: Vec<Atom>,
	pub(crate) diagnostics: Vec<Diagnostic>,
	pub(crate) write_options: WriteOptions,
}

impl Mp4File {
	/// Parse an MP4 file from a buffer
	///
	/// If [`ParseOptions::check_identifiers`] is set, the `ilst` entries are checked against
	/// the [`StandardCatalogue`].
	///
	/// # Errors
	///
	/// See [`atom::parse`]
	pub fn parse(data: &[u8], parse_options: ParseOptions) -> Result<Self> {
		Self::parse_with(data, parse_options, &StandardCatalogue)
	}

	/// Parse an MP4 file from a buffer, checking the `ilst` entries against a custom catalogue
	///
	/// # Errors
	///
	/// See [`atom::parse`]
	pub fn parse_with<C>(data: &[u8], parse_options: ParseOptions, catalogue: &C) -> Result<Self>
	where
		C: MetadataCatalogue + ?Sized,
	{
		let ParsedAtoms {
			atoms,
			mut diagnostics,
		} = atom::parse(data, parse_options)?;

		if parse_options.check_identifiers {
			diagnostics.extend(ilst::check_identifiers(&atoms, catalogue));
		}

		Ok(Self {
			atoms,
			diagnostics,
			write_options: WriteOptions::default(),
		})
	}

	/// Read the entirety of `reader` and parse it
	///
	/// # Errors
	///
	/// * `reader` fails to read
	/// * See [`atom::parse`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use m4atag::config::ParseOptions;
	/// use m4atag::file::Mp4File;
	/// use std::fs::File;
	///
	/// # fn main() -> m4atag::error::Result<()> {
	/// let mut file = File::open("foo.m4a")?;
	/// let m4a_file = Mp4File::read_from(&mut file, ParseOptions::new())?;
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Self::parse(&data, parse_options)
	}

	/// The top-level atoms
	pub fn atoms(&self) -> &[Atom] {
		&self.atoms
	}

	/// Mutable access to the top-level atoms
	pub fn atoms_mut(&mut self) -> &mut Vec<Atom> {
		&mut self.atoms
	}

	/// Consume the file, returning the top-level atoms
	pub fn into_atoms(self) -> Vec<Atom> {
		self.atoms
	}

	/// Recoverable problems found while reading the file
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}

	/// Returns the file format from ftyp's "major brand" (Ex. "M4A ")
	///
	/// This will be `None` if the file has no `ftyp` atom.
	pub fn major_brand(&self) -> Option<[u8; 4]> {
		let ftyp = self.atoms.iter().find(|atom| atom.ident() == *b"ftyp")?;
		ftyp.payload().get(..4)?.try_into().ok()
	}

	/// The options used by [`Mp4File::set`] and the named setters
	pub fn write_options(&self) -> WriteOptions {
		self.write_options
	}

	/// Change the options used by [`Mp4File::set`] and the named setters
	pub fn set_write_options(&mut self, write_options: WriteOptions) {
		self.write_options = write_options;
	}

	/// Serialize the file
	///
	/// # Errors
	///
	/// See [`atom::serialize`]
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		atom::serialize(&self.atoms)
	}

	/// Write the file to `writer`
	///
	/// # Errors
	///
	/// See [`atom::write_atoms`]
	pub fn write_to<W>(&self, writer: &mut W) -> Result<()>
	where
		W: Write,
	{
		atom::write_atoms(writer, &self.atoms)
	}

	/// Replace the contents of `file` with this file
	///
	/// The file is rewound, overwritten, and truncated to the new length.
	///
	/// # Errors
	///
	/// * See [`atom::serialize`]
	/// * `file` fails to write or truncate
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use m4atag::config::ParseOptions;
	/// use m4atag::file::Mp4File;
	/// use std::fs::OpenOptions;
	///
	/// # fn main() -> m4atag::error::Result<()> {
	/// let mut file = OpenOptions::new().read(true).write(true).open("foo.m4a")?;
	/// let mut m4a_file = Mp4File::read_from(&mut file, ParseOptions::new())?;
	///
	/// m4a_file.set_artist(String::from("Foo artist"))?;
	/// m4a_file.save_to(&mut file)?;
	/// # Ok(()) }
	/// ```
	pub fn save_to<F>(&self, file: &mut F) -> Result<()>
	where
		F: FileLike,
		M4aTagError: From<<F as Truncate>::Error>,
		M4aTagError: From<<F as Length>::Error>,
	{
		let bytes = self.to_bytes()?;

		log::debug!(
			"Saving file, {} bytes (previously {} bytes)",
			bytes.len(),
			Length::len(&*file)?
		);

		file.rewind()?;
		file.write_all(&bytes)?;
		Truncate::truncate(&mut *file, bytes.len() as u64)?;
		file.flush()?;

		Ok(())
	}

	fn ilst(&self) -> Option<&Atom> {
		ilst::find_metadata_container(&self.atoms).and_then(|path| path.resolve(&self.atoms))
	}

	/// Get the value of an `ilst` entry
	///
	/// This will be `None` if the entry doesn't exist, or it could not be decoded. Use
	/// [`Mp4File::try_get`] to find out why an entry could not be decoded.
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::file::Mp4File;
	/// use m4atag::ilst::{MetadataValue, ValueShape, constants};
	///
	/// # fn main() -> m4atag::error::Result<()> {
	/// # let input = m4atag::atom::serialize(&[m4atag::atom::Atom::container(*b"moov", Vec::new())])?;
	/// # let m4a_file = Mp4File::parse(&input, m4atag::config::ParseOptions::new())?;
	/// if let Some(MetadataValue::UInt16(bpm)) = m4a_file.get(&constants::BPM, ValueShape::UInt16) {
	/// 	println!("BPM: {bpm}");
	/// }
	/// # Ok(()) }
	/// ```
	pub fn get(&self, ident: &AtomIdent<'_>, shape: ValueShape) -> Option<MetadataValue> {
		match self.try_get(ident, shape) {
			Ok(value) => value,
			Err(e) => {
				log::warn!("Unable to read `{ident}`: {e}");
				None
			},
		}
	}

	/// Get the value of an `ilst` entry, reporting why it could not be decoded
	///
	/// # Errors
	///
	/// See [`ilst::decode`]
	pub fn try_get(
		&self,
		ident: &AtomIdent<'_>,
		shape: ValueShape,
	) -> Result<Option<MetadataValue>> {
		let Some(ilst) = self.ilst() else {
			return Ok(None);
		};

		let Some(index) = ilst::find_entry(ilst, ident) else {
			return Ok(None);
		};

		ilst::decode(&ilst.children()[index], shape).map(Some)
	}

	/// Get the value of an `ilst` entry, using the shape from the [`StandardCatalogue`]
	///
	/// This will be `None` if the identifier is not part of the catalogue.
	pub fn get_known(&self, ident: &AtomIdent<'_>) -> Option<MetadataValue> {
		let shape = StandardCatalogue.shape_of(ident)?;
		self.get(ident, shape)
	}

	/// Set the value of an `ilst` entry
	///
	/// # Errors
	///
	/// See [`ilst::upsert`]
	pub fn set(&mut self, ident: &AtomIdent<'_>, value: MetadataValue) -> Result<()> {
		ilst::upsert(&mut self.atoms, ident, value, self.write_options)
	}

	/// Remove every `ilst` entry matching `ident`
	///
	/// Returns `true` if any entries were removed.
	pub fn remove(&mut self, ident: &AtomIdent<'_>) -> bool {
		ilst::remove(&mut self.atoms, ident)
	}

	/// The identifiers of every `ilst` entry, in file order
	///
	/// Identifiers may appear multiple times, though only the first entry is accessible.
	pub fn entries(&self) -> impl Iterator<Item = AtomIdent<'_>> + '_ {
		self.ilst()
			.into_iter()
			.flat_map(|ilst| ilst.children().iter().filter_map(ilst::entry_ident))
	}

	impl_accessors! {
		title => TITLE: String;
		artist => ARTIST: String;
		album_artist => ALBUM_ARTIST: String;
		album => ALBUM: String;
		genre => GENRE: String;
		comment => COMMENT: String;
		composer => COMPOSER: String;
		year => YEAR: String;
		encoder => ENCODER: String;
		grouping => GROUPING: String;
		lyrics => LYRICS: String;
		copyright => COPYRIGHT: String;
		description => DESCRIPTION: String;
		track => TRACK: (u16, u16);
		disk => DISK: (u16, u16);
		bpm => BPM: u16;
		compilation => COMPILATION: u8;
		advisory_rating => ADVISORY_RATING: u8;
		media_type => MEDIA_TYPE: u8;
		cover_art => COVER_ART: Vec<u8>;
	}
}
