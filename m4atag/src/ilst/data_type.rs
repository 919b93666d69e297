use super::value::ValueShape;

/// The [well known] basic data types
///
/// Only the types that can hold one of the [`ValueShape`]s are named, anything else is
/// [`DataType::Other`].
///
/// [well known]: https://developer.apple.com/documentation/quicktime-file-format/well-known_types
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
	/// Reserved for use where no type needs to be indicated
	Reserved,
	/// UTF-8 string without any count or NULL terminator
	Utf8,
	/// **DEPRECATED** A GIF image
	Gif,
	/// A JPEG in a JFIF wrapper
	Jpeg,
	/// A PNG in a PNG wrapper
	Png,
	/// A big-endian signed integer in 1,2,3 or 4 bytes
	BeSignedInteger,
	/// A big-endian unsigned integer in 1,2,3 or 4 bytes; size of value determines integer size
	BeUnsignedInteger,
	/// Windows bitmap format graphics
	Bmp,
	/// An 8-bit unsigned integer
	Unsigned8BitInteger,
	/// A big-endian 16-bit unsigned integer
	Be16BitUnsignedInteger,
	/// A big-endian 32-bit unsigned integer
	Be32BitUnsignedInteger,
	/// A big-endian 64-bit unsigned integer
	Be64BitUnsignedInteger,
	/// Some other data type
	Other(u32),
}

impl From<u32> for DataType {
	fn from(value: u32) -> Self {
		match value {
			0 => DataType::Reserved,
			1 => DataType::Utf8,
			12 => DataType::Gif,
			13 => DataType::Jpeg,
			14 => DataType::Png,
			21 => DataType::BeSignedInteger,
			22 => DataType::BeUnsignedInteger,
			27 => DataType::Bmp,
			75 => DataType::Unsigned8BitInteger,
			76 => DataType::Be16BitUnsignedInteger,
			77 => DataType::Be32BitUnsignedInteger,
			78 => DataType::Be64BitUnsignedInteger,
			other => DataType::Other(other),
		}
	}
}

impl From<DataType> for u32 {
	fn from(value: DataType) -> Self {
		match value {
			DataType::Reserved => 0,
			DataType::Utf8 => 1,
			DataType::Gif => 12,
			DataType::Jpeg => 13,
			DataType::Png => 14,
			DataType::BeSignedInteger => 21,
			DataType::BeUnsignedInteger => 22,
			DataType::Bmp => 27,
			DataType::Unsigned8BitInteger => 75,
			DataType::Be16BitUnsignedInteger => 76,
			DataType::Be32BitUnsignedInteger => 77,
			DataType::Be64BitUnsignedInteger => 78,
			DataType::Other(other) => other,
		}
	}
}

impl DataType {
	/// A data type can only occupy 24 bits
	pub const MAX: u32 = 16_777_215;

	/// Guess the data type of an image from its signature
	///
	/// Returns [`DataType::Reserved`] for unknown formats.
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::ilst::DataType;
	///
	/// let png = b"\x89PNG\r\n\x1a\n";
	/// assert_eq!(DataType::from_image_signature(png), DataType::Png);
	/// assert_eq!(DataType::from_image_signature(b"????"), DataType::Reserved);
	/// ```
	pub fn from_image_signature(image: &[u8]) -> Self {
		match image {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => DataType::Png,
			[0xFF, 0xD8, 0xFF, ..] => DataType::Jpeg,
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => DataType::Gif,
			[b'B', b'M', ..] => DataType::Bmp,
			_ => DataType::Reserved,
		}
	}

	/// Whether a value stored with this data type can be read as `shape`
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::ilst::{DataType, ValueShape};
	///
	/// assert!(DataType::Utf8.is_accepted_for(ValueShape::String));
	/// assert!(!DataType::Utf8.is_accepted_for(ValueShape::UInt32));
	/// ```
	pub fn is_accepted_for(self, shape: ValueShape) -> bool {
		match shape {
			ValueShape::String => self == DataType::Utf8,
			ValueShape::UInt8 | ValueShape::UInt16 | ValueShape::UInt32 | ValueShape::UInt64 => {
				matches!(
					self,
					DataType::Reserved
						| DataType::BeSignedInteger
						| DataType::BeUnsignedInteger
						| DataType::Unsigned8BitInteger
						| DataType::Be16BitUnsignedInteger
						| DataType::Be32BitUnsignedInteger
						| DataType::Be64BitUnsignedInteger
				)
			},
			ValueShape::Pair => self == DataType::Reserved,
			ValueShape::Image => matches!(
				self,
				DataType::Reserved | DataType::Gif | DataType::Jpeg | DataType::Png | DataType::Bmp
			),
		}
	}
}
