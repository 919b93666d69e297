use super::data_type::DataType;

/// The layout of a value stored in a `data` atom
///
/// Every identifier has exactly one shape, see [`MetadataCatalogue`](super::MetadataCatalogue).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueShape {
	/// A UTF-8 string, without a NULL terminator
	String,
	/// A 1 byte unsigned integer
	UInt8,
	/// A big-endian 2 byte unsigned integer
	UInt16,
	/// A big-endian 4 byte unsigned integer
	UInt32,
	/// A big-endian 8 byte unsigned integer
	UInt64,
	/// Two big-endian 2 byte unsigned integers, such as "track 3 of 16"
	Pair,
	/// Raw image data
	Image,
}

impl ValueShape {
	/// The exact number of bytes a value of this shape occupies, if fixed
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::ilst::ValueShape;
	///
	/// assert_eq!(ValueShape::UInt32.width(), Some(4));
	/// assert_eq!(ValueShape::String.width(), None);
	/// ```
	pub fn width(self) -> Option<usize> {
		match self {
			ValueShape::UInt8 => Some(1),
			ValueShape::UInt16 => Some(2),
			ValueShape::UInt32 => Some(4),
			ValueShape::UInt64 => Some(8),
			_ => None,
		}
	}
}

/// A decoded metadata value
///
/// # Examples
///
/// ```rust
/// use m4atag::ilst::{MetadataValue, ValueShape};
///
/// let track = MetadataValue::Pair(3, 16);
/// assert_eq!(track.shape(), ValueShape::Pair);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetadataValue {
	/// A UTF-8 string
	String(String),
	/// A 1 byte unsigned integer
	UInt8(u8),
	/// A 2 byte unsigned integer
	UInt16(u16),
	/// A 4 byte unsigned integer
	UInt32(u32),
	/// An 8 byte unsigned integer
	UInt64(u64),
	/// A pair of 2 byte unsigned integers (number, total)
	Pair(u16, u16),
	/// Raw image data
	Image(Vec<u8>),
}

impl MetadataValue {
	/// The shape of this value
	pub fn shape(&self) -> ValueShape {
		match self {
			MetadataValue::String(_) => ValueShape::String,
			MetadataValue::UInt8(_) => ValueShape::UInt8,
			MetadataValue::UInt16(_) => ValueShape::UInt16,
			MetadataValue::UInt32(_) => ValueShape::UInt32,
			MetadataValue::UInt64(_) => ValueShape::UInt64,
			MetadataValue::Pair(..) => ValueShape::Pair,
			MetadataValue::Image(_) => ValueShape::Image,
		}
	}

	/// The data type used for new entries holding this value
	///
	/// Integers follow the iTunes convention of [`DataType::BeSignedInteger`], and images are
	/// identified by their signature.
	pub fn default_data_type(&self) -> DataType {
		match self {
			MetadataValue::String(_) => DataType::Utf8,
			MetadataValue::UInt8(_)
			| MetadataValue::UInt16(_)
			| MetadataValue::UInt32(_)
			| MetadataValue::UInt64(_) => DataType::BeSignedInteger,
			MetadataValue::Pair(..) => DataType::Reserved,
			MetadataValue::Image(image) => DataType::from_image_signature(image),
		}
	}

	/// Get the string, if this is a [`MetadataValue::String`]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			MetadataValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Get the integer, if this is any of the integer variants
	pub fn as_u64(&self) -> Option<u64> {
		match *self {
			MetadataValue::UInt8(n) => Some(u64::from(n)),
			MetadataValue::UInt16(n) => Some(u64::from(n)),
			MetadataValue::UInt32(n) => Some(u64::from(n)),
			MetadataValue::UInt64(n) => Some(n),
			_ => None,
		}
	}

	/// Get the pair, if this is a [`MetadataValue::Pair`]
	pub fn as_pair(&self) -> Option<(u16, u16)> {
		match *self {
			MetadataValue::Pair(number, total) => Some((number, total)),
			_ => None,
		}
	}

	/// Get the image data, if this is a [`MetadataValue::Image`]
	pub fn as_image(&self) -> Option<&[u8]> {
		match self {
			MetadataValue::Image(image) => Some(image),
			_ => None,
		}
	}
}
