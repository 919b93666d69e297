use super::constants::STANDARD_SHAPES;
use super::ident::AtomIdent;
use super::value::ValueShape;

/// A mapping of `ilst` identifiers to the shape of their values
///
/// This is used to report unrecognized identifiers after parsing (see
/// [`check_identifiers`](super::check_identifiers)), and by [`Mp4File::get_known`](crate::file::Mp4File::get_known).
///
/// # Examples
///
/// ```rust
/// use m4atag::ilst::{AtomIdent, MetadataCatalogue, StandardCatalogue, ValueShape};
///
/// /// The standard identifiers, plus one of our own
/// struct MyCatalogue;
///
/// impl MetadataCatalogue for MyCatalogue {
/// 	fn shape_of(&self, ident: &AtomIdent<'_>) -> Option<ValueShape> {
/// 		if *ident == AtomIdent::Fourcc(*b"XYZW") {
/// 			return Some(ValueShape::UInt32);
/// 		}
///
/// 		StandardCatalogue.shape_of(ident)
/// 	}
/// }
///
/// assert!(MyCatalogue.is_known(&AtomIdent::Fourcc(*b"XYZW")));
/// ```
pub trait MetadataCatalogue {
	/// The shape of values stored under `ident`, or `None` if `ident` is unknown
	fn shape_of(&self, ident: &AtomIdent<'_>) -> Option<ValueShape>;

	/// Whether `ident` is part of this catalogue
	fn is_known(&self, ident: &AtomIdent<'_>) -> bool {
		self.shape_of(ident).is_some()
	}
}

impl<T: MetadataCatalogue + ?Sized> MetadataCatalogue for &T {
	fn shape_of(&self, ident: &AtomIdent<'_>) -> Option<ValueShape> {
		(**self).shape_of(ident)
	}
}

/// The well known iTunes identifiers
///
/// See [`constants`](super::constants) for the full list. Freeform identifiers are always
/// considered known, holding a [`ValueShape::String`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StandardCatalogue;

impl MetadataCatalogue for StandardCatalogue {
	fn shape_of(&self, ident: &AtomIdent<'_>) -> Option<ValueShape> {
		match ident {
			AtomIdent::Fourcc(fourcc) => STANDARD_SHAPES
				.iter()
				.find(|(known, _)| known == fourcc)
				.map(|(_, shape)| *shape),
			AtomIdent::Freeform { .. } => Some(ValueShape::String),
		}
	}
}
