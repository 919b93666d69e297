use crate::error::Result;

/// **DO NOT USE DIRECTLY**
///
/// Copies `bytes` into a new `Vec`, reporting allocation failure instead of aborting.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_slice(bytes: &[u8]) -> Result<Vec<u8>> {
	let mut v = Vec::new();
	v.try_reserve_exact(bytes.len())?;
	v.extend_from_slice(bytes);

	Ok(v)
}

/// Provides the `try_with_capacity` method on `Vec`
///
/// This can be used directly.
pub(crate) trait VecFallibleCapacity<T>: Sized {
	/// Same as `Vec::with_capacity`, but reports allocation failure.
	///
	/// Named `try_with_capacity_stable` to avoid conflicts with the nightly `Vec::try_with_capacity`.
	fn try_with_capacity_stable(capacity: usize) -> Result<Self>;
}

impl<T> VecFallibleCapacity<T> for Vec<T> {
	fn try_with_capacity_stable(capacity: usize) -> Result<Self> {
		let mut v = Vec::new();
		v.try_reserve(capacity)?;

		Ok(v)
	}
}
