/// Options to control how m4atag writes metadata
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) create_missing_containers: bool,
	pub(crate) preserve_data_type: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			create_missing_containers: false,
			preserve_data_type: true,
		}
	}

	/// Whether to create the `udta`, `meta`, and `ilst` atoms when they are missing
	///
	/// By default, setting a field in a file without an `ilst` atom fails with
	/// [`ErrorKind::MetadataContainerAbsent`](crate::error::ErrorKind::MetadataContainerAbsent).
	///
	/// When enabled, the missing atoms are created inside the first `moov` atom. A file without a
	/// `moov` atom still fails.
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::WriteOptions;
	///
	/// // My files were never tagged, create the atoms as needed
	/// let write_options = WriteOptions::new().create_missing_containers(true);
	/// ```
	pub fn create_missing_containers(mut self, create_missing_containers: bool) -> Self {
		self.create_missing_containers = create_missing_containers;
		self
	}

	/// Whether to reuse the data type of an existing entry when overwriting it
	///
	/// When enabled (the default), writing a value into an existing entry keeps its stored data type
	/// (ex. `BE Unsigned Integer` rather than `BE Signed Integer`) as long as it is valid for the new value.
	/// Writing back a value that was just read then leaves the file unchanged.
	///
	/// # Examples
	///
	/// ```rust
	/// use m4atag::config::WriteOptions;
	///
	/// // Always write the default data types
	/// let write_options = WriteOptions::new().preserve_data_type(false);
	/// ```
	pub fn preserve_data_type(mut self, preserve_data_type: bool) -> Self {
		self.preserve_data_type = preserve_data_type;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	create_missing_containers: false,
	/// 	preserve_data_type: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
