//! Lossless reading and writing of MP4 audio files, with typed access to iTunes-style metadata.
//!
//! An MP4 file is parsed into a tree of [atoms](atom::Atom). Nothing is discarded along the way, so
//! serializing an unmodified tree reproduces the input byte for byte. The metadata stored in
//! `moov.udta.meta.ilst` can then be read and edited through the [`ilst`] module, or more
//! conveniently through [`Mp4File`](file::Mp4File).
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> m4atag::error::Result<()> {
//! use m4atag::config::ParseOptions;
//! use m4atag::file::Mp4File;
//!
//! let data = std::fs::read("foo.m4a")?;
//! let m4a_file = Mp4File::parse(&data, ParseOptions::new())?;
//!
//! if let Some(title) = m4a_file.title() {
//! 	println!("Title: {title}");
//! }
//!
//! if let Some((track, total)) = m4a_file.track() {
//! 	println!("Track {track} of {total}");
//! }
//!
//! for diagnostic in m4a_file.diagnostics() {
//! 	println!("Warning: {diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing metadata
//!
//! ```rust,no_run
//! # fn main() -> m4atag::error::Result<()> {
//! use m4atag::config::{ParseOptions, WriteOptions};
//! use m4atag::file::Mp4File;
//! use m4atag::ilst::{AtomIdent, MetadataValue};
//! use std::borrow::Cow;
//! use std::fs::OpenOptions;
//!
//! let mut file = OpenOptions::new().read(true).write(true).open("foo.m4a")?;
//! let mut m4a_file = Mp4File::read_from(&mut file, ParseOptions::new())?;
//!
//! // Create the `ilst` atom if the file was never tagged
//! m4a_file.set_write_options(WriteOptions::new().create_missing_containers(true));
//!
//! m4a_file.set_artist(String::from("Foo artist"))?;
//! m4a_file.set_bpm(120)?;
//!
//! // Freeform entries are supported as well
//! let mood = AtomIdent::Freeform {
//! 	mean: Cow::Borrowed("com.apple.iTunes"),
//! 	name: Cow::Borrowed("MOOD"),
//! };
//! m4a_file.set(&mood, MetadataValue::String(String::from("Happy")))?;
//!
//! m4a_file.save_to(&mut file)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with the atom tree
//!
//! ```rust
//! # fn main() -> m4atag::error::Result<()> {
//! use m4atag::atom::{self, Atom};
//! use m4atag::config::ParseOptions;
//!
//! let input = atom::serialize(&[
//! 	Atom::new(*b"ftyp", b"M4A \x00\x00\x00\x00".to_vec()),
//! 	Atom::container(*b"moov", vec![Atom::new(*b"mvhd", vec![0; 100])]),
//! ])?;
//!
//! let mut parsed = atom::parse(&input, ParseOptions::new())?;
//! assert_eq!(atom::serialize(&parsed.atoms)?, input);
//!
//! // Sizes are recomputed on every serialization
//! parsed.atoms[1].children_mut().push(Atom::new(*b"free", vec![0; 8]));
//! assert_eq!(atom::serialize(&parsed.atoms)?.len(), input.len() + 16);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod atom;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod file;
pub mod ilst;
pub(crate) mod macros;
mod util;

pub use util::io;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use m4atag::prelude::*;
	//! ```

	pub use crate::file::Mp4File;
	pub use crate::ilst::MetadataCatalogue;
	pub use crate::io::{Length, Truncate};
}
