//! iTunes-style metadata stored in `moov.udta.meta.ilst`
//!
//! Each child of the `ilst` atom is an entry, identified by its FOURCC (or, for freeform entries,
//! a `mean` and `name` pair). An entry holds a single `data` atom:
//!
//! ```text
//! ┌──────────┬────────┬──────────────────┬────────────┬───────┐
//! │ size u32 │ "data" │ type indicator   │ locale u32 │ value │
//! │          │        │ (type set + u24) │ (0)        │       │
//! └──────────┴────────┴──────────────────┴────────────┴───────┘
//! ```
//!
//! This module only works on the atom tree (see [`atom`](crate::atom)), it never touches raw bytes
//! outside of the `data` payloads. For a more convenient interface, see [`Mp4File`](crate::file::Mp4File).

mod catalogue;
pub mod constants;
mod data_type;
mod ident;
mod locate;
mod read;
mod value;
mod write;

pub use catalogue::{MetadataCatalogue, StandardCatalogue};
pub use data_type::DataType;
pub use ident::AtomIdent;
pub use locate::{ensure_metadata_container, entry_ident, find_entry, find_metadata_container};
pub use read::{check_identifiers, decode};
pub use value::{MetadataValue, ValueShape};
pub use write::{remove, upsert};
