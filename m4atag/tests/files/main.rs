#![allow(missing_docs)]

mod atoms;
mod metadata;
