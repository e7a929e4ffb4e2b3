//! brisk-buffers — growable output buffers for the brisk codec crates.

mod writer;

pub use writer::Writer;
