//! In-memory storage layer.
//!
//! There is no persistence: collections live for the process and vanish
//! on exit.

pub mod collection;

pub use collection::Collection;
