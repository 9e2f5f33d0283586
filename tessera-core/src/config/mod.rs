//! Configuration types
//!
//! Panel description parsed from TOML or restored from postcard binary data.

#[cfg(feature = "serde")]
pub mod store;
pub mod toml;
pub mod types;

pub use types::*;
