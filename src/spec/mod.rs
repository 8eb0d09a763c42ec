//! # Spec Module
//!
//! Loading and normalization of postal code specification documents.
//!
//! A document is either a grouped family definition (for example `5Digits.json`,
//! shared by every five-digit country) or a single-country override named after
//! its two-letter code (`GB.json`). Both parse into a [`SpecDocument`] and are
//! normalized into a [`PostalCodeSpec`] before rendering.

mod load;
mod types;

pub use load::*;
pub use types::*;
