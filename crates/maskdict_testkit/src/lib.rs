//! # maskdict testkit
//!
//! Test utilities for maskdict.
//!
//! This crate provides:
//! - Temporary dictionary fixtures
//! - Property-based test generators using proptest
//! - Canned word lists
//!
//! ## Usage
//!
//! ```rust
//! use maskdict_testkit::prelude::*;
//!
//! let dict = TestDictionary::build("abc", &["ab", "ba", "abc"]);
//! assert_eq!(dict.manifest.count.kept_unique_letter_words, 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
