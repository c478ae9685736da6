//! Domain models for settings.
//!
//! This module contains the value types a backend stores and the conversion
//! trait that binds them to Rust types.

pub mod scalar;

pub use scalar::{Scalar, ScalarKind, SettingValue};
