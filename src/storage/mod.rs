//! Storage layer module.
//!
//! This module provides the trait-based backend abstraction and the handle
//! that owns a backend for the lifetime of the application.

pub mod factory;
pub mod file;
pub mod handle;
pub mod memory;
pub mod traits;

pub use factory::create_backend;
pub use file::FileBackend;
pub use handle::StoreHandle;
pub use memory::MemoryBackend;
pub use traits::{Backend, DynBackend};
