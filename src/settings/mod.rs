//! Typed settings access.
//!
//! An [`Accessor`] reads and writes settings of one Rust type through a shared
//! [`StoreHandle`](crate::storage::StoreHandle), substituting its default
//! whenever nothing usable is stored. A [`Setting`] is an accessor bound to a
//! single key, exposed through the [`Property`] trait.

pub mod accessor;
pub mod setting;

pub use accessor::{Accessor, Lookup};
pub use setting::{Property, Setting};
