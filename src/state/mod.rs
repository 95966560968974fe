//! Actual State
//!
//! Lazily evaluated snapshots of the live filesystem, normalized into
//! content-addressed [`EntryState`] descriptors that can be compared against a
//! declared target.

pub mod actual;
pub mod entry;
pub mod hasher;
pub mod lazy;

pub use actual::ActualStateEntry;
pub use entry::{EntryState, EntryStateType};
pub use lazy::{Lazy, LazyContents, LazyLinkname};
