//! Sort and filter picker state.
//!
//! A picker holds a pending selection seeded from the applied value. The
//! selection can be changed and reset freely; it only takes effect when the
//! caller applies it.

pub mod filter_picker;
pub mod sort_picker;

pub use filter_picker::{FilterOption, FilterPicker};
pub use sort_picker::{SortOption, SortPicker};
