//! Interactive fuzzy finder for habits.
//!
//! Used by commands that take a habit id when the id is omitted.

mod picker;

pub use picker::pick_habit;
