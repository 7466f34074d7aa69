//! Small shared helpers.

pub mod process_guard;
pub mod text;
