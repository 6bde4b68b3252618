//! Application services layer.

pub mod compose;
pub mod content;
pub mod error;
pub mod page;
