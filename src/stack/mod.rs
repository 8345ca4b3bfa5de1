//! Stack detection
//!
//! Turns the repository's local branch graph into the ordered ancestor
//! chain leading to the current branch.

mod detect;

pub use detect::{detect_stack, find_stack_branches};
