//! stackup - submit stacked git branches as chained pull requests
//!
//! Detects which local branches form an ancestor chain leading to the
//! current branch, pushes them, and opens one pull request per branch,
//! each targeting the previous branch in the stack.

pub mod auth;
pub mod error;
pub mod git;
pub mod platform;
pub mod process;
pub mod stack;
pub mod submit;
pub mod types;
