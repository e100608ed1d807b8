//! Library components of the `smudge` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod summary;
