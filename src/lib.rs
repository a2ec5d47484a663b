//! qtc — compiles tag-annotated templates into streaming Go code.

pub mod cli;
pub mod config;
pub mod generate;
pub mod template;
