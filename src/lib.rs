//! # drive-mirror
//!
//! Recursively mirrors a Google Drive folder tree onto the local filesystem.
//! Directory structure is preserved, files that already exist locally are
//! skipped, and directories or files can be excluded by name or by glob
//! pattern matched against destination path segments.
//!
//! ## Core Components
//!
//! - [`mirror`]: depth-first tree mirror
//! - [`exclude`]: ordered exclusion rules
//! - [`drive`]: remote listing/download capability and the Drive v2 client
//! - [`config`]: layered configuration
//! - [`cli`]: command-line flags
//! - [`error`]: structural error taxonomy

pub mod cli;
pub mod config;
pub mod drive;
pub mod error;
pub mod exclude;
pub mod mirror;

#[cfg(test)]
mod tests;
