//! Tests that exercise several modules together.
//!
//! - **mirror_tests**: traversal, exclusion and idempotence of the mirror
//! - **config_tests**: configuration loading and validation
//! - **cli_tests**: flag parsing and merging over configuration
//! - **error_tests**: error messages and validation helpers
