//! Command-level tests for the promptsite CLI.

mod cli;
