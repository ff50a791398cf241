//! promptsite: prompt-to-website generation with sandboxed preview and zip export.
//!
//! A project is an ordered set of generated files plus an entry HTML
//! document. Projects come from a local completion endpoint (or a built-in
//! demo when that fails), are browsed as a folder tree, composed into one
//! self-contained preview document, and packaged as a zip archive.

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod logging;
pub mod preview;
pub mod templates;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod workspace;
