//! Live Preview
//!
//! Composes the entry document of a project into one self-contained HTML
//! string by inlining referenced stylesheets and scripts, and hosts it on a
//! sandboxed surface. Composition failures never reach the caller: they are
//! turned into a fixed placeholder document.

pub mod composer;
pub mod placeholder;
pub mod surface;

pub use composer::{compose, render, SCRIPT_EXTENSIONS, STYLESHEET_EXTENSIONS};
pub use placeholder::{error_document, PREVIEW_ERROR_MESSAGE};
pub use surface::{PreviewSurface, SANDBOX_POLICY};
