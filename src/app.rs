//! Application State
//!
//! Explicit state for one editing session: the current project, edited
//! contents, selection, folder expansion, and user-facing notices. Every
//! user action is a transition method, so the whole flow is testable
//! without a rendering surface.

pub mod notice;
pub mod state;

pub use notice::{Notice, NoticeLevel};
pub use state::{AppState, Disposition, RequestTicket};
