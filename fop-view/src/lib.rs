//! fop-view library - command-line viewer for portal list screens
//!
//! Loads a record dump, mounts one screen on the view-state bus, applies the
//! requested filters and renders the resulting list.

pub mod render;
pub mod session;

pub use render::ScreenReport;
pub use session::{derive_report, load_records, Session, ViewRequest};
