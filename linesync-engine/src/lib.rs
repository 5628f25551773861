//! Formatting synchronization for bilingual documents
//!
//! This crate provides the document model, line cursors, batch edit requests
//! and the dual-cursor driver that copies formatting from a monolingual source
//! document onto a bilingual target document.

#![warn(missing_docs)]

pub mod cursor;
pub mod document;
pub mod editor;
pub mod error;
pub mod inspect;
pub mod maintenance;
pub mod request;
pub mod sink;
pub mod style;
pub mod sync;

// Re-export key types
pub use cursor::{DocumentCursor, Line, LineSource};
pub use document::{Document, Paragraph, TextRange};
pub use editor::DocumentEditor;
pub use error::{EngineError, Result, SinkError, SyncError};
pub use inspect::{inspect, LineReport};
pub use maintenance::MaintenancePass;
pub use request::Request;
pub use sink::{FormatSink, RecordingSink};
pub use style::StyleSnapshot;
pub use sync::{SyncOptions, SyncReport, SyncState, Synchronizer, TabInsertion};

// Re-export from core for convenience
pub use linesync_core::{classify, decide, normalize, LineType, MatchDecision};
