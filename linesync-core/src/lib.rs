//! Bilingual line matching primitives
//!
//! This crate holds the pure decision logic used to keep a monolingual source
//! document and a bilingual target document in lockstep:
//!
//! - [`classify`]: which script(s) a line is written in
//! - [`normalize`]: the comparison key of an anchor line
//! - [`decide`]: the per-line decision bundle consumed by the sync driver
//!
//! # Example
//!
//! ```rust
//! use linesync_core::{decide, LineType};
//!
//! let decision = decide::<()>("1. First Point", "First Point", None, false);
//! assert_eq!(decision.line_type, LineType::Primary);
//! assert!(decision.lines_match);
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod decision;
pub mod key;

pub use classify::{
    classify, contains_secondary, is_secondary_char, starts_with_secondary, LineType,
};
pub use decision::{decide, MatchDecision};
pub use key::{is_primary, normalize};
