//! Dual-cursor synchronization driver
//!
//! Walks the target document one line per loop and pulls source lines only
//! when the previous target line was a translation. Anchor lines must
//! reproduce the current source line; translation lines inherit the style of
//! the last anchor. Leading tabs are collected while walking and inserted in
//! a second pass, last loop first, so earlier indices stay valid.

use crate::cursor::{Line, LineSource};
use crate::error::{EngineError, Result, SyncError};
use crate::sink::FormatSink;
use crate::style::StyleSnapshot;
use linesync_core::{decide, normalize};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Lifecycle of a synchronization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// The first source line has not been pulled yet
    AwaitingFirstSourceLine,
    /// Both streams still have lines
    Running,
    /// The source ran out of lines
    SourceExhausted,
    /// The target ran out of lines while the source still had some
    TargetExhausted,
    /// The run stopped on a mismatch or a failed tab insertion
    Failed,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SyncState::AwaitingFirstSourceLine => "awaiting first source line",
            SyncState::Running => "running",
            SyncState::SourceExhausted => "source exhausted",
            SyncState::TargetExhausted => "target exhausted",
            SyncState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// First loop whose edits are applied; earlier loops are replayed silently
    pub start_loop: usize,
    /// Run the deferred tab insertion pass
    pub insert_tabs: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            start_loop: 1,
            insert_tabs: true,
        }
    }
}

impl SyncOptions {
    /// Resume at `start_loop`
    pub fn with_start_loop(mut self, start_loop: usize) -> Self {
        self.start_loop = start_loop;
        self
    }

    /// Enable or disable the tab pass
    pub fn with_insert_tabs(mut self, insert_tabs: bool) -> Self {
        self.insert_tabs = insert_tabs;
        self
    }
}

/// Tabs inserted by the deferred pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabInsertion {
    /// Loop that queued the edit
    pub loop_id: usize,
    /// Insertion index
    pub index: i64,
    /// Number of tab characters
    pub tabs: usize,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Final state, either exhausted variant
    pub state: SyncState,
    /// Last completed loop
    pub loops: usize,
    /// Number of source lines pulled
    pub source_line: usize,
    /// Number of target lines pulled
    pub target_line: usize,
    /// Whether the last target line was a translation
    pub last_was_secondary: bool,
    /// Successful style applications
    pub styles_applied: usize,
    /// Style applications rejected by the sink
    pub styles_failed: usize,
    /// Edits made by the tab pass, in insertion order
    pub tabs_inserted: Vec<TabInsertion>,
}

/// Copies formatting from a source stream onto a target stream
///
/// # Examples
///
/// ```
/// use linesync_engine::{Document, DocumentCursor, RecordingSink, SyncOptions, Synchronizer};
///
/// let source = Document::from_plain_text("src", "Chapter One\nThe End");
/// let target = Document::from_plain_text("tgt", "Chapter One\n第一章\nThe End");
///
/// let mut sync = Synchronizer::new(RecordingSink::new(), SyncOptions::default());
/// let report = sync
///     .run(&mut DocumentCursor::new(&source), &mut DocumentCursor::new(&target))
///     .unwrap();
///
/// assert_eq!(report.loops, 3);
/// assert_eq!(report.source_line, 2);
/// ```
#[derive(Debug)]
pub struct Synchronizer<K> {
    sink: K,
    options: SyncOptions,
    state: SyncState,
}

impl<K: FormatSink> Synchronizer<K> {
    /// Synchronizer writing edits to `sink`
    pub fn new(sink: K, options: SyncOptions) -> Self {
        Self {
            sink,
            options,
            state: SyncState::AwaitingFirstSourceLine,
        }
    }

    /// Current state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Edit sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Release the edit sink
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Synchronize `target` against `source` until either stream runs out
    pub fn run<S, T>(&mut self, source: &mut S, target: &mut T) -> Result<SyncReport>
    where
        S: LineSource + ?Sized,
        T: LineSource + ?Sized,
    {
        let start_loop = self.options.start_loop;
        if start_loop == 0 {
            return Err(EngineError::InvalidStartLoop(start_loop));
        }

        self.state = SyncState::AwaitingFirstSourceLine;
        let mut report = SyncReport {
            state: self.state,
            loops: 0,
            source_line: 0,
            target_line: 0,
            last_was_secondary: false,
            styles_applied: 0,
            styles_failed: 0,
            tabs_inserted: Vec::new(),
        };

        let mut current = source.next_line();
        if current.is_some() {
            report.source_line = 1;
            self.state = SyncState::Running;
        } else {
            warn!("source document has no lines");
            self.state = SyncState::SourceExhausted;
        }

        if start_loop > 1 {
            info!("fast-forwarding to loop {start_loop}");
        }

        let mut retained: Option<Rc<StyleSnapshot>> = None;
        let mut last_was_secondary = false;
        let mut pending: BTreeMap<usize, usize> = BTreeMap::new();
        let mut loop_id = 0;

        loop {
            loop_id += 1;
            let replay = loop_id < start_loop;

            if last_was_secondary {
                match source.next_line() {
                    Some(line) => {
                        report.source_line += 1;
                        current = Some(line);
                    }
                    None => {
                        if current.is_some() {
                            info!("source document exhausted at loop {loop_id}");
                        }
                        current = None;
                        self.state = SyncState::SourceExhausted;
                    }
                }
            }

            let Some(target_line) = target.next_line() else {
                if self.state != SyncState::SourceExhausted {
                    self.state = SyncState::TargetExhausted;
                }
                if replay {
                    warn!("document ended at loop {loop_id}, before start loop {start_loop}");
                }
                break;
            };
            report.target_line += 1;

            let source_text = current.as_ref().map_or("", |line| line.text.as_str());
            let decision = decide(
                source_text,
                &target_line.text,
                retained.as_deref(),
                last_was_secondary,
            );
            info!(
                "loop {loop_id}: target line {} ({})",
                report.target_line,
                decision.line_type.strategy_name()
            );
            debug!("loop {loop_id}: {decision:?}");

            if decision.line_type.is_translation() {
                if let (false, Some(snapshot)) = (replay, retained.clone()) {
                    if snapshot.leading_tabs > 0 {
                        pending.insert(loop_id, snapshot.leading_tabs);
                    }
                    if decision.should_follow_previous_style {
                        self.stamp(loop_id, &target_line, &snapshot, &mut report);
                    }
                }
                last_was_secondary = true;
            } else {
                let Some(source_line) = &current else {
                    return Err(self.mismatch(
                        &report,
                        source_text,
                        &target_line,
                        "source document exhausted before target anchor line",
                    ));
                };
                if !decision.lines_match {
                    return Err(self.mismatch(
                        &report,
                        source_text,
                        &target_line,
                        "line content mismatch",
                    ));
                }

                let snapshot = Rc::clone(&source_line.style);
                if !replay {
                    self.stamp(loop_id, &target_line, &snapshot, &mut report);
                    if snapshot.leading_tabs > 0 {
                        pending.insert(loop_id, snapshot.leading_tabs);
                    }
                }
                retained = Some(snapshot);
                last_was_secondary = false;
            }

            report.loops = loop_id;
        }

        report.state = self.state;
        report.last_was_secondary = last_was_secondary;

        if self.options.insert_tabs && !pending.is_empty() {
            report.tabs_inserted = self.insert_pending_tabs(target, &pending)?;
        }

        info!(
            "sync finished after {} loops ({}): {} styles applied, {} failed, {} tab edits",
            report.loops,
            report.state,
            report.styles_applied,
            report.styles_failed,
            report.tabs_inserted.len()
        );
        Ok(report)
    }

    fn stamp(
        &mut self,
        loop_id: usize,
        line: &Line,
        snapshot: &StyleSnapshot,
        report: &mut SyncReport,
    ) {
        match self.sink.apply_style(line.range, snapshot) {
            Ok(()) => report.styles_applied += 1,
            Err(error) => {
                warn!(
                    "loop {loop_id}: failed to apply style to {}: {error}",
                    line.range
                );
                report.styles_failed += 1;
            }
        }
    }

    fn mismatch(
        &mut self,
        report: &SyncReport,
        source_text: &str,
        target_line: &Line,
        cause: &str,
    ) -> EngineError {
        self.state = SyncState::Failed;
        SyncError {
            source_line: report.source_line,
            target_line: report.target_line,
            source_key: normalize(source_text),
            target_key: normalize(&target_line.text),
            cause: cause.to_string(),
        }
        .into()
    }

    /// Insert queued tabs, last loop first
    fn insert_pending_tabs<T>(
        &mut self,
        target: &mut T,
        pending: &BTreeMap<usize, usize>,
    ) -> Result<Vec<TabInsertion>>
    where
        T: LineSource + ?Sized,
    {
        target.rewind();

        let last_loop = pending.keys().next_back().copied().unwrap_or(0);
        let mut starts: BTreeMap<usize, i64> = BTreeMap::new();
        for loop_id in 1..=last_loop {
            let Some(line) = target.next_line() else {
                break;
            };
            if pending.contains_key(&loop_id) {
                starts.insert(loop_id, line.start_index);
            }
        }

        let mut inserted = Vec::with_capacity(pending.len());
        for (&loop_id, &tabs) in pending.iter().rev() {
            let Some(&index) = starts.get(&loop_id) else {
                warn!("loop {loop_id}: target line not found for tab insertion");
                continue;
            };
            if let Err(source) = self.sink.insert_text(index, &"\t".repeat(tabs)) {
                self.state = SyncState::Failed;
                return Err(EngineError::TabInsertion { loop_id, source });
            }
            debug!("loop {loop_id}: inserted {tabs} tabs at {index}");
            inserted.push(TabInsertion {
                loop_id,
                index,
                tabs,
            });
        }
        Ok(inserted)
    }
}
