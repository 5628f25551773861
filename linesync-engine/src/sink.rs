//! Edit sinks
//!
//! The synchronizer never edits a document directly. It hands every style
//! application and text insertion to a [`FormatSink`].

use crate::document::TextRange;
use crate::error::SinkError;
use crate::request::Request;
use crate::style::StyleSnapshot;

/// Destination of formatting edits
pub trait FormatSink {
    /// Stamp `snapshot` onto `range`
    fn apply_style(&mut self, range: TextRange, snapshot: &StyleSnapshot)
        -> Result<(), SinkError>;

    /// Insert `text` at `index`
    fn insert_text(&mut self, index: i64, text: &str) -> Result<(), SinkError>;
}

impl<K: FormatSink + ?Sized> FormatSink for &mut K {
    fn apply_style(
        &mut self,
        range: TextRange,
        snapshot: &StyleSnapshot,
    ) -> Result<(), SinkError> {
        (**self).apply_style(range, snapshot)
    }

    fn insert_text(&mut self, index: i64, text: &str) -> Result<(), SinkError> {
        (**self).insert_text(index, text)
    }
}

/// Sink that records requests instead of applying them
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    requests: Vec<Request>,
}

impl RecordingSink {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests recorded so far
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Take ownership of the recorded requests
    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}

impl FormatSink for RecordingSink {
    fn apply_style(
        &mut self,
        range: TextRange,
        snapshot: &StyleSnapshot,
    ) -> Result<(), SinkError> {
        self.requests.extend(snapshot.to_requests(range));
        Ok(())
    }

    fn insert_text(&mut self, index: i64, text: &str) -> Result<(), SinkError> {
        self.requests.push(Request::insert_text(index, text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_collects_requests() {
        let mut sink = RecordingSink::new();
        let snapshot = StyleSnapshot {
            bold: true,
            ..StyleSnapshot::default()
        };

        sink.apply_style(TextRange::new(1, 6), &snapshot).unwrap();
        sink.apply_style(TextRange::new(6, 9), &StyleSnapshot::default())
            .unwrap();
        sink.insert_text(6, "\t").unwrap();

        let kinds: Vec<_> = sink.requests().iter().map(Request::kind).collect();
        assert_eq!(kinds, vec!["updateTextStyle", "insertText"]);
    }

    #[test]
    fn test_sink_through_mutable_reference() {
        fn insert<K: FormatSink>(mut sink: K) {
            sink.insert_text(1, "x").unwrap();
        }

        let mut sink = RecordingSink::new();
        insert(&mut sink);
        assert_eq!(sink.into_requests().len(), 1);
    }
}
