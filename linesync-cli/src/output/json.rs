//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use linesync_engine::{LineReport, Request, SyncReport};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - one JSON value per call
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn sync_report(&mut self, report: &SyncReport) -> Result<()> {
        self.write_value(report)
    }

    fn line_reports(&mut self, lines: &[LineReport]) -> Result<()> {
        self.write_value(lines)
    }

    fn requests(&mut self, requests: &[Request]) -> Result<()> {
        self.write_value(&serde_json::json!({ "requests": requests }))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linesync_engine::{inspect, Document};

    #[test]
    fn test_line_reports_json() {
        let doc = Document::from_plain_text("doc", "Heritage 遗产");
        let mut formatter = JsonFormatter::new(Vec::new(), false);
        formatter.line_reports(&inspect(&doc, 10)).unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["number"], 1);
        assert_eq!(value[0]["line_type"], "mixed");
        assert_eq!(value[0]["range"]["startIndex"], 1);
        assert_eq!(value[0]["style"]["bold"], false);
    }

    #[test]
    fn test_requests_batch_shape() {
        let mut formatter = JsonFormatter::new(Vec::new(), true);
        formatter
            .requests(&[Request::insert_text(3, "\n")])
            .unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["requests"][0]["insertText"]["location"]["index"], 3);
    }
}
