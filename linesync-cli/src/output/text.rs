//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use linesync_engine::{LineReport, Request, StyleSnapshot, SyncReport};
use std::io::{self, Write};

/// Plain text formatter
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_style(&mut self, style: &StyleSnapshot) -> io::Result<()> {
        let w = &mut self.writer;

        if let Some(alignment) = style.alignment {
            writeln!(w, "Alignment: {alignment}")?;
        }
        if let Some(indent) = style.first_line_indent {
            writeln!(w, "First Line Indent: {indent:.1} pt")?;
        }
        if let Some(indent) = style.left_indent {
            writeln!(w, "Left Indent: {indent:.1} pt")?;
        }
        if let Some(indent) = style.right_indent {
            writeln!(w, "Right Indent: {indent:.1} pt")?;
        }
        match &style.bullet {
            Some(bullet) => {
                writeln!(w, "Bullet: Yes")?;
                if !bullet.list_id.is_empty() {
                    writeln!(w, "List ID: {}", bullet.list_id)?;
                }
                writeln!(w, "Nesting Level: {}", bullet.nesting_level)?;
            }
            None => writeln!(w, "Bullet: No")?,
        }
        if style.leading_tabs > 0 {
            writeln!(w, "Leading Tabs: {}", style.leading_tabs)?;
        }

        if let Some(family) = &style.font_family {
            writeln!(w, "Font: {family}")?;
        }
        if let Some(size) = style.font_size {
            writeln!(w, "Font Size: {size:.1} pt")?;
        }
        writeln!(w, "Bold: {}", yes_no(style.bold))?;
        writeln!(w, "Italic: {}", yes_no(style.italic))?;
        writeln!(w, "Underline: {}", yes_no(style.underline))?;
        if let Some(rgb) = style.color {
            writeln!(
                w,
                "Text Color: RGB({:.0}, {:.0}, {:.0})",
                rgb.red, rgb.green, rgb.blue
            )?;
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn sync_report(&mut self, report: &SyncReport) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "Sync finished: {}", report.state)?;
        writeln!(w, "  Loops:           {}", report.loops)?;
        writeln!(w, "  Source lines:    {}", report.source_line)?;
        writeln!(w, "  Target lines:    {}", report.target_line)?;
        writeln!(w, "  Styles applied:  {}", report.styles_applied)?;
        if report.styles_failed > 0 {
            writeln!(w, "  Styles failed:   {}", report.styles_failed)?;
        }
        writeln!(w, "  Tab edits:       {}", report.tabs_inserted.len())?;
        Ok(())
    }

    fn line_reports(&mut self, lines: &[LineReport]) -> Result<()> {
        if lines.is_empty() {
            writeln!(self.writer, "No text lines found.")?;
            return Ok(());
        }

        for line in lines {
            writeln!(self.writer, "=== LINE {} ===", line.number)?;
            writeln!(self.writer, "Text: {}", line.text)?;
            writeln!(self.writer, "Type: {}", line.line_type.strategy_name())?;
            writeln!(self.writer, "Range: {}", line.range)?;
            self.write_style(&line.style)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn requests(&mut self, requests: &[Request]) -> Result<()> {
        for (i, request) in requests.iter().enumerate() {
            let detail = match request {
                Request::UpdateParagraphStyle(update) => {
                    format!("{} fields={}", update.range, update.fields)
                }
                Request::UpdateTextStyle(update) => {
                    format!("{} fields={}", update.range, update.fields)
                }
                Request::InsertText(insert) => {
                    format!("@{} {:?}", insert.location.index, insert.text)
                }
                Request::DeleteContentRange(delete) => delete.range.to_string(),
                Request::CreateParagraphBullets(create) => {
                    format!("{} preset={}", create.range, create.bullet_preset)
                }
            };
            writeln!(self.writer, "{:>4}. {} {}", i + 1, request.kind(), detail)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linesync_engine::{inspect, Document, TextRange};

    #[test]
    fn test_line_report_blocks() {
        let doc = Document::from_plain_text("doc", "Heritage\n遗产");
        let mut formatter = TextFormatter::new(Vec::new());

        formatter.line_reports(&inspect(&doc, 10)).unwrap();
        let output = String::from_utf8(formatter.into_inner()).unwrap();

        assert!(output.contains("=== LINE 1 ===\nText: Heritage\nType: primary_match\n"));
        assert!(output.contains("=== LINE 2 ===\nText: 遗产\nType: secondary_translation\n"));
        assert!(output.contains("Bullet: No\n"));
        assert!(output.contains("Bold: No\n"));
    }

    #[test]
    fn test_empty_line_report() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.line_reports(&[]).unwrap();
        assert_eq!(
            String::from_utf8(formatter.into_inner()).unwrap(),
            "No text lines found.\n"
        );
    }

    #[test]
    fn test_requests_listing() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter
            .requests(&[
                Request::insert_text(5, "\t"),
                Request::delete_range(TextRange::new(3, 4)),
            ])
            .unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(
            output,
            "   1. insertText @5 \"\\t\"\n   2. deleteContentRange [3,4)\n"
        );
    }
}
