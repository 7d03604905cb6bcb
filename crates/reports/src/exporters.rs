//! Tabular renderers for reports.
//!
//! Anything that can describe itself as a titled table with a summary
//! block implements [`ReportData`]; exporters turn that into a flat
//! string for printing or download. JSON output goes through serde on
//! the report type itself, so there is no JSON exporter here.

use std::fmt::Write;

/// Tabular view of a report.
pub trait ReportData {
    fn title(&self) -> &str;
    fn headers(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;
    /// Key/value pairs shown above the table. Empty means no summary.
    fn summary(&self) -> Vec<(String, String)>;
}

/// Renders a [`ReportData`] into one output format.
pub trait ReportExporter {
    fn export(&self, report: &dyn ReportData) -> String;
    fn extension(&self) -> &'static str;
    fn mime_type(&self) -> &'static str;
}

/// CSV renderer.
///
/// Fields containing the delimiter, a quote, or a newline are quoted,
/// with embedded quotes doubled. The summary block is not emitted;
/// CSV output is the table alone.
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn field(&self, raw: &str) -> String {
        let must_quote =
            raw.contains(self.delimiter) || raw.contains('"') || raw.contains('\n');
        if must_quote {
            format!("\"{}\"", raw.replace('"', "\"\""))
        } else {
            raw.to_string()
        }
    }

    fn line(&self, cells: &[String]) -> String {
        cells
            .iter()
            .map(|c| self.field(c))
            .collect::<Vec<_>>()
            .join(&self.delimiter.to_string())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut lines = Vec::new();
        if self.include_header {
            lines.push(self.line(&report.headers()));
        }
        for row in report.rows() {
            lines.push(self.line(&row));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

/// Markdown renderer: title heading, summary bullets, then the table.
pub struct MarkdownExporter {
    include_summary: bool,
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self {
            include_summary: true,
        }
    }

    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }

    fn table_row(cells: &[String]) -> String {
        format!("| {} |", cells.join(" | "))
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut out = String::new();
        // writeln! into a String cannot fail
        let _ = writeln!(out, "# {}\n", report.title());

        let summary = report.summary();
        if self.include_summary && !summary.is_empty() {
            let _ = writeln!(out, "## Summary\n");
            for (key, value) in summary {
                let _ = writeln!(out, "- **{key}**: {value}");
            }
            let _ = writeln!(out);
        }

        let headers = report.headers();
        let _ = writeln!(out, "## Loans\n");
        let _ = writeln!(out, "{}", Self::table_row(&headers));
        let separator: Vec<String> = headers.iter().map(|_| "---".to_string()).collect();
        let _ = writeln!(out, "{}", Self::table_row(&separator));
        for row in report.rows() {
            let _ = writeln!(out, "{}", Self::table_row(&row));
        }
        out
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }
}
