//! Patron status reports.
//!
//! The [`ReportAssembler`] reads loan history from the record store and
//! prices every record with the fee schedule, producing a serializable
//! [`PatronStatusReport`]. The [`exporters`] module renders any
//! [`ReportData`] as CSV or Markdown for circulation-desk printouts.

pub mod assembler;
pub mod exporters;

pub use assembler::{LoanLine, PatronStatusReport, ReportAssembler};
pub use exporters::{CsvExporter, MarkdownExporter, ReportData, ReportExporter};
