//! gradecalc-report — Text export, clipboard summary, and HTML result panel.

pub mod export;
pub mod html;
pub mod sink;

pub use export::ExportReport;
pub use sink::{copy_result, export_report, ExportSink, FileSink, MemorySink, Notification, StdoutSink};
