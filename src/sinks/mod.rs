//! Reporting and visualization sink implementations

pub mod console;
pub mod gallery;
pub mod json;

use crate::sink::ReportSink;
use std::io::Write;

pub use console::ConsoleReport;
pub use gallery::GallerySink;
pub use json::JsonReport;

/// Pick the report format for `out`
pub fn report_sink<W: Write + 'static>(json: bool, out: W) -> Box<dyn ReportSink> {
    if json {
        Box::new(JsonReport::new(out))
    } else {
        Box::new(ConsoleReport::new(out))
    }
}
