//! HTML output. Everything user-supplied is escaped here, at insertion time.

pub mod html;

pub use html::{ReportOptions, render_schema_report};
