//! verbdrill-report — renders drill sessions as HTML table markup.

pub mod html;

pub use html::{generate_html, write_html_report};
