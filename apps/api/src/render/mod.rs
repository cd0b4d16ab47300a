// Document rendering: resume record to a downloadable PDF.
// CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod document;
pub mod font_metrics;

// Re-export the public API consumed by handlers and state.
pub use document::{default_page_layout, render_resume, PageLayout};
