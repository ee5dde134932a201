// Text layout: greedy word-wrap engine and the glyph metrics that drive it.
// The engine is pure and synchronous; async handlers run it through spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod wrap;

// Re-export the public API consumed by other modules (render, handlers).
pub use font_metrics::{default_page_config, PageConfig};
