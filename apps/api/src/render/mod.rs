// Export rendering: PDF writer, report composition, JSON export, on-disk bundles.
// PDF composition is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod bundle;
pub mod handlers;
pub mod json;
pub mod pdf;
pub mod report;
