// Article analysis: classification, then explanation and web verification.
// Explanation and search run concurrently and degrade instead of failing the analysis.

pub mod handlers;
pub mod pipeline;
