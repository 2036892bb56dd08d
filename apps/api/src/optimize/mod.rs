// Request orchestration for CV optimization.
// Received → Stored → Analyzed → Rendered → Cleaned → Responded; any step may exit with an error.
// All model calls go through llm_client via the analysis module.

pub mod handlers;
pub mod pipeline;
