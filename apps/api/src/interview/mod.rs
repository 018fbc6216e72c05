// Résumé-to-interview pipeline.
// Extraction and inference live in their own top-level modules; everything that knows
// about interview artifacts is here.

pub mod convention;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod retrieval;
pub mod store;
