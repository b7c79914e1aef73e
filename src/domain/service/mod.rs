mod business_id;
mod calling_adapter;
mod classifier;
pub mod display;
mod enricher;
mod revoke;
mod rules;

pub use business_id::BusinessIdResolver;
pub use calling_adapter::CallingMessageAdapter;
pub use classifier::{date_separator_cell, CellPipeline, PipelineOutcome};
pub use enricher::CellDataEnricher;
pub use revoke::RevokeHandler;
pub use rules::{Rule, RuleDecision, RuleOutcome};
