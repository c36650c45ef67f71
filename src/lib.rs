pub mod config;
pub mod delete;
pub mod error;
pub mod policy;
pub mod prune;
pub mod refmap;
pub mod registry;

pub use config::PruneOptions;
pub use delete::DeletionReport;
pub use error::{PruneError, Result};
pub use refmap::ReferenceMap;

/// Run one reconciliation pass with the given options
pub async fn run_prune(options: PruneOptions) -> Result<DeletionReport> {
    prune::run_prune(options).await
}
