use tracing::{debug, info};

use crate::config::PruneOptions;
use crate::delete::{delete_tags, DeletionReport};
use crate::error::Result;
use crate::policy::{keep_set, kill_list};
use crate::refmap::build_reference_map;
use crate::registry::client::{Pacer, RegistryClient};

/// Reconciles the image's tag set against the keep pattern and deletes every
/// tag not transitively protected by it.
///
/// Fails fast only while the reference map is being built (nothing has been
/// mutated at that point); everything after is soft-failure territory, so a
/// returned report with failures still counts as a completed run.
pub async fn run_prune(options: PruneOptions) -> Result<DeletionReport> {
    let options = options.normalized();
    let client = RegistryClient::new(&options)?;

    let map = build_reference_map(&client, &mut Pacer::new()).await?;
    let keep = keep_set(&map, &options.pattern);
    let kill = kill_list(&map, &keep);
    debug!(kill_list = ?kill, "tags scheduled for deletion");

    let report = delete_tags(&client, &mut Pacer::new(), &kill).await;
    info!(
        kept = keep.len(),
        deleted = report.deleted.len(),
        failed = report.failed.len(),
        "prune completed"
    );

    Ok(report)
}
