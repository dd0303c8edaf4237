//! Worker pool reconciliation

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::provider::CloudProvider;

use super::{merge_common, Reconciliation};

/// Merge every worker pool from the provisioning output into the cluster.
///
/// Pools are visited in name order. Each pool is found by name or appended,
/// then run through the provider adapter selected by the cluster's cloud
/// provider and the common field merger.
///
/// A pool whose raw document list does not hold exactly one entry is skipped
/// with a warning. The provider is only resolved when at least one pool is
/// merged.
pub(super) fn reconcile_workers(
    cluster: &mut Cluster,
    workers: &BTreeMap<String, Vec<JsonValue>>,
    report: &mut Reconciliation,
) -> Result<()> {
    let mut pending = Vec::new();
    for (name, docs) in workers {
        match docs.as_slice() {
            [raw] => pending.push((name, raw)),
            _ => {
                warn!(
                    "Skipping workerset '{}': expected exactly 1 document, found {}",
                    name,
                    docs.len()
                );
                report.skipped.push(name.clone());
            }
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    let provider: CloudProvider = cluster.cloud_provider.name.parse()?;
    debug!("Reconciling {} workersets for provider {}", pending.len(), provider);

    for (name, raw) in pending {
        let (worker, created) = cluster.worker_mut_or_insert(name);

        let inserted = provider
            .apply(worker, raw)
            .map_err(|e| wrap(name, "provider-specific", e))?;

        merge_common(worker, raw).map_err(|e| wrap(name, "common", e))?;

        if created {
            info!("Created workerset '{}'", name);
            report.created.push(name.clone());
        } else {
            info!("Updated workerset '{}'", name);
            report.updated.push(name.clone());
        }
        report.inserted_flags.insert(name.clone(), inserted);
    }

    Ok(())
}

fn wrap(pool: &str, stage: &'static str, source: Error) -> Error {
    Error::WorkerPool {
        pool: pool.to_string(),
        stage,
        source: Box::new(source),
    }
}
