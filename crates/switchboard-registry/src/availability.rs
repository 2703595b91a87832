//! Environment-dependent availability filtering.
//!
//! Each descriptor's `is_available` hook runs concurrently; a predicate that
//! fails counts as unavailable rather than aborting the listing. Table order
//! is preserved in the result.

use tokio::task::JoinSet;
use tracing::warn;

use crate::descriptor::ProviderDescriptor;

/// Filter `descriptors` down to those whose availability predicate resolves
/// true, preserving the input order.
pub async fn filter_available(descriptors: &[ProviderDescriptor]) -> Vec<ProviderDescriptor> {
    let mut set = JoinSet::new();
    for (idx, descriptor) in descriptors.iter().enumerate() {
        let descriptor = descriptor.clone();
        set.spawn(async move {
            let available = match descriptor.adapter.is_available().await {
                Ok(available) => available,
                Err(e) => {
                    warn!(provider = descriptor.id, error = %e, "availability check failed");
                    false
                }
            };
            (idx, descriptor, available)
        });
    }

    let mut kept = Vec::new();
    while let Some(joined) = set.join_next().await {
        if let Ok((idx, descriptor, true)) = joined {
            kept.push((idx, descriptor));
        }
    }
    kept.sort_by_key(|(idx, _)| *idx);
    kept.into_iter().map(|(_, descriptor)| descriptor).collect()
}
