//! Scheduled Refresh
//!
//! Re-runs `synchronize` on a fixed interval. A failed pass is logged and the
//! schedule carries on; the previous snapshot keeps serving searches meanwhile.

use super::memory::PictureStore;
use crate::catalog::source::CatalogSource;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Spawns the refresh loop. The first pass runs one `every` after the call,
/// since the startup pass is expected to have run already.
pub fn spawn_refresh_loop<S>(
    store: Arc<PictureStore<S>>,
    every: Duration,
) -> tokio::task::JoinHandle<()>
where
    S: CatalogSource + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match store.synchronize().await {
                Ok(report) => {
                    tracing::info!(
                        "Scheduled refresh {} done: {} pictures cached",
                        report.pass_id,
                        store.len()
                    );
                }
                Err(e) => {
                    tracing::error!("Scheduled refresh failed, retrying next cycle: {}", e);
                }
            }
        }
    })
}
