use super::types::{Picture, StoreStats, SyncReport};
use crate::catalog::source::CatalogSource;
use crate::error::{Error, Result};
use crate::search::index::{Field, SearchIndex};

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};
use tracing::Instrument;
use uuid::Uuid;

/// Everything a search reads: the cached pictures and the index built over them.
///
/// Never mutated once published. A synchronization pass builds the next
/// snapshot beside the current one and swaps it in.
#[derive(Debug, Default)]
pub struct Snapshot {
    pictures: BTreeMap<String, Picture>,
    index: SearchIndex,
}

impl Snapshot {
    pub fn new(pictures: BTreeMap<String, Picture>) -> Self {
        let index = SearchIndex::build(pictures.values());
        Self { pictures, index }
    }

    /// Pairs `pictures` with an index built elsewhere, without checking they agree.
    #[cfg(test)]
    pub(crate) fn from_parts(pictures: BTreeMap<String, Picture>, index: SearchIndex) -> Self {
        Self { pictures, index }
    }

    pub fn pictures(&self) -> &BTreeMap<String, Picture> {
        &self.pictures
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Ranked pictures for `query`. See [`PictureStore::search`].
    pub fn search(&self, query: &str, field: Option<&str>) -> Result<Vec<Picture>> {
        let fields = Field::select(field);

        self.index
            .rank(query, &fields)
            .into_iter()
            .map(|id| {
                self.pictures
                    .get(&id)
                    .cloned()
                    .ok_or(Error::Consistency(id))
            })
            .collect()
    }
}

/// The local mirror of the remote catalog.
///
/// `synchronize` is the only mutator. Searches never touch the network and
/// never wait on a running pass: they read whichever snapshot is current.
pub struct PictureStore<S> {
    source: S,
    current: RwLock<Arc<Snapshot>>,
    sync_lock: tokio::sync::Mutex<()>,
}

impl<S: CatalogSource> PictureStore<S> {
    /// An empty store. Nothing is cached until the first `synchronize`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(Snapshot::default())),
            sync_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, next: Snapshot) {
        let next = Arc::new(next);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Brings the cache in line with the remote catalog.
    ///
    /// Lists the remote ids, drops cached pictures the remote no longer lists,
    /// fetches details only for ids not cached yet, and rebuilds the index over
    /// the result. When nothing changed the current snapshot is kept as is.
    /// Pictures whose detail fetch fails are left out until a later pass.
    ///
    /// Concurrent calls are serialized. A pass that fails (credential or
    /// transport error) publishes nothing.
    pub async fn synchronize(&self) -> Result<SyncReport> {
        let _guard = self.sync_lock.lock().await;
        let pass_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("sync", pass_id = %pass_id);

        self.run_pass(pass_id).instrument(span).await
    }

    async fn run_pass(&self, pass_id: String) -> Result<SyncReport> {
        tracing::info!("Start: Refreshing picture cache");

        let mut credential = self.source.authenticate().await?;

        let remote_ids: HashSet<String> = self
            .source
            .list_all_ids(&mut credential)
            .await?
            .into_iter()
            .collect();

        let current = self.snapshot();
        let cached_ids: HashSet<&String> = current.pictures.keys().collect();

        let mut to_add: Vec<&String> = remote_ids
            .iter()
            .filter(|id| !cached_ids.contains(id))
            .collect();
        to_add.sort();
        let to_remove: Vec<&String> = cached_ids
            .iter()
            .copied()
            .filter(|id| !remote_ids.contains(*id))
            .collect();

        let mut report = SyncReport {
            pass_id,
            listed: remote_ids.len(),
            ..SyncReport::default()
        };

        if to_add.is_empty() && to_remove.is_empty() {
            tracing::info!(
                "Finished: cache already up to date ({} pictures)",
                current.pictures.len()
            );
            return Ok(report);
        }

        let mut pictures = current.pictures.clone();
        for id in &to_remove {
            pictures.remove(*id);
        }
        report.removed = to_remove.len();

        tracing::info!("Downloading {} pictures", to_add.len());
        for (done, id) in to_add.iter().enumerate() {
            match self.source.fetch_detail(id, &mut credential).await? {
                Some(picture) => {
                    pictures.insert(picture.id.clone(), picture);
                    report.added += 1;
                }
                None => report.skipped += 1,
            }
            tracing::debug!("Downloaded {}/{}", done + 1, to_add.len());
        }

        if !credential.is_valid() {
            tracing::warn!("Credential could not be refreshed during the pass");
        }

        self.publish(Snapshot::new(pictures));
        report.reindexed = true;

        tracing::info!(
            "Finished: Refreshing picture cache (added {}, removed {}, skipped {})",
            report.added,
            report.removed,
            report.skipped
        );

        Ok(report)
    }

    /// Ranked pictures matching `query`.
    ///
    /// `field` restricts the search to one of `author`, `camera` or `tags`; any
    /// other value (or `None`) searches all three. No match is an empty list.
    ///
    /// # Errors
    /// [`Error::Consistency`] if the index refers to a picture the store does not hold.
    pub fn search(&self, query: &str, field: Option<&str>) -> Result<Vec<Picture>> {
        self.snapshot().search(query, field)
    }

    pub fn get(&self, id: &str) -> Option<Picture> {
        self.snapshot().pictures.get(id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.snapshot().pictures.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        let snapshot = self.snapshot();
        StoreStats {
            pictures: snapshot.pictures.len(),
            author_tokens: snapshot.index.token_count(Field::Author),
            camera_tokens: snapshot.index.token_count(Field::Camera),
            tag_tokens: snapshot.index.token_count(Field::Tags),
        }
    }
}
