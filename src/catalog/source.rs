use super::auth::Credential;
use crate::error::Result;
use crate::store::types::Picture;

use std::future::Future;

/// Where a [`PictureStore`](crate::store::memory::PictureStore) pulls its data from.
///
/// [`CatalogFetcher`](super::fetcher::CatalogFetcher) is the production
/// implementation; tests substitute an in-memory catalog.
pub trait CatalogSource: Send + Sync {
    /// Acquires the credential used for one synchronization pass.
    fn authenticate(&self) -> impl Future<Output = Result<Credential>> + Send;

    /// Every id the remote currently lists, in page order.
    ///
    /// A failed page truncates the listing instead of failing the call.
    fn list_all_ids(
        &self,
        credential: &mut Credential,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// The detail record for `id`, or `None` if it could not be fetched.
    fn fetch_detail(
        &self,
        id: &str,
        credential: &mut Credential,
    ) -> impl Future<Output = Result<Option<Picture>>> + Send;
}
