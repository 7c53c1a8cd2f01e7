//! Catalog Fetcher
//!
//! Walks the paginated id listing and fetches single detail records, turning
//! per-page and per-item failures into truncated or missing results rather than
//! errors. Only credential and transport failures escape.

use super::auth::{AuthenticatedClient, Credential};
use super::protocol::{PAGE_PARAM, PageResponse};
use super::source::CatalogSource;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::types::{Picture, PictureRecord};

/// Retry budget for a listing page request.
pub const LISTING_RETRIES: u32 = 1;
/// Retry budget for a detail request.
pub const DETAIL_RETRIES: u32 = 1;

pub struct CatalogFetcher {
    client: AuthenticatedClient,
    catalog_url: String,
    page_cap: u32,
}

impl CatalogFetcher {
    /// `page_cap` is the highest listing page requested per pass, regardless of
    /// how many pages the remote reports.
    pub fn new(client: AuthenticatedClient, catalog_url: &str, page_cap: u32) -> Self {
        Self {
            client,
            catalog_url: catalog_url.trim_end_matches('/').to_string(),
            page_cap,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = AuthenticatedClient::new(
            &config.auth_url,
            &config.api_key,
            config.request_timeout(),
        )?;
        Ok(Self::new(client, &config.catalog_url, config.page_cap))
    }

    fn detail_url(&self, id: &str) -> String {
        format!("{}/{}", self.catalog_url, id)
    }

    async fn fetch_page(&self, page: u32, credential: &mut Credential) -> Result<PageResponse> {
        let response = self
            .client
            .get_with_retry(
                &self.catalog_url,
                credential,
                LISTING_RETRIES,
                &[(PAGE_PARAM, page.to_string())],
            )
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::RemoteUnavailable(format!(
                "listing page {} answered {}",
                page,
                response.status()
            )));
        }

        response
            .json::<PageResponse>()
            .await
            .map_err(|e| {
                Error::RemoteUnavailable(format!("listing page {} unreadable: {}", page, e))
            })
    }

    /// Ids of every listed picture, page by page, up to the page cap.
    ///
    /// A page that fails ends the walk; the ids gathered so far are returned.
    pub async fn list_all_ids(&self, credential: &mut Credential) -> Result<Vec<String>> {
        let mut current_page = 1u32;
        let mut picture_ids = Vec::new();

        loop {
            let page = match self.fetch_page(current_page, credential).await {
                Ok(page) => page,
                Err(Error::RemoteUnavailable(reason)) => {
                    tracing::warn!("Listing truncated at page {}: {}", current_page, reason);
                    break;
                }
                Err(e) => return Err(e),
            };

            tracing::info!(
                "Fetched picture ids page {} out of {} ({} pictures)",
                page.page,
                page.page_count,
                page.pictures.len()
            );

            picture_ids.extend(
                page.pictures
                    .into_iter()
                    .filter_map(|summary| summary.id)
                    .filter(|id| !id.is_empty()),
            );

            // never step backwards, even if the remote echoes a stale page number
            let Some(next_page) = page.page.max(current_page).checked_add(1) else {
                tracing::warn!("Listing reported page {}, stopping", page.page);
                break;
            };
            if !page.has_more || next_page > self.page_cap {
                break;
            }
            current_page = next_page;
        }

        Ok(picture_ids)
    }

    /// The picture behind `id`, or `None` if the remote does not deliver it.
    pub async fn fetch_detail(
        &self,
        id: &str,
        credential: &mut Credential,
    ) -> Result<Option<Picture>> {
        let response = self
            .client
            .get_with_retry(&self.detail_url(id), credential, DETAIL_RETRIES, &[])
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::debug!("Detail for {} unavailable: {}", id, response.status());
            return Ok(None);
        }

        let record: PictureRecord = match response.json().await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Detail for {} unreadable: {}", id, e);
                return Ok(None);
            }
        };

        match Picture::from_record(record) {
            Some(picture) if picture.id == id => Ok(Some(picture)),
            Some(picture) => {
                tracing::warn!("Detail for {} came back as {}, skipping", id, picture.id);
                Ok(None)
            }
            None => {
                tracing::warn!("Detail for {} has no id, skipping", id);
                Ok(None)
            }
        }
    }
}

impl CatalogSource for CatalogFetcher {
    async fn authenticate(&self) -> Result<Credential> {
        self.client.authenticate().await
    }

    async fn list_all_ids(&self, credential: &mut Credential) -> Result<Vec<String>> {
        CatalogFetcher::list_all_ids(self, credential).await
    }

    async fn fetch_detail(&self, id: &str, credential: &mut Credential) -> Result<Option<Picture>> {
        CatalogFetcher::fetch_detail(self, id, credential).await
    }
}
