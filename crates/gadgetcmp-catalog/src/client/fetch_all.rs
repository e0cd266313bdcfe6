//! Multi-page fetch loop for `CatalogClient`.

use gadgetcmp_core::{Category, RawRecord};

use crate::error::CatalogError;

use super::CatalogClient;
use super::MAX_PAGES;

impl CatalogClient {
    /// Fetches every record of `category`, following pages until the API
    /// signals the last one.
    ///
    /// All-or-nothing: a failing page discards the records already fetched,
    /// since a partial batch would replace the full snapshot downstream.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`]. Returns
    /// [`CatalogError::PaginationLimit`] past [`MAX_PAGES`] pages.
    pub async fn fetch_category(
        &self,
        category: Category,
        page_size: u32,
    ) -> Result<Vec<RawRecord>, CatalogError> {
        let page_size = page_size.max(1);
        let mut records: Vec<RawRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if usize::try_from(page).map_or(true, |p| p > MAX_PAGES) {
                return Err(CatalogError::PaginationLimit {
                    url: self.base_url.to_string(),
                    max_pages: MAX_PAGES,
                });
            }

            let batch = self.fetch_page(category, page, page_size).await?;
            records.extend(batch.records);
            if !batch.has_next {
                break;
            }
            page += 1;
        }

        tracing::info!(%category, count = records.len(), pages = page, "fetched category");
        Ok(records)
    }
}
