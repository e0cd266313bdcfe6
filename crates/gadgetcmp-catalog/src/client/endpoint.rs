//! Catalog API URL construction.

use reqwest::Url;

use gadgetcmp_core::Category;

use crate::error::CatalogError;

/// Parses `base_url` and gives it a trailing slash so relative joins append
/// to its path instead of replacing the last segment.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidBaseUrl`] when the URL does not parse or
/// is not http(s).
pub fn normalize_base_url(base_url: &str) -> Result<Url, CatalogError> {
    let trimmed = base_url.trim();
    let invalid = |reason: String| CatalogError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub(super) fn join(base: &Url, path: &str) -> Result<Url, CatalogError> {
    base.join(path).map_err(|e| CatalogError::InvalidBaseUrl {
        base_url: base.to_string(),
        reason: format!("cannot append \"{path}\": {e}"),
    })
}

/// `{base}/{category path}?page=N&limit=M`.
pub(super) fn category_url(
    base: &Url,
    category: Category,
    page: u32,
    limit: u32,
) -> Result<Url, CatalogError> {
    let mut url = join(base, category.api_path())?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    Ok(url)
}
