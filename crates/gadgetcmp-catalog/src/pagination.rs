//! Page-number pagination over the catalog API's JSON envelopes.
//!
//! The API is not consistent about where it puts the record array or how it
//! signals the last page, so several shapes are accepted:
//!
//! ```text
//! [ {...}, {...} ]
//! { "data": [...], "hasNextPage": true }
//! { "products": [...], "pagination": { "page": 1, "totalPages": 4 } }
//! { "data": { "products": [...] }, "meta": { "has_more": false } }
//! ```

use serde_json::Value;

use crate::extract::lookup;

/// Where the record array may live, in lookup order.
const RECORD_PATHS: &[&str] = &["data.products", "data", "products", "items", "results"];

/// Objects that may carry paging metadata besides the envelope itself.
const META_PATHS: &[&str] = &["pagination", "meta", "data"];

const HAS_NEXT_KEYS: &[&str] = &["hasNextPage", "has_next_page", "hasMore", "has_more"];
const TOTAL_PAGES_KEYS: &[&str] = &["totalPages", "total_pages", "pages"];

/// The record array of a response body, or `None` when the body has no
/// recognizable array.
#[must_use]
pub fn extract_records(body: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = body {
        return Some(items);
    }
    RECORD_PATHS
        .iter()
        .find_map(|path| lookup(body, path).and_then(Value::as_array))
}

/// Decides whether another page should be requested after `page`
/// (1-based) returned `received` records.
///
/// Explicit flags win, then a total page count, then a short page.
#[must_use]
pub fn has_next_page(body: &Value, page: u32, received: usize, page_size: u32) -> bool {
    if received == 0 {
        return false;
    }
    if let Some(flag) = meta_value(body, HAS_NEXT_KEYS).and_then(Value::as_bool) {
        return flag;
    }
    if let Some(total) = meta_value(body, TOTAL_PAGES_KEYS).and_then(Value::as_u64) {
        return u64::from(page) < total;
    }
    if body.is_array() || extract_records(body).is_some() {
        return usize::try_from(page_size).is_ok_and(|size| received >= size);
    }
    false
}

fn meta_value<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let containers = std::iter::once(body).chain(META_PATHS.iter().filter_map(|p| body.get(*p)));
    for container in containers {
        if let Some(found) = keys.iter().find_map(|k| container.get(*k)) {
            return Some(found);
        }
    }
    None
}
