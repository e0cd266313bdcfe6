use super::*;

#[test]
fn base_url_gains_trailing_slash() {
    let url = normalize_base_url("http://localhost:5000/api").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/api/");
}

#[test]
fn base_url_drops_query_and_fragment() {
    let url = normalize_base_url("https://catalog.example.com/api/?debug=1#top").unwrap();
    assert_eq!(url.as_str(), "https://catalog.example.com/api/");
}

#[test]
fn base_url_rejects_garbage() {
    let err = normalize_base_url("not-a-url").unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn base_url_rejects_non_http_schemes() {
    let err = normalize_base_url("ftp://catalog.example.com/api").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
}

#[test]
fn category_url_appends_path_and_paging() {
    let base = normalize_base_url("http://localhost:5000/api").unwrap();
    let url = endpoint::category_url(&base, Category::HomeAppliance, 2, 50).unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:5000/api/home-appliances?page=2&limit=50"
    );
}

#[test]
fn stores_url_is_relative_to_base() {
    let base = normalize_base_url("https://catalog.example.com/v1/").unwrap();
    let url = endpoint::join(&base, "stores").unwrap();
    assert_eq!(url.as_str(), "https://catalog.example.com/v1/stores");
}

#[test]
fn client_keeps_normalized_base() {
    let client =
        CatalogClient::new("http://localhost:5000/api", 5, "gadgetcmp-test", 0, 0).unwrap();
    assert_eq!(client.base_url(), "http://localhost:5000/api/");
}
