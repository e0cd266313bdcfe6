use std::path::Path;

use super::*;

fn store(id: &str, name: &str, aliases: &[&str]) -> StoreInfo {
    StoreInfo {
        id: id.to_string(),
        name: name.to_string(),
        logo_url: Some(format!("https://cdn.example.com/{id}.png")),
        status: StoreStatus::Active,
        aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
    }
}

#[test]
fn lookup_ignores_case_and_whitespace() {
    let directory = StoreDirectory::from_stores(vec![store("rd", "Reliance Digital", &[])]);
    let found = directory.lookup("  reliance   DIGITAL ").expect("expected a match");
    assert_eq!(found.id, "rd");
}

#[test]
fn lookup_resolves_aliases() {
    let directory = StoreDirectory::from_stores(vec![store("amz", "Amazon", &["amazon.in"])]);
    assert_eq!(directory.lookup("Amazon.in").map(|s| s.id.as_str()), Some("amz"));
}

#[test]
fn lookup_unknown_store_returns_none() {
    let directory = StoreDirectory::from_stores(vec![store("amz", "Amazon", &[])]);
    assert!(directory.lookup("Croma").is_none());
}

#[test]
fn earlier_store_keeps_contested_alias() {
    let directory = StoreDirectory::from_stores(vec![
        store("fk", "Flipkart", &["fk"]),
        store("other", "Other", &["flipkart"]),
    ]);
    assert_eq!(directory.lookup("flipkart").map(|s| s.id.as_str()), Some("fk"));
}

#[test]
fn store_info_accepts_camel_case_logo() {
    let yaml = "id: croma\nname: Croma\nlogoUrl: https://cdn.example.com/croma.png\nstatus: inactive\n";
    let info: StoreInfo = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        info.logo_url.as_deref(),
        Some("https://cdn.example.com/croma.png")
    );
    assert_eq!(info.status, StoreStatus::Inactive);
}

#[test]
fn status_defaults_to_active() {
    let info: StoreInfo = serde_yaml::from_str("id: croma\nname: Croma\n").unwrap();
    assert_eq!(info.status, StoreStatus::Active);
}

#[test]
fn validate_rejects_empty_name() {
    let stores_file = StoresFile {
        stores: vec![store("x", "  ", &[])],
    };
    let err = validate_stores(&stores_file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_empty_id() {
    let stores_file = StoresFile {
        stores: vec![store(" ", "Croma", &[])],
    };
    let err = validate_stores(&stores_file).unwrap_err();
    assert!(err.to_string().contains("empty id"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let stores_file = StoresFile {
        stores: vec![store("a", "Vijay Sales", &[]), store("b", "vijay sales", &[])],
    };
    let err = validate_stores(&stores_file).unwrap_err();
    assert!(err.to_string().contains("duplicate store name"));
}

#[test]
fn validate_rejects_duplicate_id() {
    let stores_file = StoresFile {
        stores: vec![store("amz", "Amazon", &[]), store("AMZ", "Amazon Fresh", &[])],
    };
    let err = validate_stores(&stores_file).unwrap_err();
    assert!(err.to_string().contains("duplicate store id"));
}

#[test]
fn load_stores_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("stores.yaml");
    assert!(
        path.exists(),
        "stores.yaml missing at {path:?}; required for this test"
    );
    let result = load_stores(&path);
    assert!(result.is_ok(), "failed to load stores.yaml: {result:?}");
    let directory = result.unwrap();
    assert!(!directory.is_empty());
    assert!(directory.lookup("Amazon").is_some());
}

#[test]
fn load_stores_missing_file_is_io_error() {
    let err = load_stores(Path::new("/nonexistent/stores.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::StoresFileIo { .. }));
}

#[test]
fn status_display() {
    assert_eq!(StoreStatus::Active.to_string(), "active");
    assert_eq!(StoreStatus::Inactive.to_string(), "inactive");
}
