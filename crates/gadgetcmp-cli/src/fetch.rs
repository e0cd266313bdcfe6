//! Commands that talk to the catalog API.

use std::path::Path;

use anyhow::Context;
use futures::future::join_all;
use serde_json::{Map, Value};

use gadgetcmp_catalog::CatalogClient;
use gadgetcmp_core::{load_stores, AppConfig, Category};

fn catalog_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    Ok(CatalogClient::new(
        &config.catalog_api_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?)
}

/// Fetches one category, or every category concurrently with `all`, and
/// writes the records as JSON.
///
/// With `all`, a failing category is logged and left out so the others are
/// still written.
///
/// # Errors
///
/// Returns an error if the client cannot be built, a single-category fetch
/// fails, or the output cannot be written.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    category: Option<Category>,
    all: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let client = catalog_client(config)?;

    let body = if all {
        let client = &client;
        let results = join_all(
            Category::ALL
                .iter()
                .map(|&category| async move {
                    (category, client.fetch_category(category, config.page_size).await)
                }),
        )
        .await;

        let mut by_category = Map::new();
        for (category, result) in results {
            match result {
                Ok(records) => {
                    by_category.insert(category.as_str().to_string(), Value::Array(records));
                }
                Err(e) => {
                    tracing::error!(%category, error = %e, "category fetch failed; skipping");
                }
            }
        }
        Value::Object(by_category)
    } else {
        let category = category.context("either --category or --all is required")?;
        let records = client
            .fetch_category(category, config.page_size)
            .await
            .with_context(|| format!("failed to fetch {category} from {}", client.base_url()))?;
        Value::Array(records)
    };

    let text = serde_json::to_string_pretty(&body)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote catalog dump");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Lists the store directory from the local YAML file, or from the API with
/// `remote`.
///
/// # Errors
///
/// Returns an error if the file or the API response cannot be loaded.
pub(crate) async fn run_stores(config: &AppConfig, remote: bool) -> anyhow::Result<()> {
    let stores = if remote {
        catalog_client(config)?.fetch_stores().await?
    } else {
        load_stores(&config.stores_path)
            .with_context(|| format!("failed to load {}", config.stores_path.display()))?
    };

    println!("{:<16}{:<24}{:<10}ALIASES", "ID", "NAME", "STATUS");
    for store in stores.iter() {
        println!(
            "{:<16}{:<24}{:<10}{}",
            store.id,
            store.name,
            store.status.to_string(),
            store.aliases.join(", ")
        );
    }
    println!("{} stores", stores.len());
    Ok(())
}
