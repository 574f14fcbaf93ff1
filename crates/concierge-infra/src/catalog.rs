//! Catalog loader.
//!
//! Reads the listing catalog once at startup from a local file or an
//! `http(s)://` URL. Failure is never fatal: [`load_catalog`] logs the cause
//! and hands back the empty catalog so the widget keeps working.

use std::path::Path;

use concierge_types::catalog::CatalogSnapshot;
use concierge_types::error::CatalogError;
use serde_json::Value;

/// Load the catalog, falling back to the empty catalog on any failure.
pub async fn load_catalog(source: &str) -> CatalogSnapshot {
    match fetch_catalog(source).await {
        Ok(catalog) => {
            tracing::info!(
                source,
                listings = catalog.listing_count(),
                "Catalog loaded"
            );
            catalog
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to load catalog, continuing with an empty catalog");
            CatalogSnapshot::empty()
        }
    }
}

/// Load and decode the catalog, reporting why it could not be read.
pub async fn fetch_catalog(source: &str) -> Result<CatalogSnapshot, CatalogError> {
    let body = if is_remote(source) {
        fetch_remote(source).await?
    } else {
        read_local(Path::new(source)).await?
    };

    serde_json::from_str::<Value>(&body)
        .map(CatalogSnapshot::new)
        .map_err(|e| CatalogError::Decode {
            source_name: source.to_string(),
            message: e.to_string(),
        })
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_remote(url: &str) -> Result<String, CatalogError> {
    let fetch_err = |e: reqwest::Error| CatalogError::Fetch {
        source_name: url.to_string(),
        message: e.to_string(),
    };

    let response = reqwest::get(url).await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            source_name: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(fetch_err)
}

async fn read_local(path: &Path) -> Result<String, CatalogError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Fetch {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })
}
