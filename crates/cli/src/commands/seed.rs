//! Seed-file loading and validation.
//!
//! A seed file is a YAML list of product drafts:
//!
//! ```yaml
//! - name: Apple
//!   price: 2.5
//!   category: fruit
//!   stock: 40
//! - name: Sourdough Loaf
//!   price: 6.0
//!   category: bakery
//!   stock: 12
//! ```

use std::path::Path;

use tracing::{error, info};

use greenbasket_core::ProductDraft;

/// Load product drafts from a YAML seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub async fn load(path: &Path) -> Result<Vec<ProductDraft>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let drafts: Vec<ProductDraft> = serde_yaml::from_str(&content)?;
    Ok(drafts)
}

/// Validate a YAML product seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or any
/// draft fails validation.
pub async fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Loading seed file");
    let drafts = load(path).await?;
    info!(products = drafts.len(), "Parsed seed file");

    let errors: Vec<String> = drafts
        .iter()
        .enumerate()
        .filter_map(|(index, draft)| {
            draft
                .validate()
                .err()
                .map(|err| format!("product {index} ({:?}): {err}", draft.name))
        })
        .collect();

    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!("Seed file validated successfully");
    Ok(())
}
