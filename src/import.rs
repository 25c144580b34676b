//! Price-sheet import
//!
//! Walks a directory for `*.json` price sheets and loads their components and
//! title requirements into the catalog database. Prices may be plain numbers
//! or COP strings such as `"$1.200.000"`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::Connection;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::catalog::RequirementEntry;
use crate::db;
use crate::models::{Category, Component};
use crate::price::parse_price;

#[derive(Debug, Default, Deserialize)]
struct PriceSheet {
    #[serde(default)]
    components: Vec<SheetComponent>,
    #[serde(default)]
    requirements: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct SheetComponent {
    id: String,
    name: String,
    category: String,
    price: SheetPrice,
    performance: u32,
    #[serde(default)]
    tags: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetPrice {
    Pesos(u64),
    Text(String),
}

impl SheetComponent {
    fn into_component(self) -> Result<Component> {
        let category: Category = self
            .category
            .parse()
            .with_context(|| format!("component {}", self.id))?;
        let price = match self.price {
            SheetPrice::Pesos(p) => p,
            SheetPrice::Text(text) => parse_price(&text)
                .ok_or_else(|| anyhow!("component {}: unreadable price '{}'", self.id, text))?,
        };
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            bail!("component with empty id or name");
        }
        // SQLite stores integers as i64
        if i64::try_from(price).is_err() {
            bail!("component {}: price {} out of range", self.id, price);
        }
        Ok(Component {
            id: self.id,
            name: self.name,
            category,
            price,
            performance: self.performance,
            tags: self.tags,
        })
    }
}

/// Find all price sheets under a directory, in a stable order
pub fn find_price_sheets(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }

    let sheets = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    Ok(sheets)
}

/// Parse one sheet into catalog records without touching the database
fn parse_price_sheet(path: &Path) -> Result<(Vec<Component>, Vec<RequirementEntry>)> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let sheet: PriceSheet = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let components = sheet
        .components
        .into_iter()
        .map(SheetComponent::into_component)
        .collect::<Result<Vec<_>>>()?;
    let requirements = sheet
        .requirements
        .into_iter()
        .map(|(title, min_performance)| {
            if title.trim().is_empty() {
                bail!("requirement with an empty title");
            }
            Ok(RequirementEntry {
                title,
                min_performance,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((components, requirements))
}

/// Write one sheet's records atomically
fn store_sheet(conn: &Connection, components: &[Component], requirements: &[RequirementEntry]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for component in components {
        db::upsert_component(&tx, component)
            .with_context(|| format!("storing component {}", component.id))?;
    }
    for entry in requirements {
        db::upsert_requirement(&tx, entry)
            .with_context(|| format!("storing requirement {}", entry.title))?;
    }
    tx.commit()?;
    Ok(())
}

/// Import every price sheet under `dir` into the database
///
/// A sheet that fails to parse or to store is logged and counted, and none
/// of its records are written. Later sheets are still imported.
pub fn import_directory(conn: &Connection, dir: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    tracing::info!(dir = %dir.display(), "scanning for price sheets");
    let sheets = find_price_sheets(dir)?;

    for path in &sheets {
        stats.files += 1;
        let parsed = parse_price_sheet(path).and_then(|(components, requirements)| {
            if !components.is_empty() || !requirements.is_empty() {
                store_sheet(conn, &components, &requirements)?;
            }
            Ok((components, requirements))
        });

        match parsed {
            Ok((components, requirements)) if components.is_empty() && requirements.is_empty() => {
                stats.skipped += 1;
            }
            Ok((components, requirements)) => {
                tracing::info!(
                    file = %path.display(),
                    components = components.len(),
                    requirements = requirements.len(),
                    "imported price sheet"
                );
                stats.components += components.len();
                stats.requirements += requirements.len();
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %format!("{e:#}"), "skipping price sheet");
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub files: usize,
    pub components: usize,
    pub requirements: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} components and {} requirements from {} files. Skipped: {}, Errors: {}",
            self.components, self.requirements, self.files, self.skipped, self.errors
        )
    }
}
