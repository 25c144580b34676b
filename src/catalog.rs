//! Reference catalog: purchasable components and title requirements

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::models::{Category, Component};

/// Minimum performance score a game or application needs at 1080p
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub title: String,
    pub min_performance: u32,
}

/// Immutable catalog, loaded once and shared by every recommendation run.
///
/// Component order is significant: it is the tie-break order for selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    components: Vec<Component>,
    requirements: Vec<RequirementEntry>,
}

impl Catalog {
    pub fn new(components: Vec<Component>, requirements: Vec<RequirementEntry>) -> Result<Self> {
        let mut ids = HashSet::new();
        for c in &components {
            if c.id.trim().is_empty() {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "component '{}' has an empty id",
                    c.name
                )));
            }
            if c.name.trim().is_empty() {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "component '{}' has an empty name",
                    c.id
                )));
            }
            if !ids.insert(c.id.as_str()) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "duplicate component id '{}'",
                    c.id
                )));
            }
        }

        let mut titles = HashSet::new();
        for r in &requirements {
            if r.title.trim().is_empty() {
                return Err(AdvisorError::InvalidCatalog(
                    "requirement with an empty title".to_string(),
                ));
            }
            if !titles.insert(r.title.as_str()) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "duplicate requirement '{}'",
                    r.title
                )));
            }
        }

        Ok(Self {
            components,
            requirements,
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn requirements(&self) -> &[RequirementEntry] {
        &self.requirements
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.category == category)
    }

    /// Minimum score for a title, `None` if the title is not in the table
    pub fn requirement(&self, title: &str) -> Option<u32> {
        self.requirements
            .iter()
            .find(|r| r.title == title)
            .map(|r| r.min_performance)
    }

    /// Titles containing `query`, ignoring case, in table order
    pub fn search_titles(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.requirements
            .iter()
            .map(|r| r.title.as_str())
            .filter(|t| t.to_lowercase().contains(&needle))
            .collect()
    }

    /// The catalog shipped with the advisor, priced in COP
    pub fn builtin() -> Self {
        let components = vec![
            part("cpu-i3", "Intel Core i3-12100F", Category::Cpu, 500_000, 40, &[]),
            part("cpu-i5", "Intel Core i5-12400F", Category::Cpu, 800_000, 70, &[]),
            part("cpu-ryzen5", "AMD Ryzen 5 5600X", Category::Cpu, 900_000, 85, &[]),
            part("cpu-i7", "Intel Core i7-12700K", Category::Cpu, 1_700_000, 140, &[]),
            part("gpu-1650", "GTX 1650", Category::Gpu, 700_000, 50, &[]),
            part("gpu-3050", "RTX 3050", Category::Gpu, 1_200_000, 90, &["ray-tracing"]),
            part("gpu-4060", "RTX 4060", Category::Gpu, 1_800_000, 120, &["ray-tracing"]),
            part("gpu-4080", "RTX 4080", Category::Gpu, 5_400_000, 260, &["ray-tracing"]),
            part("ram-16", "16GB DDR4", Category::Ram, 200_000, 40, &["ddr4"]),
            part("ram-32", "32GB DDR4", Category::Ram, 400_000, 85, &["ddr4"]),
            part("ram-64", "64GB DDR5", Category::Ram, 950_000, 160, &["ddr5"]),
            part("ssd500", "SSD 500GB NVMe", Category::Storage, 180_000, 50, &["nvme"]),
            part("ssd1tb", "SSD 1TB NVMe", Category::Storage, 320_000, 80, &["nvme"]),
            part("mobo-b660", "Motherboard B660", Category::Motherboard, 450_000, 40, &[]),
            part("psu650", "650W Power Supply", Category::Psu, 250_000, 40, &[]),
            part("case-basic", "Basic ATX Case", Category::Case, 150_000, 10, &[]),
            part("cooler-air", "Air Tower Cooler", Category::Cooler, 120_000, 20, &["air"]),
            part("cooler-aio240", "240mm AIO Liquid Cooler", Category::Cooler, 380_000, 45, &["liquid"]),
            part("monitor-24-fhd", "24\" 1080p 144Hz Monitor", Category::Monitor, 650_000, 30, &["1080p"]),
            part("monitor-27-qhd", "27\" 1440p 165Hz Monitor", Category::Monitor, 1_300_000, 60, &["1440p"]),
            part("kb-mech", "Mechanical Keyboard", Category::Keyboard, 180_000, 10, &[]),
            part("mouse-basic", "Wired Gaming Mouse", Category::Mouse, 80_000, 10, &[]),
        ];

        let requirements = [
            ("Valorant", 40),
            ("Fortnite", 55),
            ("League of Legends", 30),
            ("Cyberpunk 2077", 160),
            ("Call of Duty", 110),
            ("Office", 20),
            ("Photoshop", 60),
            ("AutoCAD", 90),
            ("Premiere Pro", 110),
            ("Blender", 130),
        ]
        .into_iter()
        .map(|(title, min_performance)| RequirementEntry {
            title: title.to_string(),
            min_performance,
        })
        .collect();

        Self {
            components,
            requirements,
        }
    }
}

fn part(
    id: &str,
    name: &str,
    category: Category,
    price: u64,
    performance: u32,
    tags: &[&str],
) -> Component {
    Component {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price,
        performance,
        tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(
            builtin.components().to_vec(),
            builtin.requirements().to_vec(),
        );
        assert_eq!(rebuilt, Ok(builtin));
    }

    #[test]
    fn builtin_covers_every_category() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            assert!(
                catalog.in_category(category).next().is_some(),
                "no {category} in builtin catalog"
            );
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let c = part("x", "X", Category::Case, 1, 1, &[]);
        let err = Catalog::new(vec![c.clone(), c], vec![]).unwrap_err();
        assert_eq!(err, AdvisorError::InvalidCatalog("duplicate component id 'x'".into()));
    }

    #[test]
    fn requirement_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.requirement("Cyberpunk 2077"), Some(160));
        assert_eq!(catalog.requirement("cyberpunk 2077"), None);
        assert_eq!(catalog.requirement("Minesweeper"), None);
    }

    #[test]
    fn title_search_matches_substrings() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search_titles("of"), vec!["League of Legends", "Call of Duty", "Office"]);
        assert_eq!(catalog.search_titles("VAL"), vec!["Valorant"]);
        assert!(catalog.search_titles("zelda").is_empty());
    }
}
