//! Greedy per-category component selection under a spending ceiling

use crate::catalog::Catalog;
use crate::models::{Category, Component, Cooling, Resolution, SelectionResult, UserProfile};

/// Cooler threshold once a liquid preference cannot be honored.
const LIQUID_FALLBACK_COOLER_MIN: u32 = 20;

const ENTRY_MONITOR_ID: &str = "monitor-24-fhd";
const HIGH_RES_MONITOR_ID: &str = "monitor-27-qhd";
const KEYBOARD_ID: &str = "kb-mech";
const MOUSE_ID: &str = "mouse-basic";

/// Pick one component per core category without exceeding `ceiling`.
///
/// Categories are bought in [`Category::CORE`] order and each purchase
/// shrinks the funds the next category sees, so under a tight ceiling the
/// earlier categories win. A category with nothing affordable is skipped.
/// Peripherals are appended afterwards from whatever is left.
pub fn select(catalog: &Catalog, ceiling: u64, profile: &UserProfile, target: u32) -> SelectionResult {
    let gaming = profile.has_use_case("gaming");

    let (mut chosen, remaining) = Category::CORE.into_iter().fold(
        (Vec::with_capacity(Category::CORE.len() + 3), ceiling),
        |(mut chosen, funds), category| match pick_core(catalog, category, funds, profile, target, gaming) {
            Some(component) => {
                tracing::debug!(%category, id = %component.id, price = component.price, funds, "picked component");
                chosen.push(component.clone());
                (chosen, funds - component.price)
            }
            None => {
                tracing::debug!(%category, funds, "nothing affordable, skipping category");
                (chosen, funds)
            }
        },
    );

    if profile.wants_peripherals {
        let mut funds = remaining;
        for id in peripheral_ids(profile.resolution) {
            let Some(component) = catalog.by_id(id) else {
                tracing::debug!(id, "peripheral not in catalog");
                continue;
            };
            let already_chosen = chosen.iter().any(|c: &Component| c.category == component.category);
            if !component.category.is_peripheral() || already_chosen || component.price > funds {
                continue;
            }
            funds -= component.price;
            chosen.push(component.clone());
        }
    }

    let total_spent: u64 = chosen.iter().map(|c| c.price).sum();
    SelectionResult {
        chosen_components: chosen,
        total_spent,
        remaining_funds: ceiling - total_spent,
    }
}

/// Minimum performance a core category should reach for this target
pub fn min_performance(category: Category, target: u32, gaming: bool) -> u32 {
    let scaled = |factor: f64| (target as f64 * factor).round() as u32;
    match category {
        Category::Cpu => scaled(if gaming { 0.25 } else { 0.15 }),
        Category::Gpu => scaled(if gaming { 0.40 } else { 0.20 }),
        Category::Ram => 40,
        Category::Storage => 40,
        Category::Motherboard => 30,
        Category::Psu => 40,
        Category::Case => 10,
        Category::Cooler => 10,
        Category::Monitor | Category::Keyboard | Category::Mouse => 0,
    }
}

fn pick_core<'a>(
    catalog: &'a Catalog,
    category: Category,
    funds: u64,
    profile: &UserProfile,
    target: u32,
    gaming: bool,
) -> Option<&'a Component> {
    let affordable: Vec<&Component> = catalog
        .in_category(category)
        .filter(|c| c.price <= funds)
        .collect();

    let mut threshold = min_performance(category, target, gaming);
    let mut pool = affordable;

    if category == Category::Cooler && profile.cooling == Cooling::Liquid {
        let liquid: Vec<&Component> = pool.iter().copied().filter(|c| c.has_tag("liquid")).collect();
        if liquid.is_empty() {
            threshold = LIQUID_FALLBACK_COOLER_MIN;
        } else {
            pool = liquid;
        }
    }

    best_value(pool.iter().copied().filter(|c| c.performance >= threshold))
        .or_else(|| best_value(pool.iter().copied()))
}

/// Highest performance per peso; the earliest candidate wins a tie.
fn best_value<'a>(candidates: impl IntoIterator<Item = &'a Component>) -> Option<&'a Component> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if !better_value(candidate, current) => Some(current),
        _ => Some(candidate),
    })
}

// a.perf / a.price > b.perf / b.price, cross-multiplied so zero prices are safe
fn better_value(a: &Component, b: &Component) -> bool {
    u128::from(a.performance) * u128::from(b.price) > u128::from(b.performance) * u128::from(a.price)
}

fn peripheral_ids(resolution: Resolution) -> [&'static str; 3] {
    let monitor = match resolution {
        Resolution::Fhd => ENTRY_MONITOR_ID,
        Resolution::Qhd | Resolution::Uhd => HIGH_RES_MONITOR_ID,
    };
    [monitor, KEYBOARD_ID, MOUSE_ID]
}
