//! Recommendation assembly: one build per budget tier

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::estimator::estimate_target;
use crate::models::{Category, Recommendation, SelectionResult, UserProfile};
use crate::price::format_price;
use crate::selector::select;
use crate::tiers::{TierPolicy, derive_tiers_with};

/// Build the economy, balanced and performance recommendations for a profile
///
/// The target is estimated once and shared by all three tiers so their
/// verdicts are comparable.
pub fn build_recommendations(catalog: &Catalog, profile: &UserProfile) -> Result<[Recommendation; 3]> {
    Ok(recommend(catalog, profile, &TierPolicy::default())?.recommendations)
}

/// Like [`build_recommendations`], but keeps the target alongside the builds
/// and lets the caller choose the tier policy.
pub fn recommend(catalog: &Catalog, profile: &UserProfile, policy: &TierPolicy) -> Result<RecommendationReport> {
    let target = estimate_target(catalog, profile)?;
    let tiers = derive_tiers_with(profile.budget, policy)?;

    let recommendations = tiers.map(|tier| {
        let selection = select(catalog, tier.ceiling, profile, target);
        let estimated_performance = estimated_performance(&selection);
        Recommendation {
            tier,
            estimated_performance,
            meets_target: estimated_performance >= u64::from(target),
            selection,
        }
    });

    tracing::info!(
        target,
        budget = profile.budget,
        builds_meeting_target = recommendations.iter().filter(|r| r.meets_target).count(),
        "built recommendations"
    );

    Ok(RecommendationReport {
        target,
        recommendations,
    })
}

/// CPU + GPU + RAM performance; other categories do not count toward the verdict.
///
/// Summed as `u64` so three maximal `u32` scores cannot overflow.
pub fn estimated_performance(selection: &SelectionResult) -> u64 {
    [Category::Cpu, Category::Gpu, Category::Ram]
        .into_iter()
        .filter_map(|cat| selection.component(cat))
        .map(|c| u64::from(c.performance))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationReport {
    pub target: u32,
    pub recommendations: [Recommendation; 3],
}

impl fmt::Display for RecommendationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Build Recommendations ===")?;
        writeln!(f, "Target performance: {}", self.target)?;

        for rec in &self.recommendations {
            writeln!(f)?;
            writeln!(f, "{} (budget {})", rec.tier.label.title(), format_price(rec.tier.ceiling))?;

            if rec.selection.is_empty() {
                writeln!(f, "  no components found within budget")?;
                continue;
            }

            for c in &rec.selection.chosen_components {
                let line = format!("{} – {}", c.category, c.name);
                writeln!(f, "  {:<44} {:>12}", line, format_price(c.price))?;
            }

            let missing = rec.selection.missing_categories();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
                writeln!(f, "  missing: {}", names.join(", "))?;
            }

            writeln!(f, "  Total:     {:>12}", format_price(rec.selection.total_spent))?;
            writeln!(f, "  Remaining: {:>12}", format_price(rec.selection.remaining_funds))?;
            writeln!(
                f,
                "  Performance {} / {} ({})",
                rec.estimated_performance,
                self.target,
                if rec.meets_target { "meets target" } else { "below target" }
            )?;
        }

        Ok(())
    }
}
