//! Target performance estimation

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::UserProfile;

const BASE_SCORE: u32 = 40;

/// Bonus for each use case the estimator recognizes.
const USE_CASE_BONUSES: &[(&str, u32)] = &[("gaming", 40), ("design", 40), ("workstation", 60)];

/// Estimate the performance score a build should reach for this profile.
///
/// The use-case score and the most demanding selected title compete; the
/// higher one is scaled by the resolution factor. Titles missing from the
/// requirement table count as zero.
pub fn estimate_target(catalog: &Catalog, profile: &UserProfile) -> Result<u32> {
    profile.validate()?;

    let use_case_score = BASE_SCORE
        + USE_CASE_BONUSES
            .iter()
            .filter(|(name, _)| profile.has_use_case(name))
            .map(|(_, bonus)| bonus)
            .sum::<u32>();

    let requirement_max = profile
        .selected_games
        .iter()
        .chain(profile.selected_apps.iter())
        .filter_map(|title| catalog.requirement(title))
        .max()
        .unwrap_or(0);

    let target = (use_case_score.max(requirement_max) as f64 * profile.resolution.factor()).round() as u32;

    tracing::debug!(
        use_case_score,
        requirement_max,
        resolution = %profile.resolution,
        target,
        "estimated target performance"
    );

    Ok(target)
}
