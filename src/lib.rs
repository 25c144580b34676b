//! PC build advisor
//!
//! Recommends economy, balanced and performance PC builds for a user's use
//! cases, games, resolution and budget. The engine is pure: every entry point
//! takes the [`Catalog`] and [`UserProfile`] explicitly and holds no state
//! between calls.

pub mod catalog;
pub mod db;
pub mod error;
pub mod estimator;
pub mod import;
pub mod models;
pub mod price;
pub mod recommend;
pub mod selector;
pub mod tiers;

pub use catalog::{Catalog, RequirementEntry};
pub use error::AdvisorError;
pub use estimator::estimate_target;
pub use models::{
    BudgetTier, Category, Component, Cooling, Recommendation, Resolution, SelectionResult, TierLabel,
    UserProfile,
};
pub use recommend::{RecommendationReport, build_recommendations, recommend};
pub use selector::select;
pub use tiers::{TierPolicy, derive_tiers, derive_tiers_with};
