//! Direction planner
//!
//! Runs once per round: orders lane families, greedily picks diverse
//! templates, flags the title-stage and series-mark slots, classifies intent,
//! and layers style families and motifs onto each slot. Pure and synchronous:
//! no I/O, no shared mutable state beyond the read-only catalogs, safe to
//! invoke concurrently for independent rounds.

pub mod catalog;
pub mod intent;
pub mod lanes;
pub mod rng;
pub mod slots;
pub mod style;
pub mod types;

use serde::{Deserialize, Serialize};
use tracing::info;

use self::catalog::enabled_templates;
use self::intent::detect_intent;
use self::lanes::{lane_order, select_templates};
use self::rng::SeededRng;
use self::slots::{select_series_mark, select_title_stage};
use self::style::{assign_motifs, assign_style_families, StyleContext};
use self::types::{LaneFamily, PlannedDirectionSpec};

/// Requested option counts are clamped into this range.
pub const MIN_OPTIONS: usize = 1;
pub const MAX_OPTIONS: usize = 3;

/// Everything a planning round consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Seed string; identical seeds replay identical rounds.
    pub seed: String,
    /// Requested slot count, clamped to 1..=3.
    pub option_count: usize,
    /// Provider presets enabled for this round; empty means the full catalog.
    pub enabled_presets: Vec<String>,
    /// Lane families the caller wants surfaced first.
    pub preferred_lanes: Vec<LaneFamily>,
    /// Free-text fields (titles, briefs) scanned for intent keywords.
    pub intent_texts: Vec<String>,
    /// Style families used in recent rounds, most recent first.
    pub recent_style_families: Vec<String>,
    /// Motifs used in recent rounds.
    pub recent_motifs: Vec<String>,
    /// Generic motifs the caller explicitly allows before other generics.
    pub allowed_generic_motifs: Vec<String>,
    /// Free-text phrases describing the series mark, if any.
    pub mark_ideas: Vec<String>,
    /// Whether one slot should carry the series mark.
    pub include_series_mark: bool,
    /// True when an allowed brand palette constrains the round.
    pub brand_constrained: bool,
}

impl PlanRequest {
    pub fn new(seed: impl Into<String>, option_count: usize) -> Self {
        Self {
            seed: seed.into(),
            option_count,
            ..Self::default()
        }
    }
}

/// Plan one round of direction specs.
///
/// Never fails on valid input: an empty or unmatched preset filter falls back
/// to the full catalog, and a pool too small for distinct lanes degrades to
/// reusing lanes rather than erroring.
pub fn plan_round(request: &PlanRequest) -> Vec<PlannedDirectionSpec> {
    let count = request.option_count.clamp(MIN_OPTIONS, MAX_OPTIONS);
    let mut rng = SeededRng::from_seed(&request.seed);

    let pool = enabled_templates(&request.enabled_presets);
    let lanes = lane_order(&request.preferred_lanes, &mut rng);
    let templates = select_templates(&pool, count, &lanes, &request.seed, &mut rng);

    let mut specs: Vec<PlannedDirectionSpec> = templates
        .iter()
        .enumerate()
        .map(|(i, t)| PlannedDirectionSpec::from_template(t, i))
        .collect();

    select_title_stage(&mut specs, &request.seed);
    if request.include_series_mark {
        select_series_mark(&mut specs, &request.seed);
    }

    let intent = detect_intent(&request.intent_texts);
    let ctx = StyleContext {
        intent: &intent,
        preferred_lanes: &request.preferred_lanes,
        recent_style_families: &request.recent_style_families,
        brand_constrained: request.brand_constrained,
    };
    assign_style_families(&mut specs, &ctx, &request.seed, &mut rng);
    assign_motifs(
        &mut specs,
        &request.allowed_generic_motifs,
        &request.recent_motifs,
        &request.mark_ideas,
        &mut rng,
    );

    info!(
        seed = %request.seed,
        options = specs.len(),
        intent = ?intent.level,
        "round planned"
    );
    specs
}
