//! Title-stage and series-mark slot selection
//!
//! Picks at most one slot per round to host a reserved negative-space title
//! stage, and at most one to carry the series brand mark.

use tracing::debug;

use super::rng::hash_str;
use super::types::{
    BackgroundMode, CompositionType, LaneFamily, OrnamentProfile, PlannedDirectionSpec,
};

/// Fixed per-attribute weights favoring compositions that leave clean
/// negative space for overlay content.
fn stage_score(spec: &PlannedDirectionSpec) -> i32 {
    let lane = match spec.lane_family {
        LaneFamily::Minimal => 6,
        LaneFamily::PremiumModern => 3,
        LaneFamily::Editorial => 2,
        LaneFamily::Retro => 0,
        LaneFamily::PhotoCentric => -4,
    };
    let composition = match spec.composition {
        CompositionType::CenterLockup => 3,
        CompositionType::OffsetGrid => 2,
        CompositionType::FramedEmblem => 1,
        CompositionType::FullBleedScene => -2,
        CompositionType::LayeredCollage => -3,
    };
    let background = match spec.background_mode {
        BackgroundMode::Gradient => 4,
        BackgroundMode::PaperTexture => 3,
        BackgroundMode::SolidField => 2,
        BackgroundMode::CinematicScene => -4,
        BackgroundMode::PhotoScene => -5,
    };
    let ornament = match spec.ornament_profile {
        OrnamentProfile::Clean => 2,
        OrnamentProfile::LineRules => 1,
        OrnamentProfile::TexturedGrain => 0,
        OrnamentProfile::DecoFrame => -1,
        OrnamentProfile::StickerElements => -3,
    };
    lane + composition + background + ornament
}

/// Flag the slot best suited to host the title stage. Max score wins; ties
/// broken by a seeded hash of the template id.
pub fn select_title_stage(specs: &mut [PlannedDirectionSpec], seed: &str) {
    let winner = specs
        .iter()
        .max_by_key(|s| (stage_score(s), hash_str(&format!("{}|{}", seed, s.template_id))))
        .map(|s| s.option_index);
    if let Some(index) = winner {
        debug!(slot = index, "title stage assigned");
        for spec in specs.iter_mut() {
            spec.wants_title_stage = spec.option_index == index;
        }
    }
}

/// Flag the slot carrying the series mark: a deterministic, content-blind
/// uniform pick over the round's options.
pub fn select_series_mark(specs: &mut [PlannedDirectionSpec], seed: &str) {
    if specs.is_empty() {
        return;
    }
    let index = (hash_str(&format!("{}|series-mark", seed)) % specs.len() as u64) as usize;
    debug!(slot = index, "series mark assigned");
    for spec in specs.iter_mut() {
        spec.wants_series_mark = spec.option_index == index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::catalog::TEMPLATES;

    fn round_of(ids: &[&str]) -> Vec<PlannedDirectionSpec> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                let template = TEMPLATES.iter().find(|t| t.id == *id).unwrap();
                PlannedDirectionSpec::from_template(template, i)
            })
            .collect()
    }

    #[test]
    fn test_minimal_gradient_beats_photo_scene() {
        let mut specs = round_of(&["photo_cinematic_frame", "minimal_quiet_lockup"]);
        select_title_stage(&mut specs, "stage");
        assert!(!specs[0].wants_title_stage);
        assert!(specs[1].wants_title_stage);
    }

    #[test]
    fn test_exactly_one_title_stage() {
        let mut specs = round_of(&[
            "minimal_quiet_lockup",
            "retro_badge_press",
            "editorial_split_story",
        ]);
        select_title_stage(&mut specs, "one-stage");
        assert_eq!(specs.iter().filter(|s| s.wants_title_stage).count(), 1);
    }

    #[test]
    fn test_series_mark_deterministic_and_single() {
        let mut a = round_of(&["minimal_quiet_lockup", "retro_badge_press", "photo_full_scene"]);
        let mut b = a.clone();
        select_series_mark(&mut a, "mark-seed");
        select_series_mark(&mut b, "mark-seed");
        assert_eq!(
            a.iter().position(|s| s.wants_series_mark),
            b.iter().position(|s| s.wants_series_mark)
        );
        assert_eq!(a.iter().filter(|s| s.wants_series_mark).count(), 1);
    }

    #[test]
    fn test_series_mark_index_in_bounds() {
        for n in 1..=3 {
            let ids = ["minimal_quiet_lockup", "retro_badge_press", "photo_full_scene"];
            let mut specs = round_of(&ids[..n]);
            select_series_mark(&mut specs, "bounds");
            assert!(specs.iter().any(|s| s.wants_series_mark));
        }
    }
}
