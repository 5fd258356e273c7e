//! Style family and motif assignment
//!
//! Layers a secondary style tag and one or two thematic motif keywords onto
//! each planned slot. Style scoring weighs lane fit, recency, mark/stage
//! fitness, brand fit, and the round's intent signal; motifs rotate through a
//! seed-shuffled priority list so consecutive rounds do not repeat themselves.

use tracing::debug;

use super::catalog::{MOTIFS, STYLE_FAMILIES};
use super::rng::{hash_str, SeededRng};
use super::types::{IntentLevel, IntentSignal, LaneFamily, PlannedDirectionSpec, StyleFamily};

/// Inputs the style scorer needs beyond the slot itself.
pub struct StyleContext<'a> {
    pub intent: &'a IntentSignal,
    pub preferred_lanes: &'a [LaneFamily],
    /// Style families used in recent rounds, most recent first.
    pub recent_style_families: &'a [String],
    /// True when an allowed brand palette constrains the round.
    pub brand_constrained: bool,
}

/// Recency term: a fresh family earns a bonus, a recently used one a penalty
/// that grows the more recently it appeared.
fn recency_term(family_id: &str, recent: &[String]) -> i32 {
    match recent.iter().position(|r| r == family_id) {
        None => 8,
        Some(0) => -8,
        Some(1) => -6,
        Some(2) => -4,
        Some(_) => -2,
    }
}

fn style_score(family: &StyleFamily, spec: &PlannedDirectionSpec, ctx: &StyleContext) -> i32 {
    let mut score = 0;
    if family.home_lane == spec.lane_family {
        score += 4;
    }
    if ctx.preferred_lanes.contains(&family.home_lane) {
        score += 2;
    }
    score += recency_term(family.id, ctx.recent_style_families);

    if spec.wants_series_mark {
        score += if family.mark_friendly { 6 } else { -6 };
    }
    if spec.wants_title_stage {
        if family.stage_friendly {
            score += 6;
        }
        if family.clutter_prone {
            score -= 6;
        }
    }
    if ctx.brand_constrained {
        score += if family.brand_fit { 2 } else { -2 };
    }
    if family.playful {
        score += match ctx.intent.level {
            IntentLevel::Solemn => -24,
            IntentLevel::High => 7,
            IntentLevel::Low => -4,
        };
    }
    score
}

/// Assign the best-scoring style family to every slot. Ties fall back to a
/// seeded secondary order, then a seeded hash of the family id.
pub fn assign_style_families(
    specs: &mut [PlannedDirectionSpec],
    ctx: &StyleContext,
    seed: &str,
    rng: &mut SeededRng,
) {
    // Secondary tie-break order, fixed once per round.
    let mut secondary: Vec<&'static str> = STYLE_FAMILIES.iter().map(|f| f.id).collect();
    rng.shuffle(&mut secondary);
    let rank = |id: &str| secondary.iter().position(|s| *s == id).unwrap_or(usize::MAX);

    for spec in specs.iter_mut() {
        let best = STYLE_FAMILIES
            .iter()
            .max_by(|a, b| {
                let sa = style_score(a, spec, ctx);
                let sb = style_score(b, spec, ctx);
                sa.cmp(&sb)
                    .then_with(|| rank(b.id).cmp(&rank(a.id)))
                    .then_with(|| {
                        hash_str(&format!("{}|{}", seed, b.id))
                            .cmp(&hash_str(&format!("{}|{}", seed, a.id)))
                    })
            })
            .unwrap_or(&STYLE_FAMILIES[0]);
        debug!(slot = spec.option_index, family = best.id, "style family assigned");
        spec.style_family = best.id.to_string();
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Word-token overlap between a motif and the supplied mark-idea phrases.
fn mark_overlap(motif_id: &str, mark_ideas: &[String]) -> usize {
    let motif_tokens = tokens(motif_id);
    mark_ideas
        .iter()
        .map(|idea| {
            let idea_tokens = tokens(idea);
            motif_tokens.iter().filter(|t| idea_tokens.contains(t)).count()
        })
        .max()
        .unwrap_or(0)
}

/// Build the round's motif rotation: seed-shuffled, non-generic motifs first,
/// then explicitly allowed generic motifs, then the remaining generic ones,
/// with recently used motifs rotated to the back of their group ordering.
pub fn motif_rotation(
    allowed_generic: &[String],
    recent_motifs: &[String],
    rng: &mut SeededRng,
) -> Vec<String> {
    let mut shuffled: Vec<&'static str> = MOTIFS.iter().map(|m| m.id).collect();
    rng.shuffle(&mut shuffled);

    let generic = |id: &str| MOTIFS.iter().any(|m| m.id == id && m.generic);
    let mut ordered: Vec<String> = Vec::with_capacity(shuffled.len());
    ordered.extend(shuffled.iter().filter(|id| !generic(id)).map(|s| s.to_string()));
    ordered.extend(
        shuffled
            .iter()
            .filter(|id| generic(id) && allowed_generic.iter().any(|a| a == **id))
            .map(|s| s.to_string()),
    );
    ordered.extend(
        shuffled
            .iter()
            .filter(|id| generic(id) && !allowed_generic.iter().any(|a| a == **id))
            .map(|s| s.to_string()),
    );

    // Recently used motifs cycle to the back so fresh ones surface first.
    let (recent, fresh): (Vec<String>, Vec<String>) = ordered
        .into_iter()
        .partition(|id| recent_motifs.iter().any(|r| r == id));
    let mut rotation = fresh;
    rotation.extend(recent);
    rotation
}

/// Assign each slot a unique primary motif plus one secondary from the
/// remaining rotation. The series-mark slot prefers the motif whose tokens
/// overlap the supplied mark-idea phrases the most.
pub fn assign_motifs(
    specs: &mut [PlannedDirectionSpec],
    allowed_generic: &[String],
    recent_motifs: &[String],
    mark_ideas: &[String],
    rng: &mut SeededRng,
) {
    let mut rotation = motif_rotation(allowed_generic, recent_motifs, rng);

    for spec in specs.iter_mut() {
        if rotation.is_empty() {
            break;
        }
        let primary_idx = if spec.wants_series_mark && !mark_ideas.is_empty() {
            let best = rotation
                .iter()
                .enumerate()
                .max_by_key(|(i, id)| (mark_overlap(id, mark_ideas), usize::MAX - i))
                .map(|(i, _)| i)
                .unwrap_or(0);
            // Only divert from the rotation head when something actually overlaps.
            if mark_overlap(&rotation[best], mark_ideas) > 0 {
                best
            } else {
                0
            }
        } else {
            0
        };
        let primary = rotation.remove(primary_idx);
        let mut focus = vec![primary];
        if !rotation.is_empty() {
            focus.push(rotation.remove(0));
        }
        spec.motif_focus = focus;
    }
}
