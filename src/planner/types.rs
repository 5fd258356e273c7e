//! Planner data model
//!
//! Static catalog rows and the per-round specs derived from them.

use serde::{Deserialize, Serialize};

/// Coarse creative category used to keep the options in one round visually
/// distinct from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneFamily {
    Minimal,
    Editorial,
    PhotoCentric,
    Retro,
    PremiumModern,
}

impl LaneFamily {
    /// Canonical ordering, used to pad the lane rotation when the preferred
    /// list and the seeded shuffle come up short.
    pub const CANONICAL: [LaneFamily; 5] = [
        LaneFamily::Minimal,
        LaneFamily::Editorial,
        LaneFamily::PhotoCentric,
        LaneFamily::Retro,
        LaneFamily::PremiumModern,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LaneFamily::Minimal => "minimal",
            LaneFamily::Editorial => "editorial",
            LaneFamily::PhotoCentric => "photo_centric",
            LaneFamily::Retro => "retro",
            LaneFamily::PremiumModern => "premium_modern",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionType {
    CenterLockup,
    OffsetGrid,
    FullBleedScene,
    FramedEmblem,
    LayeredCollage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    SolidField,
    Gradient,
    PaperTexture,
    PhotoScene,
    CinematicScene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeProfile {
    ModernSans,
    EditorialSerif,
    DisplaySlab,
    HandScript,
    CondensedCaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentProfile {
    Clean,
    LineRules,
    TexturedGrain,
    DecoFrame,
    StickerElements,
}

/// Static, immutable catalog row bundling stylistic tags and provider preset
/// identifiers. Loaded once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionTemplate {
    pub id: &'static str,
    pub lane_family: LaneFamily,
    pub composition: CompositionType,
    pub background_mode: BackgroundMode,
    pub type_profile: TypeProfile,
    pub ornament_profile: OrnamentProfile,
    /// Default style-family tag, used only for diversity scoring; the style
    /// assigner layers the final per-slot family on top.
    pub style_hint: &'static str,
    /// Provider preset for the main render.
    pub preset_id: &'static str,
    /// Provider preset for the title lockup pass.
    pub lockup_preset_id: &'static str,
    /// Free-text lane prompt fed to prompt construction.
    pub lane_prompt: &'static str,
}

/// One planned slot for a round: template fields plus the layered assignments.
///
/// Ephemeral by contract: consumed immediately by prompt construction and
/// never persisted as its own entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDirectionSpec {
    pub template_id: String,
    pub lane_family: LaneFamily,
    pub composition: CompositionType,
    pub background_mode: BackgroundMode,
    pub type_profile: TypeProfile,
    pub ornament_profile: OrnamentProfile,
    pub preset_id: String,
    pub lockup_preset_id: String,
    pub lane_prompt: String,
    /// Unique per round, 0..n.
    pub option_index: usize,
    /// Unique per round, bijective with `option_index` ("Option A"..).
    pub option_label: String,
    pub wants_series_mark: bool,
    pub wants_title_stage: bool,
    pub style_family: String,
    /// One primary motif plus at most one secondary.
    pub motif_focus: Vec<String>,
}

impl PlannedDirectionSpec {
    pub fn from_template(template: &DirectionTemplate, option_index: usize) -> Self {
        Self {
            template_id: template.id.to_string(),
            lane_family: template.lane_family,
            composition: template.composition,
            background_mode: template.background_mode,
            type_profile: template.type_profile,
            ornament_profile: template.ornament_profile,
            preset_id: template.preset_id.to_string(),
            lockup_preset_id: template.lockup_preset_id.to_string(),
            lane_prompt: template.lane_prompt.to_string(),
            option_index,
            option_label: option_label(option_index),
            wants_series_mark: false,
            wants_title_stage: false,
            style_family: String::new(),
            motif_focus: Vec::new(),
        }
    }
}

/// "Option A", "Option B", ...
pub fn option_label(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Option {}", letter)
}

/// Tone level derived from intent text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLevel {
    Low,
    High,
    Solemn,
}

/// Playful/neutral/solemn signal derived once per plan call, consumed by
/// style-family scoring only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentSignal {
    pub is_playful: bool,
    pub level: IntentLevel,
    pub playful_matches: Vec<String>,
    pub solemn_matches: Vec<String>,
}

impl IntentSignal {
    pub fn neutral() -> Self {
        Self {
            is_playful: false,
            level: IntentLevel::Low,
            playful_matches: Vec::new(),
            solemn_matches: Vec::new(),
        }
    }
}

/// Secondary style tag layered onto a template by the style assigner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleFamily {
    pub id: &'static str,
    /// Lane this family renders best in.
    pub home_lane: LaneFamily,
    pub playful: bool,
    /// Leaves room for a clean series mark.
    pub mark_friendly: bool,
    /// Hosts a low-detail title stage well.
    pub stage_friendly: bool,
    /// Tends to fill the frame with detail, crowding overlays.
    pub clutter_prone: bool,
    /// Works under a constrained brand palette.
    pub brand_fit: bool,
}

/// Thematic motif keyword, tagged generic when it is a stock fallback rather
/// than a series-specific subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motif {
    pub id: &'static str,
    pub generic: bool,
}
