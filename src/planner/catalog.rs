//! Static catalogs
//!
//! Process-wide immutable tables: the direction template pool, the
//! style-family bank, the motif pool, and the intent keyword lists. No runtime
//! mutation, so no synchronization is needed.

use super::types::{
    BackgroundMode, CompositionType, DirectionTemplate, LaneFamily, Motif, OrnamentProfile,
    StyleFamily, TypeProfile,
};

/// Full direction template pool. Three rows per lane family so a round can
/// still diversify composition and background within a reused lane.
pub static TEMPLATES: [DirectionTemplate; 15] = [
    DirectionTemplate {
        id: "minimal_quiet_lockup",
        lane_family: LaneFamily::Minimal,
        composition: CompositionType::CenterLockup,
        background_mode: BackgroundMode::Gradient,
        type_profile: TypeProfile::ModernSans,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "quiet_geometry",
        preset_id: "pix_minimal_soft",
        lockup_preset_id: "lock_center_airy",
        lane_prompt: "restrained composition, one dominant shape, generous negative space, soft light",
    },
    DirectionTemplate {
        id: "minimal_paper_field",
        lane_family: LaneFamily::Minimal,
        composition: CompositionType::FramedEmblem,
        background_mode: BackgroundMode::PaperTexture,
        type_profile: TypeProfile::EditorialSerif,
        ornament_profile: OrnamentProfile::LineRules,
        style_hint: "pressed_ink",
        preset_id: "pix_minimal_paper",
        lockup_preset_id: "lock_rule_framed",
        lane_prompt: "single emblem on warm paper, thin rules, letterpress restraint",
    },
    DirectionTemplate {
        id: "minimal_solid_mark",
        lane_family: LaneFamily::Minimal,
        composition: CompositionType::OffsetGrid,
        background_mode: BackgroundMode::SolidField,
        type_profile: TypeProfile::CondensedCaps,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "flat_signal",
        preset_id: "pix_minimal_flat",
        lockup_preset_id: "lock_corner_caps",
        lane_prompt: "flat color field, one offset graphic element, poster-like calm",
    },
    DirectionTemplate {
        id: "editorial_split_story",
        lane_family: LaneFamily::Editorial,
        composition: CompositionType::OffsetGrid,
        background_mode: BackgroundMode::PaperTexture,
        type_profile: TypeProfile::EditorialSerif,
        ornament_profile: OrnamentProfile::LineRules,
        style_hint: "magazine_cut",
        preset_id: "pix_editorial_split",
        lockup_preset_id: "lock_column_serif",
        lane_prompt: "editorial grid, cut-out imagery against paper, confident column structure",
    },
    DirectionTemplate {
        id: "editorial_collage_note",
        lane_family: LaneFamily::Editorial,
        composition: CompositionType::LayeredCollage,
        background_mode: BackgroundMode::SolidField,
        type_profile: TypeProfile::ModernSans,
        ornament_profile: OrnamentProfile::StickerElements,
        style_hint: "annotated_collage",
        preset_id: "pix_editorial_collage",
        lockup_preset_id: "lock_tape_label",
        lane_prompt: "layered clippings and annotation marks, studied but energetic arrangement",
    },
    DirectionTemplate {
        id: "editorial_quiet_column",
        lane_family: LaneFamily::Editorial,
        composition: CompositionType::CenterLockup,
        background_mode: BackgroundMode::Gradient,
        type_profile: TypeProfile::DisplaySlab,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "broadsheet_calm",
        preset_id: "pix_editorial_calm",
        lockup_preset_id: "lock_center_slab",
        lane_prompt: "single strong column of imagery, muted gradient, broadsheet poise",
    },
    DirectionTemplate {
        id: "photo_full_scene",
        lane_family: LaneFamily::PhotoCentric,
        composition: CompositionType::FullBleedScene,
        background_mode: BackgroundMode::PhotoScene,
        type_profile: TypeProfile::ModernSans,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "natural_light",
        preset_id: "pix_photo_scene",
        lockup_preset_id: "lock_lower_band",
        lane_prompt: "full-bleed photographic scene, honest natural light, shallow depth",
    },
    DirectionTemplate {
        id: "photo_cinematic_frame",
        lane_family: LaneFamily::PhotoCentric,
        composition: CompositionType::FullBleedScene,
        background_mode: BackgroundMode::CinematicScene,
        type_profile: TypeProfile::CondensedCaps,
        ornament_profile: OrnamentProfile::TexturedGrain,
        style_hint: "anamorphic_mood",
        preset_id: "pix_photo_cine",
        lockup_preset_id: "lock_letterbox",
        lane_prompt: "cinematic frame, directional haze, filmic grain, widescreen tension",
    },
    DirectionTemplate {
        id: "photo_object_study",
        lane_family: LaneFamily::PhotoCentric,
        composition: CompositionType::CenterLockup,
        background_mode: BackgroundMode::SolidField,
        type_profile: TypeProfile::EditorialSerif,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "still_life",
        preset_id: "pix_photo_object",
        lockup_preset_id: "lock_under_object",
        lane_prompt: "single object studio study, seamless backdrop, deliberate shadow",
    },
    DirectionTemplate {
        id: "retro_badge_press",
        lane_family: LaneFamily::Retro,
        composition: CompositionType::FramedEmblem,
        background_mode: BackgroundMode::PaperTexture,
        type_profile: TypeProfile::DisplaySlab,
        ornament_profile: OrnamentProfile::DecoFrame,
        style_hint: "union_badge",
        preset_id: "pix_retro_badge",
        lockup_preset_id: "lock_arc_badge",
        lane_prompt: "vintage badge lockup, deco frame, worn print texture",
    },
    DirectionTemplate {
        id: "retro_script_wave",
        lane_family: LaneFamily::Retro,
        composition: CompositionType::CenterLockup,
        background_mode: BackgroundMode::Gradient,
        type_profile: TypeProfile::HandScript,
        ornament_profile: OrnamentProfile::TexturedGrain,
        style_hint: "sunset_script",
        preset_id: "pix_retro_script",
        lockup_preset_id: "lock_script_sweep",
        lane_prompt: "seventies gradient bands, sweeping script energy, grain overlay",
    },
    DirectionTemplate {
        id: "retro_collage_pop",
        lane_family: LaneFamily::Retro,
        composition: CompositionType::LayeredCollage,
        background_mode: BackgroundMode::SolidField,
        type_profile: TypeProfile::CondensedCaps,
        ornament_profile: OrnamentProfile::StickerElements,
        style_hint: "halftone_pop",
        preset_id: "pix_retro_pop",
        lockup_preset_id: "lock_burst_caps",
        lane_prompt: "halftone pop collage, punchy cutouts, print-shop stickers",
    },
    DirectionTemplate {
        id: "premium_gradient_form",
        lane_family: LaneFamily::PremiumModern,
        composition: CompositionType::CenterLockup,
        background_mode: BackgroundMode::Gradient,
        type_profile: TypeProfile::ModernSans,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "glass_form",
        preset_id: "pix_premium_form",
        lockup_preset_id: "lock_center_thin",
        lane_prompt: "sculpted abstract form, deep gradient atmosphere, premium restraint",
    },
    DirectionTemplate {
        id: "premium_grid_relief",
        lane_family: LaneFamily::PremiumModern,
        composition: CompositionType::OffsetGrid,
        background_mode: BackgroundMode::SolidField,
        type_profile: TypeProfile::CondensedCaps,
        ornament_profile: OrnamentProfile::LineRules,
        style_hint: "embossed_grid",
        preset_id: "pix_premium_grid",
        lockup_preset_id: "lock_grid_caps",
        lane_prompt: "tactile relief grid, tone-on-tone depth, architectural spacing",
    },
    DirectionTemplate {
        id: "premium_cinema_object",
        lane_family: LaneFamily::PremiumModern,
        composition: CompositionType::FramedEmblem,
        background_mode: BackgroundMode::CinematicScene,
        type_profile: TypeProfile::EditorialSerif,
        ornament_profile: OrnamentProfile::Clean,
        style_hint: "monolith_glow",
        preset_id: "pix_premium_cine",
        lockup_preset_id: "lock_plinth_serif",
        lane_prompt: "hero object under cinematic rim light, velvet dark field, quiet luxury",
    },
];

/// Style-family bank layered onto templates per slot.
pub static STYLE_FAMILIES: [StyleFamily; 15] = [
    StyleFamily { id: "quiet_geometry", home_lane: LaneFamily::Minimal, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "pressed_ink", home_lane: LaneFamily::Minimal, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "flat_signal", home_lane: LaneFamily::Minimal, playful: true, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "magazine_cut", home_lane: LaneFamily::Editorial, playful: false, mark_friendly: false, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "annotated_collage", home_lane: LaneFamily::Editorial, playful: true, mark_friendly: false, stage_friendly: false, clutter_prone: true, brand_fit: false },
    StyleFamily { id: "broadsheet_calm", home_lane: LaneFamily::Editorial, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "natural_light", home_lane: LaneFamily::PhotoCentric, playful: false, mark_friendly: false, stage_friendly: false, clutter_prone: true, brand_fit: false },
    StyleFamily { id: "anamorphic_mood", home_lane: LaneFamily::PhotoCentric, playful: false, mark_friendly: false, stage_friendly: false, clutter_prone: true, brand_fit: false },
    StyleFamily { id: "still_life", home_lane: LaneFamily::PhotoCentric, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: false },
    StyleFamily { id: "halftone_pop", home_lane: LaneFamily::Retro, playful: true, mark_friendly: false, stage_friendly: false, clutter_prone: true, brand_fit: false },
    StyleFamily { id: "sunset_script", home_lane: LaneFamily::Retro, playful: true, mark_friendly: false, stage_friendly: true, clutter_prone: false, brand_fit: false },
    StyleFamily { id: "union_badge", home_lane: LaneFamily::Retro, playful: false, mark_friendly: true, stage_friendly: false, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "glass_form", home_lane: LaneFamily::PremiumModern, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "embossed_grid", home_lane: LaneFamily::PremiumModern, playful: false, mark_friendly: true, stage_friendly: true, clutter_prone: false, brand_fit: true },
    StyleFamily { id: "monolith_glow", home_lane: LaneFamily::PremiumModern, playful: false, mark_friendly: false, stage_friendly: true, clutter_prone: false, brand_fit: true },
];

/// Motif keyword pool. Generic motifs are stock fallbacks and only surface
/// when allowed or when the specific pool runs dry.
pub static MOTIFS: [Motif; 16] = [
    Motif { id: "mountain ridge", generic: false },
    Motif { id: "open door", generic: false },
    Motif { id: "wheat field", generic: false },
    Motif { id: "lantern", generic: false },
    Motif { id: "tidal water", generic: false },
    Motif { id: "olive branch", generic: false },
    Motif { id: "woven thread", generic: false },
    Motif { id: "north star", generic: false },
    Motif { id: "broken chain", generic: false },
    Motif { id: "desert road", generic: false },
    Motif { id: "sunrise", generic: true },
    Motif { id: "clouds", generic: true },
    Motif { id: "abstract shapes", generic: true },
    Motif { id: "light rays", generic: true },
    Motif { id: "texture field", generic: true },
    Motif { id: "horizon line", generic: true },
];

/// Whole-word (or whole-phrase) matches that hard-veto playful styling.
pub static SOLEMN_KEYWORDS: [&str; 12] = [
    "good friday",
    "lament",
    "grief",
    "funeral",
    "memorial",
    "mourning",
    "suffering",
    "repentance",
    "ash wednesday",
    "crucifixion",
    "sorrow",
    "solemn",
];

/// Whole-word matches that raise the playful level when no solemn match vetoes.
pub static PLAYFUL_KEYWORDS: [&str; 12] = [
    "party",
    "celebration",
    "kids",
    "vbs",
    "summer",
    "carnival",
    "game night",
    "festival",
    "launch party",
    "picnic",
    "fun",
    "playful",
];

/// Look up a style family by id.
pub fn style_family(id: &str) -> Option<&'static StyleFamily> {
    STYLE_FAMILIES.iter().find(|s| s.id == id)
}

/// Templates whose preset is in the enabled set; an empty filter means the
/// full catalog is fair game.
pub fn enabled_templates(enabled_presets: &[String]) -> Vec<&'static DirectionTemplate> {
    if enabled_presets.is_empty() {
        return TEMPLATES.iter().collect();
    }
    let filtered: Vec<&'static DirectionTemplate> = TEMPLATES
        .iter()
        .filter(|t| enabled_presets.iter().any(|p| p == t.preset_id))
        .collect();
    if filtered.is_empty() {
        // A filter that matches nothing degrades to the full catalog rather
        // than failing the round.
        TEMPLATES.iter().collect()
    } else {
        filtered
    }
}
