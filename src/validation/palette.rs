//! Palette compliance
//!
//! Samples a fixed grid of non-transparent pixels and scores each against the
//! allowed brand palette, expanded with tint/shade variants and fixed
//! neutrals. A raster is non-compliant when too many samples sit far from
//! every allowed color.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::providers::Raster;

/// Sampling grid.
const GRID_COLS: u32 = 40;
const GRID_ROWS: u32 = 20;
/// Samples below this alpha are skipped entirely.
const MIN_ALPHA: u8 = 16;
/// Euclidean RGB distance beyond which a sample counts as far.
const FAR_DISTANCE: f32 = 60.0;
/// Far-sample ratio above which the raster is non-compliant.
const FAR_RATIO: f32 = 0.18;
/// Tint/shade blend factors applied to every allowed color.
const VARIANT_BLENDS: [f32; 2] = [0.25, 0.5];
/// Neutrals always admitted alongside the brand colors.
const NEUTRALS: [[u8; 3]; 5] = [
    [0, 0, 0],
    [255, 255, 255],
    [64, 64, 64],
    [128, 128, 128],
    [192, 192, 192],
];

/// Brand palette configured for a round, pre-expanded for scoring.
#[derive(Debug, Clone)]
pub struct AllowedPalette {
    expanded: Vec<[u8; 3]>,
}

impl AllowedPalette {
    /// Expand the base colors with tints (toward white), shades (toward
    /// black), and the fixed neutral set.
    pub fn new(base_colors: &[[u8; 3]]) -> Self {
        let mut expanded: Vec<[u8; 3]> = Vec::new();
        for color in base_colors {
            expanded.push(*color);
            for blend in VARIANT_BLENDS {
                expanded.push(mix(*color, [255, 255, 255], blend));
                expanded.push(mix(*color, [0, 0, 0], blend));
            }
        }
        expanded.extend(NEUTRALS);
        Self { expanded }
    }

    fn nearest_distance(&self, rgb: [u8; 3]) -> f32 {
        self.expanded
            .iter()
            .map(|c| distance(rgb, *c))
            .fold(f32::INFINITY, f32::min)
    }
}

fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [
        channel(a[0], b[0]),
        channel(a[1], b[1]),
        channel(a[2], b[2]),
    ]
}

fn distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    let dr = a[0] as f32 - b[0] as f32;
    let dg = a[1] as f32 - b[1] as f32;
    let db = a[2] as f32 - b[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Result of scoring one raster against the allowed palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteComplianceScore {
    pub sample_count: usize,
    pub far_sample_count: usize,
    pub far_sample_ratio: f32,
    pub distance_threshold: f32,
    pub ratio_threshold: f32,
    pub average_nearest_distance: f32,
    pub is_compliant: bool,
}

/// Score a raster on the fixed sampling grid. A raster with no opaque samples
/// (including a zero-dimension raster) is vacuously compliant.
pub fn score_palette(raster: &Raster, palette: &AllowedPalette) -> PaletteComplianceScore {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        debug!("palette scoring skipped, empty raster");
        return PaletteComplianceScore {
            sample_count: 0,
            far_sample_count: 0,
            far_sample_ratio: 0.0,
            distance_threshold: FAR_DISTANCE,
            ratio_threshold: FAR_RATIO,
            average_nearest_distance: 0.0,
            is_compliant: true,
        };
    }
    let mut sample_count = 0usize;
    let mut far_sample_count = 0usize;
    let mut distance_sum = 0f32;

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let x = (col * w + w / 2) / GRID_COLS.max(1);
            let y = (row * h + h / 2) / GRID_ROWS.max(1);
            let pixel = raster.get_pixel(x.min(w - 1), y.min(h - 1)).0;
            if pixel[3] < MIN_ALPHA {
                continue;
            }
            let nearest = palette.nearest_distance([pixel[0], pixel[1], pixel[2]]);
            sample_count += 1;
            distance_sum += nearest;
            if nearest > FAR_DISTANCE {
                far_sample_count += 1;
            }
        }
    }

    let far_sample_ratio = if sample_count == 0 {
        0.0
    } else {
        far_sample_count as f32 / sample_count as f32
    };
    let average_nearest_distance = if sample_count == 0 {
        0.0
    } else {
        distance_sum / sample_count as f32
    };
    let score = PaletteComplianceScore {
        sample_count,
        far_sample_count,
        far_sample_ratio,
        distance_threshold: FAR_DISTANCE,
        ratio_threshold: FAR_RATIO,
        average_nearest_distance,
        is_compliant: far_sample_ratio <= FAR_RATIO,
    };
    debug!(
        samples = score.sample_count,
        far = score.far_sample_count,
        ratio = score.far_sample_ratio,
        compliant = score.is_compliant,
        "palette scored"
    );
    score
}
