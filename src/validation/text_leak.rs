//! Text-leakage detection
//!
//! Cheap heuristic pass: downscale, grayscale, two-tap gradient magnitude,
//! threshold into an edge mask, then connected-component analysis looking for
//! clusters of glyph-shaped components. A frame whose edge density falls
//! outside the plausible band for rendered text skips straight to clean.
//! Anything between "clearly clean" and "clearly text" is Inconclusive and
//! left to the external vision classifier.

use image::imageops::FilterType;
use image::GrayImage;
use tracing::debug;

use crate::providers::Raster;

/// Longest analysis edge after downscaling.
const MAX_ANALYSIS_DIM: u32 = 160;
/// Two-tap gradient magnitude at or above this lands in the edge mask.
const EDGE_THRESHOLD: i16 = 24;
/// Edge-density band where rendered text is plausible at all.
const MIN_EDGE_DENSITY: f32 = 0.015;
const MAX_EDGE_DENSITY: f32 = 0.35;
/// Component counts: at or above `TEXT_COMPONENTS` the frame is flagged;
/// at or above `SUSPECT_COMPONENTS` it is handed to the classifier.
const TEXT_COMPONENTS: usize = 10;
const SUSPECT_COMPONENTS: usize = 3;

// Glyph-likeness bands, all of which must hold simultaneously.
const GLYPH_ASPECT: (f32, f32) = (0.15, 8.0);
const GLYPH_AREA: (u32, u32) = (8, 600);
const GLYPH_BBOX_AREA: (u32, u32) = (12, 1200);
const GLYPH_FILL: (f32, f32) = (0.2, 0.95);

/// Heuristic outcome for one raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVerdict {
    Clean,
    /// Some glyph-like structure, below the flagging count.
    Inconclusive,
    TextLikely,
}

struct Component {
    area: u32,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl Component {
    fn glyph_like(&self) -> bool {
        let w = (self.max_x - self.min_x + 1) as f32;
        let h = (self.max_y - self.min_y + 1) as f32;
        let aspect = w / h;
        let bbox = w * h;
        let fill = self.area as f32 / bbox;
        (GLYPH_ASPECT.0..=GLYPH_ASPECT.1).contains(&aspect)
            && (GLYPH_AREA.0..=GLYPH_AREA.1).contains(&self.area)
            && (GLYPH_BBOX_AREA.0 as f32..=GLYPH_BBOX_AREA.1 as f32).contains(&bbox)
            && (GLYPH_FILL.0..=GLYPH_FILL.1).contains(&fill)
    }
}

fn downscaled_gray(raster: &Raster) -> GrayImage {
    let gray = image::imageops::grayscale(raster);
    let (w, h) = gray.dimensions();
    let longest = w.max(h);
    if longest <= MAX_ANALYSIS_DIM {
        return gray;
    }
    let nw = (w * MAX_ANALYSIS_DIM / longest).max(1);
    let nh = (h * MAX_ANALYSIS_DIM / longest).max(1);
    image::imageops::resize(&gray, nw, nh, FilterType::Triangle)
}

/// Edge mask from a two-tap gradient: |right-self| + |below-self| per pixel.
fn edge_mask(gray: &GrayImage) -> (Vec<bool>, u32, u32) {
    let (w, h) = gray.dimensions();
    let mut mask = vec![false; (w * h) as usize];
    for y in 0..h.saturating_sub(1) {
        for x in 0..w.saturating_sub(1) {
            let p = gray.get_pixel(x, y).0[0] as i16;
            let gx = (gray.get_pixel(x + 1, y).0[0] as i16 - p).abs();
            let gy = (gray.get_pixel(x, y + 1).0[0] as i16 - p).abs();
            if gx + gy >= EDGE_THRESHOLD {
                mask[(y * w + x) as usize] = true;
            }
        }
    }
    (mask, w, h)
}

/// 4-connected components over the edge mask.
fn components(mask: &[bool], w: u32, h: u32) -> Vec<Component> {
    let mut visited = vec![false; mask.len()];
    let mut out = Vec::new();
    let mut stack = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut comp = Component {
            area: 0,
            min_x: u32::MAX,
            max_x: 0,
            min_y: u32::MAX,
            max_y: 0,
        };
        while let Some(idx) = stack.pop() {
            let x = idx as u32 % w;
            let y = idx as u32 / w;
            comp.area += 1;
            comp.min_x = comp.min_x.min(x);
            comp.max_x = comp.max_x.max(x);
            comp.min_y = comp.min_y.min(y);
            comp.max_y = comp.max_y.max(y);

            let mut push = |nx: u32, ny: u32| {
                let nidx = (ny * w + nx) as usize;
                if mask[nidx] && !visited[nidx] {
                    visited[nidx] = true;
                    stack.push(nidx);
                }
            };
            if x > 0 {
                push(x - 1, y);
            }
            if x + 1 < w {
                push(x + 1, y);
            }
            if y > 0 {
                push(x, y - 1);
            }
            if y + 1 < h {
                push(x, y + 1);
            }
        }
        out.push(comp);
    }
    out
}

/// Run the heuristic over one raster.
pub fn detect_text(raster: &Raster) -> TextVerdict {
    let gray = downscaled_gray(raster);
    let (mask, w, h) = edge_mask(&gray);
    let total = (w * h) as f32;
    if total == 0.0 {
        return TextVerdict::Clean;
    }
    let density = mask.iter().filter(|e| **e).count() as f32 / total;
    if !(MIN_EDGE_DENSITY..=MAX_EDGE_DENSITY).contains(&density) {
        debug!(density, "edge density outside text band, treating as clean");
        return TextVerdict::Clean;
    }

    let glyphs = components(&mask, w, h)
        .iter()
        .filter(|c| c.glyph_like())
        .count();
    debug!(density, glyphs, "text heuristic evaluated");
    if glyphs >= TEXT_COMPONENTS {
        TextVerdict::TextLikely
    } else if glyphs >= SUSPECT_COMPONENTS {
        TextVerdict::Inconclusive
    } else {
        TextVerdict::Clean
    }
}
