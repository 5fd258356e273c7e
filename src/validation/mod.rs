//! Generation validator / retry orchestrator
//!
//! Wraps the external image-generation capability with ordered acceptance
//! checks, each bounded by its own retry ceiling: originality guard first,
//! then text-leakage detection, then palette compliance. Failed attempts
//! append escalating corrective text to the prompt before regenerating. A
//! slot that exhausts a ceiling is still delivered, with its retry counters
//! recorded; only a failure of the generation provider itself is fatal.

pub mod originality;
pub mod palette;
pub mod retry;
pub mod text_leak;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::providers::{ImageGenerator, Raster, VisionTextClassifier};
use self::originality::{too_similar, ReferenceHash};
use self::palette::{score_palette, AllowedPalette, PaletteComplianceScore};
use self::retry::RetryMachine;
use self::text_leak::{detect_text, TextVerdict};

/// Attempt ceilings per category (attempts = retries + 1). Fixed by design,
/// never caller-configurable, so worst-case latency and cost stay bounded.
const ORIGINALITY_MAX_ATTEMPTS: u8 = 2;
const TEXT_MAX_ATTEMPTS: u8 = 3;
const PALETTE_MAX_ATTEMPTS: u8 = 2;

/// Appended when the candidate lands too close to a reference image.
const ORIGINALITY_SUFFIX: &str = "Rework the composition with clearly different \
geometry, layout, and focal placement while preserving the established mood.";

/// Escalating zero-text instructions, one per failed text attempt.
const TEXT_SUFFIXES: [&str; 2] = [
    "Do not include any text, letters, numbers, or typography in the image.",
    "ABSOLUTELY ZERO text of any kind: no letters, words, numerals, captions, \
signage, logos, or watermarks anywhere in the frame.",
];

/// Appended when the palette score fails.
const PALETTE_SUFFIX: &str = "Hard constraint: use only the approved brand \
colors and their tints and shades. No other hues may appear anywhere.";

/// One slot's generation request: the built prompt plus render parameters.
#[derive(Debug, Clone, Default)]
pub struct SlotRequest {
    pub prompt: String,
    pub size: (u32, u32),
    /// Optional reference images forwarded to providers that support them.
    pub references: Vec<Raster>,
}

impl SlotRequest {
    pub fn new(prompt: impl Into<String>, size: (u32, u32)) -> Self {
        Self {
            prompt: prompt.into(),
            size,
            references: Vec::new(),
        }
    }
}

/// Final product of one slot: the accepted raster plus the small counters
/// that survive the call. Everything else about intermediate attempts is
/// logged and dropped.
#[derive(Debug, Clone)]
pub struct ValidatedSlot {
    pub raster: Raster,
    pub prompt_used: String,
    pub text_retry_count: u8,
    pub palette_retry_count: u8,
    pub palette_score: Option<PaletteComplianceScore>,
    pub originality_retried: bool,
}

/// Orchestrates provider calls and acceptance checks for one round's slots.
///
/// Holds no mutable state: the reference corpus and palette are loaded once
/// and treated as immutable, so independent slots may run concurrently at the
/// caller's discretion.
pub struct GenerationOrchestrator {
    generator: Arc<dyn ImageGenerator>,
    vision: Option<Arc<dyn VisionTextClassifier>>,
    reference_corpus: Vec<ReferenceHash>,
    allowed_palette: Option<AllowedPalette>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            vision: None,
            reference_corpus: Vec::new(),
            allowed_palette: None,
        }
    }

    pub fn with_vision_classifier(mut self, vision: Arc<dyn VisionTextClassifier>) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_reference_corpus(mut self, corpus: Vec<ReferenceHash>) -> Self {
        self.reference_corpus = corpus;
        self
    }

    pub fn with_allowed_palette(mut self, palette: AllowedPalette) -> Self {
        self.allowed_palette = Some(palette);
        self
    }

    /// Generate and validate one slot. Provider errors propagate unmodified;
    /// every analysis failure fails open.
    pub async fn generate(&self, request: &SlotRequest) -> Result<ValidatedSlot> {
        let mut prompt = request.prompt.clone();
        let mut raster = self
            .generator
            .invoke(&prompt, request.size, &request.references)
            .await?;

        let originality_retried = {
            let mut machine = RetryMachine::new(ORIGINALITY_MAX_ATTEMPTS);
            let _ = machine.begin_attempt();
            let distinct = !too_similar(&raster, &self.reference_corpus);
            debug!(passed = distinct, "originality checked");
            machine.observe(distinct);
            if !distinct && machine.begin_attempt().is_some() {
                prompt = format!("{} {}", prompt, ORIGINALITY_SUFFIX);
                debug!(prompt = %prompt, "regenerating with altered-composition instruction");
                raster = self
                    .generator
                    .invoke(&prompt, request.size, &request.references)
                    .await?;
                // The regenerated raster is accepted without a second
                // distance check.
                machine.observe(true);
                true
            } else {
                false
            }
        };

        let mut text = RetryMachine::new(TEXT_MAX_ATTEMPTS);
        while let Some(attempt) = text.begin_attempt() {
            let passed = self.text_check(&raster).await;
            debug!(attempt, passed, "text-leak checked");
            text.observe(passed);
            if text.is_terminal() {
                if !passed {
                    warn!(attempt, "text check exhausted, delivering best effort");
                }
                break;
            }
            let suffix = TEXT_SUFFIXES[(attempt as usize - 1).min(TEXT_SUFFIXES.len() - 1)];
            prompt = format!("{} {}", prompt, suffix);
            debug!(attempt, prompt = %prompt, "regenerating with zero-text instruction");
            raster = self
                .generator
                .invoke(&prompt, request.size, &request.references)
                .await?;
        }

        let mut palette_score = None;
        let mut palette_retry_count = 0;
        if let Some(palette) = &self.allowed_palette {
            let mut machine = RetryMachine::new(PALETTE_MAX_ATTEMPTS);
            while let Some(attempt) = machine.begin_attempt() {
                let score = score_palette(&raster, palette);
                let compliant = score.is_compliant;
                debug!(attempt, compliant, ratio = score.far_sample_ratio, "palette checked");
                palette_score = Some(score);
                machine.observe(compliant);
                if machine.is_terminal() {
                    if !compliant {
                        warn!(attempt, "palette check exhausted, delivering best effort");
                    }
                    break;
                }
                prompt = format!("{} {}", prompt, PALETTE_SUFFIX);
                debug!(attempt, prompt = %prompt, "regenerating with hard palette constraint");
                raster = self
                    .generator
                    .invoke(&prompt, request.size, &request.references)
                    .await?;
            }
            palette_retry_count = machine.retries();
        }

        info!(
            text_retries = text.retries(),
            palette_retries = palette_retry_count,
            originality_retried,
            "slot validated"
        );
        Ok(ValidatedSlot {
            raster,
            prompt_used: prompt,
            text_retry_count: text.retries(),
            palette_retry_count,
            palette_score,
            originality_retried,
        })
    }

    /// Validate a whole round sequentially, preserving slot order.
    pub async fn generate_round(&self, requests: &[SlotRequest]) -> Result<Vec<ValidatedSlot>> {
        let mut slots = Vec::with_capacity(requests.len());
        for request in requests {
            slots.push(self.generate(request).await?);
        }
        Ok(slots)
    }

    /// Heuristic first; the vision classifier only breaks Inconclusive ties,
    /// and its failure defaults to "no text".
    async fn text_check(&self, raster: &Raster) -> bool {
        match detect_text(raster) {
            TextVerdict::Clean => true,
            TextVerdict::TextLikely => false,
            TextVerdict::Inconclusive => match &self.vision {
                Some(classifier) => match classifier.contains_text(raster).await {
                    Ok(has_text) => !has_text,
                    Err(e) => {
                        warn!(error = %e, "vision classifier failed, treating as clean");
                        true
                    }
                },
                None => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::GenerationError;
    use async_trait::async_trait;
    use image::Rgba;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGenerator {
        raster: Raster,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageGenerator for FixedGenerator {
        async fn invoke(
            &self,
            _prompt: &str,
            _size: (u32, u32),
            _references: &[Raster],
        ) -> Result<Raster, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.raster.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl VisionTextClassifier for FailingClassifier {
        async fn contains_text(&self, _raster: &Raster) -> Result<bool> {
            anyhow::bail!("classifier offline")
        }
    }

    fn plain_raster() -> Raster {
        Raster::from_pixel(128, 128, Rgba([40, 90, 170, 255]))
    }

    /// A few dark blocks on a light field: inconclusive to the heuristic.
    fn suspect_raster() -> Raster {
        let mut raster = Raster::from_pixel(160, 48, Rgba([240, 240, 240, 255]));
        for b in 0..4u32 {
            let x0 = 6 + b * 12;
            for y in 16..28 {
                for x in x0..x0 + 7 {
                    raster.put_pixel(x, y, Rgba([15, 15, 15, 255]));
                }
            }
        }
        raster
    }

    #[tokio::test]
    async fn test_clean_slot_single_call() {
        let generator = Arc::new(FixedGenerator {
            raster: plain_raster(),
            calls: AtomicUsize::new(0),
        });
        let orchestrator = GenerationOrchestrator::new(generator.clone());
        let slot = orchestrator
            .generate(&SlotRequest::new("calm blue field", (128, 128)))
            .await
            .unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(slot.text_retry_count, 0);
        assert_eq!(slot.palette_retry_count, 0);
        assert!(!slot.originality_retried);
        assert!(slot.palette_score.is_none());
        assert_eq!(slot.prompt_used, "calm blue field");
    }

    #[tokio::test]
    async fn test_classifier_failure_fails_open() {
        let generator = Arc::new(FixedGenerator {
            raster: suspect_raster(),
            calls: AtomicUsize::new(0),
        });
        let orchestrator = GenerationOrchestrator::new(generator.clone())
            .with_vision_classifier(Arc::new(FailingClassifier));
        // The heuristic defers to the classifier, whose failure must never
        // block delivery.
        let slot = orchestrator
            .generate(&SlotRequest::new("field", (160, 48)))
            .await
            .unwrap();
        assert_eq!(slot.text_retry_count, 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
