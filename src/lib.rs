//! Art Direction Core
//!
//! Seeded creative-direction planning plus a validated image-generation
//! pipeline:
//! - Deterministic planner: lane rotation, greedy template diversity,
//!   intent-aware style families, motif rotation
//! - Validator/retry orchestrator: originality guard (dHash), text-leakage
//!   heuristic with optional vision fallback, palette compliance
//! - Provider seams for OpenAI-compatible image and vision endpoints
//!
//! The planner is pure and synchronous; the orchestrator performs sequential
//! provider calls per slot. Rendering, layout, and persistence live in
//! external collaborators.

pub mod planner;
pub mod providers;
pub mod validation;

// Re-exports for convenience
pub use planner::types::PlannedDirectionSpec;
pub use planner::{plan_round, PlanRequest};
pub use providers::{ImageGenerator, Raster, VisionTextClassifier};
pub use validation::{GenerationOrchestrator, SlotRequest, ValidatedSlot};
