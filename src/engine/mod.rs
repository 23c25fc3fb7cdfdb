//! The recommendation pipeline: hard-constraint filtering, weighted
//! scoring, shortlist diversification, progressive relaxation, and
//! deterministic fallback copy. Every stage is a pure function over
//! immutable inputs; the only randomness is the injected rng used by the
//! diversity passes.

pub mod diversity;
pub mod fallback;
pub mod filter;
pub mod refine;
pub mod relaxation;
pub mod scoring;

pub use scoring::ScoredCostume;
