//! Heuristic post-processing of raw model text.
//!
//! Three matchers run in a fixed priority order — currency conversion,
//! physics equation identification, math answer formatting — and the first
//! one that applies wins. Anything unmatched passes through unchanged.

pub mod currency;
pub mod eval;
pub mod math;
pub mod physics;
pub mod pipeline;
pub mod rates;

pub use currency::{CurrencyNormalizer, ConversionQuery};
pub use math::{format_math_expression, MathFormatter};
pub use physics::{analyze_physics_equation, PhysicsMatcher};
pub use pipeline::ResponsePipeline;
pub use rates::{fallback_rate, LiveRateClient, RateProvider};
