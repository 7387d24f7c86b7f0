//! Ordered chain of response matchers.
//!
//! Currency runs first because conversion phrases are syntactically closest
//! to plain prose; physics runs before generic math formatting because
//! equation identification is the more specific heuristic.

use std::sync::Arc;

use snapsolve_core::Matcher;
use tracing::debug;

use crate::currency::CurrencyNormalizer;
use crate::math::MathFormatter;
use crate::physics::PhysicsMatcher;
use crate::rates::RateProvider;

pub struct ResponsePipeline {
    matchers: Vec<Box<dyn Matcher>>,
}

impl ResponsePipeline {
    /// The standard chain: currency, physics, math.
    pub fn new(rates: Arc<dyn RateProvider>) -> Self {
        Self::with_matchers(vec![
            Box::new(CurrencyNormalizer::new(rates)),
            Box::new(PhysicsMatcher),
            Box::new(MathFormatter),
        ])
    }

    /// Custom chain, mostly for tests and reordering experiments.
    pub fn with_matchers(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Run the raw model text through the chain; the first matcher to
    /// produce a result wins. Unmatched text passes through as-is.
    pub async fn classify_and_format(&self, raw_text: &str) -> String {
        for matcher in &self.matchers {
            if let Some(result) = matcher.attempt(raw_text).await {
                debug!(matcher = matcher.name(), "matcher produced structured result");
                return result;
            }
        }
        raw_text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    struct DeadRates;

    #[async_trait]
    impl RateProvider for DeadRates {
        async fn convert(&self, _from: &str, _to: &str, _amount: f64) -> Result<f64> {
            bail!("offline")
        }
    }

    fn pipeline() -> ResponsePipeline {
        ResponsePipeline::new(Arc::new(DeadRates))
    }

    #[tokio::test]
    async fn currency_wins_over_physics_and_math() {
        // Contains both a conversion phrase and digits a math pass would eat.
        let out = pipeline().classify_and_format("100 USD to EUR").await;
        assert!(out.contains("(approximate rate)"));
    }

    #[tokio::test]
    async fn physics_wins_over_math() {
        // "e=mc2" survives a numeric strip, but physics must claim it first.
        let out = pipeline().classify_and_format("E = mc2").await;
        assert!(out.contains("Mass-energy equivalence"));
    }

    #[tokio::test]
    async fn math_formats_when_others_pass() {
        let out = pipeline().classify_and_format("1/3 + 1/4").await;
        assert_eq!(out, "7/12");
    }

    #[tokio::test]
    async fn unmatched_text_passes_through() {
        let text = "a hand-drawn map of the campus";
        assert_eq!(pipeline().classify_and_format(text).await, text);
    }
}
