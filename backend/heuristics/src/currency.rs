//! Currency conversion detection and normalization.
//!
//! Looks for `<amount> <currency> to <currency>` phrases in the model text,
//! resolves the pair against the live rate service, and falls back to the
//! static table when that fails.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use snapsolve_core::Matcher;
use tracing::warn;

use crate::rates::{fallback_rate, RateProvider};

/// A detected conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionQuery {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

// `\x{20AC}` euro, `\x{00A3}` pound, `\x{00A5}` yen, `\x{20B9}` rupee.
static CONVERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*([$\x{20AC}\x{00A3}\x{00A5}\x{20B9}]|[A-Za-z]{3})\s+to\s+([$\x{20AC}\x{00A3}\x{00A5}\x{20B9}]|[A-Za-z]{3})",
    )
    .unwrap()
});

// Standalone word only. The obvious `replace("in", ...)` corrupts words
// like "coin", so this is word-boundary matched (case-sensitive).
static IN_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bin\b").unwrap());

/// Map a currency symbol to its 3-letter code; other tokens are uppercased
/// as-is, with no validation against a known currency list.
fn resolve_code(token: &str) -> String {
    match token {
        "$" => "USD".to_string(),
        "\u{20AC}" => "EUR".to_string(),
        "\u{00A3}" => "GBP".to_string(),
        "\u{00A5}" => "JPY".to_string(),
        "\u{20B9}" => "INR".to_string(),
        other => other.to_uppercase(),
    }
}

/// Parse a conversion request out of free-form text, if one is present.
pub fn parse_conversion_query(text: &str) -> Option<ConversionQuery> {
    let normalized = text.replace("->", " to ");
    let normalized = IN_WORD_RE.replace_all(&normalized, " to ");

    let caps = CONVERSION_RE.captures(&normalized)?;
    let amount: f64 = caps[1].parse().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    Some(ConversionQuery {
        amount,
        from: resolve_code(&caps[2]),
        to: resolve_code(&caps[3]),
    })
}

/// Detects conversion phrases and renders them with a live or approximate
/// rate.
pub struct CurrencyNormalizer {
    provider: Arc<dyn RateProvider>,
}

impl CurrencyNormalizer {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// `None` means "no conversion request detected". A detected request
    /// always yields a displayable string, even when no rate is available.
    pub async fn convert_currency(&self, text: &str) -> Option<String> {
        let query = parse_conversion_query(text)?;
        match self
            .provider
            .convert(&query.from, &query.to, query.amount)
            .await
        {
            Ok(converted) => Some(format!(
                "{} {} = {:.2} {} (live rate)",
                query.amount, query.from, converted, query.to
            )),
            Err(err) => {
                warn!(
                    error = %err,
                    from = %query.from,
                    to = %query.to,
                    "live rate lookup failed, using fallback table"
                );
                match fallback_rate(&query.from, &query.to) {
                    Some(rate) => Some(format!(
                        "{} {} \u{2248} {:.2} {} (approximate rate)",
                        query.amount,
                        query.from,
                        query.amount * rate,
                        query.to
                    )),
                    None => Some(format!(
                        "Conversion rate for {} to {} is currently unavailable",
                        query.from, query.to
                    )),
                }
            }
        }
    }
}

#[async_trait]
impl Matcher for CurrencyNormalizer {
    fn name(&self) -> &'static str {
        "currency"
    }

    async fn attempt(&self, text: &str) -> Option<String> {
        self.convert_currency(text).await
    }
}
