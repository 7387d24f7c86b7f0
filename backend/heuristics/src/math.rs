//! Math answer extraction from free-form explanatory text.
//!
//! Three strategies of decreasing specificity: a `\boxed{...}` answer, a
//! labeled "answer/result/solution" line, then restricted arithmetic
//! evaluation of whatever expression survives sanitizing. If nothing
//! applies, the trimmed input comes back unchanged.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use snapsolve_core::Matcher;

use crate::eval::{approximate_fraction, eval_arithmetic};

static BOXED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\boxed\s*\{([^{}]*)\}").unwrap());

// "The answer is 3.5", "Result: 42", "solution = 7/12"
static LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:answer|result|solution)\b(?:\s+is)?[\s:=]*([^\r\n]+)").unwrap()
});

static FRAC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[dt]?frac\s*\{([^{}]*)\}\s*\{([^{}]*)\}").unwrap());

static NUMBER_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

/// Extract a final answer from explanatory model text. Never fails; the
/// trimmed input is the last resort.
pub fn format_math_expression(text: &str) -> String {
    let cleaned = strip_latex_markers(text);

    if let Some(answer) = extract_boxed(&cleaned) {
        return answer;
    }
    if let Some(answer) = extract_labeled(&cleaned) {
        return answer;
    }
    if let Some(answer) = evaluate_expression(&cleaned) {
        return answer;
    }
    text.trim().to_string()
}

/// Remove math-mode dollars and rewrite `\frac{a}{b}` as `(a)/(b)` so the
/// later strategies see plain arithmetic.
fn strip_latex_markers(text: &str) -> String {
    let rewritten = FRAC_RE.replace_all(text, "($1)/($2)");
    rewritten.replace('$', "")
}

fn extract_boxed(text: &str) -> Option<String> {
    let inner = BOXED_RE.captures(text)?.get(1)?.as_str().trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

fn extract_labeled(text: &str) -> Option<String> {
    let rest = LABELED_RE.captures(text)?.get(1)?.as_str();
    let stripped: String = rest
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\'))
        .collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.to_string())
}

fn evaluate_expression(text: &str) -> Option<String> {
    let expr: String = text
        .chars()
        .filter(|c| {
            c.is_ascii_digit()
                || c.is_whitespace()
                || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
        })
        .collect();
    let expr = expr.trim();
    if !expr.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    // A lone numeric literal is already a final answer; re-rendering it as
    // a fraction would break idempotence.
    if NUMBER_LITERAL_RE.is_match(expr) {
        return Some(expr.to_string());
    }
    let value = eval_arithmetic(expr).ok()?;
    Some(render_number(value))
}

fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    match approximate_fraction(value, 1e-9, 10_000) {
        Some((numerator, denominator)) => format!("{numerator}/{denominator}"),
        None => format!("{value}"),
    }
}

/// Pipeline wrapper. `attempt` yields `None` when formatting would leave
/// the text unchanged, so the pipeline's passthrough arm returns the raw
/// text as-is.
pub struct MathFormatter;

#[async_trait]
impl Matcher for MathFormatter {
    fn name(&self) -> &'static str {
        "math"
    }

    async fn attempt(&self, text: &str) -> Option<String> {
        let formatted = format_math_expression(text);
        if formatted == text.trim() {
            None
        } else {
            Some(formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_answer_extracted() {
        assert_eq!(format_math_expression("\\boxed{7/12}"), "7/12");
        assert_eq!(
            format_math_expression("Therefore $\\boxed{ 42 }$ is the result of the sum"),
            "42"
        );
    }

    #[test]
    fn labeled_answer_extracted() {
        assert_eq!(format_math_expression("The answer is 3.5"), "3.5");
        assert_eq!(format_math_expression("Result: 42"), "42");
        assert_eq!(format_math_expression("the solution is \\{x = 2\\}"), "x = 2");
    }

    #[test]
    fn arithmetic_evaluated_to_fraction() {
        assert_eq!(format_math_expression("1/3 + 1/4"), "7/12");
    }

    #[test]
    fn arithmetic_evaluated_to_integer() {
        assert_eq!(format_math_expression("2+2"), "4");
        assert_eq!(format_math_expression("(2 + 3) * 4"), "20");
    }

    #[test]
    fn frac_macro_rewritten_before_evaluation() {
        assert_eq!(format_math_expression("\\frac{1}{3} + \\frac{1}{4}"), "7/12");
    }

    #[test]
    fn idempotent_on_already_formatted_answers() {
        assert_eq!(format_math_expression("3.5"), "3.5");
        assert_eq!(format_math_expression("7/12"), "7/12");
        assert_eq!(format_math_expression("42"), "42");
    }

    #[test]
    fn division_by_zero_falls_through_to_original() {
        assert_eq!(format_math_expression("1/0"), "1/0");
    }

    #[test]
    fn prose_without_expression_returned_trimmed() {
        assert_eq!(
            format_math_expression("  a photo of a cat on a desk  "),
            "a photo of a cat on a desk"
        );
        // Digits scattered through prose do not form a valid expression.
        assert_eq!(
            format_math_expression("there are 3 cats and 4 dogs"),
            "there are 3 cats and 4 dogs"
        );
    }

    #[test]
    fn boxed_takes_priority_over_label() {
        assert_eq!(
            format_math_expression("The answer is \\boxed{9}"),
            "9"
        );
    }

    #[tokio::test]
    async fn matcher_is_none_when_unchanged() {
        assert!(MathFormatter.attempt("a photo of a cat").await.is_none());
        assert_eq!(
            MathFormatter.attempt("1/3 + 1/4").await.as_deref(),
            Some("7/12")
        );
    }
}
