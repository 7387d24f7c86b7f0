use async_trait::async_trait;

/// A single post-processing heuristic in the response pipeline.
///
/// Matchers are tried in a fixed priority order against the raw model text.
/// `None` means "this heuristic does not apply here"; the pipeline moves on
/// to the next matcher.
#[async_trait]
pub trait Matcher: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Attempt to produce a structured result from the model text.
    async fn attempt(&self, text: &str) -> Option<String>;
}
