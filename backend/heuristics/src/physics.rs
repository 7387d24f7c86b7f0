//! Physics equation identification by shape matching.
//!
//! Equations are matched against a fixed library after stripping all
//! whitespace, case-insensitively, as a full-string match. Fragments or
//! equations embedded in a longer sentence never match.

use async_trait::async_trait;
use snapsolve_core::Matcher;

/// Canonical equations, in match order. Extend by adding pairs; the matcher
/// logic never changes.
const EQUATION_LIBRARY: &[(&str, &str)] = &[
    ("f=ma", "Newton's second law: force equals mass times acceleration"),
    (
        "e=mc^2",
        "Mass-energy equivalence: energy equals mass times the speed of light squared",
    ),
    (
        "e=mc2",
        "Mass-energy equivalence: energy equals mass times the speed of light squared",
    ),
    (
        "v=u+at",
        "First kinematic equation: final velocity under constant acceleration",
    ),
    (
        "s=ut+1/2at^2",
        "Second kinematic equation: displacement under constant acceleration",
    ),
    (
        "v^2=u^2+2as",
        "Third kinematic equation: relating velocity and displacement under constant acceleration",
    ),
    ("v=ir", "Ohm's law: voltage equals current times resistance"),
    ("i=v/r", "Ohm's law: current equals voltage divided by resistance"),
    (
        "f=gm1m2/r^2",
        "Newton's law of universal gravitation: attraction between two masses",
    ),
    ("ke=1/2mv^2", "Kinetic energy of a moving body"),
    ("pe=mgh", "Gravitational potential energy near the Earth's surface"),
    (
        "v=f\u{03BB}",
        "Wave equation: wave speed equals frequency times wavelength",
    ),
];

/// Identify a canonical physics equation, returning its description.
pub fn analyze_physics_equation(text: &str) -> Option<&'static str> {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if stripped.is_empty() {
        return None;
    }
    EQUATION_LIBRARY
        .iter()
        .find(|(pattern, _)| *pattern == stripped)
        .map(|(_, description)| *description)
}

pub struct PhysicsMatcher;

#[async_trait]
impl Matcher for PhysicsMatcher {
    fn name(&self) -> &'static str {
        "physics"
    }

    async fn attempt(&self, text: &str) -> Option<String> {
        analyze_physics_equation(text).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_newtons_second_law() {
        let desc = analyze_physics_equation("F=ma").unwrap();
        assert!(desc.contains("Newton's second law"));
    }

    #[test]
    fn whitespace_and_case_insensitive() {
        assert_eq!(
            analyze_physics_equation("  f = M a "),
            analyze_physics_equation("F=ma")
        );
        assert!(analyze_physics_equation("E = m c ^ 2").is_some());
    }

    #[test]
    fn partial_equation_does_not_match() {
        assert!(analyze_physics_equation("F = m a + 1").is_none());
        assert!(analyze_physics_equation("F=m").is_none());
    }

    #[test]
    fn embedded_equation_does_not_match() {
        assert!(analyze_physics_equation("as we know, F=ma holds").is_none());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(analyze_physics_equation("   ").is_none());
    }

    #[test]
    fn matches_wave_equation() {
        let desc = analyze_physics_equation("v = f\u{03BB}").unwrap();
        assert!(desc.contains("wavelength"));
    }
}
