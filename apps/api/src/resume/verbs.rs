//! Forbidden-verb accumulator for one rewrite pass.
//!
//! The rewriter threads a `ForbiddenVerbs` value through its entry loop:
//! entry i is prompted with the verbs of entries 0..i, then its own bullets
//! are absorbed for the entries that follow. A new pass starts empty.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenVerbs {
    verbs: BTreeSet<String>,
}

impl ForbiddenVerbs {
    /// Adds the leading verb of every bullet. Bullets without a usable
    /// leading word are skipped.
    pub fn absorb<S: AsRef<str>>(&mut self, bullets: &[S]) {
        self.verbs
            .extend(bullets.iter().filter_map(|b| leading_verb(b.as_ref())));
    }

    /// Comma-joined list for prompt rendering, in sorted order.
    pub fn render(&self) -> String {
        self.verbs
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[cfg(test)]
    pub fn contains(&self, verb: &str) -> bool {
        self.verbs.contains(verb)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }
}

/// First whitespace-delimited token, punctuation-trimmed, first letter
/// upper-cased and the rest lower-cased ("built," -> "Built").
pub fn leading_verb(bullet: &str) -> Option<String> {
    let word = bullet
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| c.is_ascii_punctuation());

    let mut chars = word.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_verb_normalization() {
        assert_eq!(leading_verb("Built a CI pipeline"), Some("Built".into()));
        assert_eq!(leading_verb("  engineered, then shipped"), Some("Engineered".into()));
        assert_eq!(leading_verb("LED. the team"), Some("Led".into()));
        assert_eq!(leading_verb("\"Reduced\" costs by 30%"), Some("Reduced".into()));
    }

    #[test]
    fn test_leading_verb_skips_empty_and_punctuation_only() {
        assert_eq!(leading_verb(""), None);
        assert_eq!(leading_verb("   "), None);
        assert_eq!(leading_verb("-- something"), None);
    }

    #[test]
    fn test_absorb_deduplicates_across_case() {
        let mut verbs = ForbiddenVerbs::default();
        verbs.absorb(&["Built X", "built Y", "Led Z"]);
        assert_eq!(verbs.len(), 2);
        assert!(verbs.contains("Built"));
        assert!(verbs.contains("Led"));
    }

    #[test]
    fn test_render_is_sorted_and_comma_joined() {
        let mut verbs = ForbiddenVerbs::default();
        assert_eq!(verbs.render(), "");
        verbs.absorb(&["Led a team", "Automated deploys"]);
        assert_eq!(verbs.render(), "Automated, Led");
    }

    #[test]
    fn test_absorb_is_monotonic() {
        let mut verbs = ForbiddenVerbs::default();
        let mut previous = 0;
        let batches: [&[&str]; 4] = [&["Built a"], &["Built b", "Led c"], &[""], &["Scaled d"]];
        for batch in batches {
            verbs.absorb(batch);
            assert!(verbs.len() >= previous);
            previous = verbs.len();
        }
        assert_eq!(previous, 3);
    }
}
