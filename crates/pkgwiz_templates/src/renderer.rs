//! Literal placeholder substitution.
//!
//! Templates carry `$TOKEN` placeholders in file contents, file names and
//! directory names. Rendering is plain find-and-replace-all, one pair at a
//! time, in the order the pairs were added.

use std::fmt;

/// Tokens recognised in package templates.
pub mod placeholders {
    pub const PACKAGE: &str = "$PACKAGE";
    pub const ORGANIZATION: &str = "$ORGANIZATION";
    pub const DISPLAY_NAME: &str = "$DISPLAY_NAME";
    pub const DESCRIPTION: &str = "$DESCRIPTION";
    pub const DEPENDENCIES: &str = "$DEPENDENCIES";
    pub const UNITY_VERSION: &str = "$UNITY_VERSION";
    pub const ASSEMBLY: &str = "$ASSEMBLY";

    pub const ALL: [&str; 7] = [
        PACKAGE,
        ORGANIZATION,
        DISPLAY_NAME,
        DESCRIPTION,
        DEPENDENCIES,
        UNITY_VERSION,
        ASSEMBLY,
    ];
}

/// Ordered `(placeholder, replacement)` pairs.
///
/// Each pair is applied to the output of the pairs before it, so a
/// replacement value containing a token handled by a *later* pair is
/// rewritten again, while one containing an *earlier* token is left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn with(mut self, placeholder: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.push(placeholder, replacement);
        self
    }

    pub fn push(&mut self, placeholder: impl Into<String>, replacement: impl Into<String>) {
        self.pairs.push((placeholder.into(), replacement.into()));
    }

    /// Render a unit of text.
    pub fn render(&self, text: &str) -> String {
        self.pairs
            .iter()
            .filter(|(placeholder, _)| !placeholder.is_empty())
            .fold(text.to_string(), |acc, (placeholder, replacement)| {
                acc.replace(placeholder.as_str(), replacement)
            })
    }

    /// True if any placeholder occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pairs
            .iter()
            .any(|(placeholder, _)| !placeholder.is_empty() && text.contains(placeholder.as_str()))
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(p, _)| p == placeholder)
            .map(|(_, r)| r.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(p, r)| (p.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<P: Into<String>, R: Into<String>> FromIterator<(P, R)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        let mut subs = Self::new();
        for (placeholder, replacement) in iter {
            subs.push(placeholder, replacement);
        }
        subs
    }
}

impl fmt::Display for Substitutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.pairs.iter().map(|(p, _)| p.as_str()).collect();
        write!(f, "[{}]", keys.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::placeholders::*;
    use super::*;

    #[test]
    fn test_render_single_token() {
        let subs = Substitutions::new().with(PACKAGE, "widgets");
        assert_eq!(subs.render("$PACKAGE"), "widgets");
    }

    #[test]
    fn test_render_all_occurrences() {
        let subs = Substitutions::new()
            .with(PACKAGE, "widgets")
            .with(ORGANIZATION, "acme");
        assert_eq!(
            subs.render("com.$ORGANIZATION.$PACKAGE ($PACKAGE)"),
            "com.acme.widgets (widgets)"
        );
    }

    #[test]
    fn test_render_idempotent_without_tokens_in_values() {
        let subs = Substitutions::new().with(PACKAGE, "widgets");
        let once = subs.render("name: $PACKAGE");
        assert_eq!(subs.render(&once), once);
    }

    #[test]
    fn test_render_not_idempotent_with_tokens_in_values() {
        let subs = Substitutions::new().with(PACKAGE, "$PACKAGE-core");
        let once = subs.render("$PACKAGE");
        assert_eq!(once, "$PACKAGE-core");
        assert_eq!(subs.render(&once), "$PACKAGE-core-core");
    }

    #[test]
    fn test_later_pairs_rewrite_earlier_output() {
        let subs = Substitutions::new()
            .with(DISPLAY_NAME, "$PACKAGE Tools")
            .with(PACKAGE, "widgets");
        assert_eq!(subs.render("$DISPLAY_NAME"), "widgets Tools");
    }

    #[test]
    fn test_earlier_pairs_do_not_rewrite_later_output() {
        let subs = Substitutions::new()
            .with(PACKAGE, "widgets")
            .with(DISPLAY_NAME, "$PACKAGE Tools");
        assert_eq!(subs.render("$DISPLAY_NAME"), "$PACKAGE Tools");
    }

    #[test]
    fn test_matches_and_lookup() {
        let subs: Substitutions = vec![(PACKAGE, "widgets"), (ASSEMBLY, "Acme.Widgets")]
            .into_iter()
            .collect();
        assert!(subs.matches("$PACKAGE-inner"));
        assert!(!subs.matches("Runtime"));
        assert_eq!(subs.get(ASSEMBLY), Some("Acme.Widgets"));
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.to_string(), "[$PACKAGE, $ASSEMBLY]");
    }
}
