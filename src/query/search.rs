/// Case-insensitive substring search term.
///
/// No tokenization or ranking: an entity matches when its searchable field
/// contains the term, ignoring case. The empty term matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    /// `ILIKE` pattern for this term; use with `ESCAPE '\'`
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for c in self.raw.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

impl From<&str> for SearchTerm {
    fn from(term: &str) -> Self {
        Self::new(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_on_both_sides() {
        assert!(SearchTerm::new("hop").matches("The Musical Hop"));
        assert!(SearchTerm::new("MUSIC").matches("Park Square Live Music & Coffee"));
        assert!(SearchTerm::new("band").matches("The Wild Sax Band"));
        assert!(!SearchTerm::new("band").matches("Guns N Petals"));
    }

    #[test]
    fn empty_term_matches_everything() {
        let term = SearchTerm::new("");
        assert!(term.is_empty());
        assert!(term.matches(""));
        assert!(term.matches("anything"));
        assert_eq!(term.like_pattern(), "%%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(SearchTerm::new("title").like_pattern(), "%title%");
        assert_eq!(SearchTerm::new("100%_x\\").like_pattern(), "%100\\%\\_x\\\\%");
        assert!(!SearchTerm::new("a_c").matches("abc"));
        assert!(SearchTerm::new("a_c").matches("A_C"));
    }
}
