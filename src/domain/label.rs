//! Label styling markers.
//!
//! Purely cosmetic: consumed by the terminal renderer, never by reveal,
//! ordering or navigation.

/// Display category selected by markers embedded in a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `///`
    Highlight,
    /// `---` or a case-insensitive `nein`
    Negative,
    /// `:::`, `+++` or a case-insensitive leading `ja `
    Positive,
    Plain,
}

impl LabelStyle {
    /// Classify a label; earlier categories win when several markers occur.
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if label.contains("///") {
            Self::Highlight
        } else if label.contains("---") || lower.contains("nein") {
            Self::Negative
        } else if label.contains(":::") || label.contains("+++") || lower.starts_with("ja ") {
            Self::Positive
        } else {
            Self::Plain
        }
    }
}

/// Split a label at its first `;` into an emphasised heading and the rest.
pub fn split_heading(label: &str) -> (Option<&str>, &str) {
    match label.split_once(';') {
        Some((heading, rest)) => (Some(heading.trim_end()), rest.trim_start()),
        None => (None, label),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/// Achtung", LabelStyle::Highlight)]
    #[case("--- abbrechen", LabelStyle::Negative)]
    #[case("Nein, nicht vorhanden", LabelStyle::Negative)]
    #[case("keinesfalls NEIN", LabelStyle::Negative)]
    #[case("::: weiter", LabelStyle::Positive)]
    #[case("+++ gut", LabelStyle::Positive)]
    #[case("Ja es gibt", LabelStyle::Positive)]
    #[case("Jahr 2020", LabelStyle::Plain)]
    #[case("Frage", LabelStyle::Plain)]
    fn classifies_markers(#[case] label: &str, #[case] expected: LabelStyle) {
        assert_eq!(LabelStyle::classify(label), expected);
    }

    #[test]
    fn highlight_wins_over_other_markers() {
        assert_eq!(LabelStyle::classify("/// nein +++"), LabelStyle::Highlight);
        assert_eq!(LabelStyle::classify("ja nein"), LabelStyle::Negative);
    }

    #[test]
    fn splits_at_first_semicolon() {
        assert_eq!(split_heading("Titel; Text; mehr"), (Some("Titel"), "Text; mehr"));
        assert_eq!(split_heading("ohne"), (None, "ohne"));
    }
}
