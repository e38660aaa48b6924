//! Confidence levels attached to a field's sources

/// Label shown for any confidence code that is not one of the three levels.
pub const CONFIDENCE_PLACEHOLDER: &str = "Def";

/// Ordinal rating of how reliable the evidence behind a field value is.
///
/// The select control in the source modal posts the codes `"1"`, `"2"` and
/// `"3"`; the backend has historically returned the same codes either as
/// strings or as numbers. Anything else is treated as [`Confidence::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Confidence {
    /// Code `"1"`
    Low,
    /// Code `"2"`
    Medium,
    /// Code `"3"`
    High,
    /// No level chosen, or an unrecognised code
    #[default]
    Unset,
}

impl Confidence {
    /// Parse a confidence code. Only the exact codes are recognised.
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Confidence::Low,
            "2" => Confidence::Medium,
            "3" => Confidence::High,
            _ => Confidence::Unset,
        }
    }

    /// Parse a numeric confidence code.
    pub fn from_number(code: i64) -> Self {
        match code {
            1 => Confidence::Low,
            2 => Confidence::Medium,
            3 => Confidence::High,
            _ => Confidence::Unset,
        }
    }

    /// Wire code, `None` when unset
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Confidence::Low => Some("1"),
            Confidence::Medium => Some("2"),
            Confidence::High => Some("3"),
            Confidence::Unset => None,
        }
    }

    /// Display label used in the source list
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
            Confidence::Unset => CONFIDENCE_PLACEHOLDER,
        }
    }

    /// Whether a level has been chosen
    pub fn is_set(&self) -> bool {
        !matches!(self, Confidence::Unset)
    }
}

/// Map a raw confidence code straight to its display label.
pub fn confidence_label(code: &str) -> &'static str {
    Confidence::from_code(code).label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(confidence_label("1"), "Low");
        assert_eq!(confidence_label("2"), "Medium");
        assert_eq!(confidence_label("3"), "High");
    }

    #[test]
    fn test_unknown_codes_use_placeholder() {
        assert_eq!(confidence_label(""), CONFIDENCE_PLACEHOLDER);
        assert_eq!(confidence_label("0"), CONFIDENCE_PLACEHOLDER);
        assert_eq!(confidence_label("4"), CONFIDENCE_PLACEHOLDER);
        assert_eq!(confidence_label("High"), CONFIDENCE_PLACEHOLDER);
        assert_eq!(confidence_label(" 2"), CONFIDENCE_PLACEHOLDER);
        assert_eq!(confidence_label("undefined"), CONFIDENCE_PLACEHOLDER);
    }

    #[test]
    fn test_numeric_codes() {
        assert_eq!(Confidence::from_number(2), Confidence::Medium);
        assert_eq!(Confidence::from_number(-1), Confidence::Unset);
    }

    #[test]
    fn test_code_round_trip() {
        for level in [Confidence::Low, Confidence::Medium, Confidence::High] {
            let code = level.code().unwrap();
            assert_eq!(Confidence::from_code(code), level);
        }
        assert_eq!(Confidence::Unset.code(), None);
    }

    proptest! {
        #[test]
        fn prop_only_three_codes_get_a_level(code in "\\PC*") {
            let label = confidence_label(&code);
            match code.as_str() {
                "1" => prop_assert_eq!(label, "Low"),
                "2" => prop_assert_eq!(label, "Medium"),
                "3" => prop_assert_eq!(label, "High"),
                _ => prop_assert_eq!(label, CONFIDENCE_PLACEHOLDER),
            }
        }
    }
}
