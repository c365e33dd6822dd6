use serde::{Deserialize, Serialize};

/// A single normalized field value as held in editor state.
///
/// `Tokens` and `Vector` are distinct on purpose: the game's attribute
/// syntax joins entity-type lists with a space and numeric vectors with a
/// comma, and the two separators are not interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Tokens(Vec<String>),
    Vector(Vec<f64>),
    Range { min: f64, max: f64 },
}

impl ModValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    /// Renders the value in the game's attribute syntax, without any
    /// kind-specific unit suffix. Returns an empty string for empty lists
    /// so callers can fall through to attribute omission.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.trim().to_string(),
            Self::Tokens(values) => values.join(" "),
            Self::Vector(values) => values
                .iter()
                .map(|entry| format_number(*entry))
                .collect::<Vec<_>>()
                .join(","),
            Self::Range { min, max } => {
                format!("{},{}", format_number(*min), format_number(*max))
            }
        }
    }
}

/// Shortest decimal form: `1.0` renders as `1`, `1.50` as `1.5`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn render_uses_space_for_tokens_and_comma_for_vectors() {
        let tokens = ModValue::Tokens(vec![
            "primitive_human".to_string(),
            "wolf".to_string(),
        ]);
        assert_eq!(tokens.render(), "primitive_human wolf");

        let vector = ModValue::Vector(vec![10.0, 20.0]);
        assert_eq!(vector.render(), "10,20");
    }

    #[test]
    fn render_trims_trailing_zeros_from_numbers() {
        assert_eq!(ModValue::Number(1.0).render(), "1");
        assert_eq!(ModValue::Number(1.5).render(), "1.5");
        assert_eq!(ModValue::Number(0.3).render(), "0.3");
        assert_eq!(ModValue::Number(-0.0).render(), "0");
    }

    #[test]
    fn render_booleans_as_literal_true_false() {
        assert_eq!(ModValue::Bool(true).render(), "true");
        assert_eq!(ModValue::Bool(false).render(), "false");
    }

    #[test]
    fn range_renders_min_before_max() {
        let range = ModValue::Range { min: -20.0, max: 100.0 };
        assert_eq!(range.render(), "-20,100");
    }
}
