use std::sync::OnceLock;

use dmk_core::ModValue;
use dmk_schema::{FieldKind, FieldSpec};
use regex::Regex;

/// Normalization failure is an expected, common case (the user mid-typing
/// a value, or hand-edited XML), so every function here reports invalid
/// input as `None` and never panics or errors.
pub fn normalize_value(spec: &FieldSpec, raw: &str) -> Option<ModValue> {
    match spec.kind {
        FieldKind::Bool => normalize_bool(raw).map(ModValue::Bool),
        FieldKind::Int | FieldKind::Float => normalize_number(spec, raw).map(ModValue::Number),
        FieldKind::Period => normalize_period(spec, raw).map(ModValue::Number),
        FieldKind::Enum { allowed } => {
            normalize_enum(allowed, raw).map(|value| ModValue::Text(value.to_string()))
        }
        FieldKind::Text => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(ModValue::Text(trimmed.to_string()))
            }
        }
        FieldKind::Tokens { catalog } => normalize_tokens(catalog, raw),
        FieldKind::Vector { arity } => normalize_vector(spec, arity, raw),
        FieldKind::Range => {
            let (min_raw, max_raw) = raw.split_once(',')?;
            normalize_range(spec, min_raw, max_raw)
        }
    }
}

/// Non-numeric input is invalid; everything else clamps into
/// `[spec.min, spec.max]`. Ints round to whole numbers, floats to the
/// spec's decimal precision.
pub fn normalize_number(spec: &FieldSpec, raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let clamped = parsed.clamp(spec.min, spec.max);
    Some(match spec.kind {
        FieldKind::Int => clamped.round(),
        _ => round_to(clamped, spec.precision),
    })
}

/// Exact, case-sensitive membership.
pub fn normalize_enum<'a>(allowed: &[&'a str], raw: &str) -> Option<&'a str> {
    let candidate = raw.trim();
    allowed.iter().find(|entry| **entry == candidate).copied()
}

pub fn normalize_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Time-period value: a bare number or a number with a single trailing
/// `y`. The unit is stripped for storage and re-applied only at
/// serialization, so `1.5` and `1.5y` normalize identically.
pub fn normalize_period(spec: &FieldSpec, raw: &str) -> Option<f64> {
    let captures = period_regex().captures(raw.trim())?;
    let number = captures.get(1)?.as_str();
    normalize_number(
        &FieldSpec::float(spec.name, spec.min, spec.max, spec.default),
        number,
    )
}

/// Both members clamp individually, then the pair is reordered so
/// `min <= max` always holds.
pub fn normalize_range(spec: &FieldSpec, min_raw: &str, max_raw: &str) -> Option<ModValue> {
    let min = normalize_number(spec, min_raw)?;
    let max = normalize_number(spec, max_raw)?;
    let (min, max) = reorder_range(min, max);
    Some(ModValue::Range { min, max })
}

pub fn reorder_range(min: f64, max: f64) -> (f64, f64) {
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

/// Space-separated token list. Tokens outside the catalog are dropped;
/// an empty result is invalid as a whole.
pub fn normalize_tokens(catalog: Option<&[&str]>, raw: &str) -> Option<ModValue> {
    let tokens = raw
        .split_whitespace()
        .filter(|token| match catalog {
            Some(catalog) => catalog.contains(token),
            None => true,
        })
        .map(str::to_string)
        .collect::<Vec<_>>();
    if tokens.is_empty() {
        None
    } else {
        Some(ModValue::Tokens(tokens))
    }
}

/// Comma-separated numeric vector of a fixed arity; each element clamps
/// into the field's registered range.
pub fn normalize_vector(spec: &FieldSpec, arity: usize, raw: &str) -> Option<ModValue> {
    let mut values = Vec::new();
    for part in raw.split(',') {
        values.push(normalize_number(spec, part)?);
    }
    if values.len() != arity {
        return None;
    }
    Some(ModValue::Vector(values))
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

fn period_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(-?\d+(?:\.\d+)?)y?$").expect("period regex"))
}
