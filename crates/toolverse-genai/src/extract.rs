//! Structured field extraction from `LABEL: value` lines.
//!
//! Every field resolves to exactly one value. A label that is missing, or
//! whose value parses to nothing, falls back to its default verbatim.
//! Only the first occurrence of a label counts.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

/// Value produced for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }
}

/// Turns the remainder of a labelled line into a value. `None` means
/// "nothing usable", which selects the default.
pub type ParseFn = fn(&str) -> Option<FieldValue>;

/// Scalar parser: the trimmed remainder.
pub fn parse_text(raw: &str) -> Option<FieldValue> {
    let value = raw.trim();
    (!value.is_empty()).then(|| FieldValue::Text(value.to_string()))
}

/// List parser: comma-separated, trimmed, empty entries dropped.
pub fn parse_comma_list(raw: &str) -> Option<FieldValue> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(FieldValue::List(items))
}

/// Declarative rule for one field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    label: String,
    default: FieldValue,
    parse: ParseFn,
    pattern: Option<Regex>,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, default: FieldValue, parse: ParseFn) -> Self {
        let label = label.into();
        let pattern = label_pattern(&label);
        Self {
            label,
            default,
            parse,
            pattern,
        }
    }

    pub fn text(label: impl Into<String>, default: &str) -> Self {
        Self::new(label, FieldValue::Text(default.to_string()), parse_text)
    }

    pub fn list(label: impl Into<String>, default: &[&str]) -> Self {
        Self::new(
            label,
            FieldValue::List(default.iter().map(|s| s.to_string()).collect()),
            parse_comma_list,
        )
    }

    /// Remainder of the first line carrying this label.
    fn first_remainder<'t>(&self, raw: &'t str) -> Option<&'t str> {
        self.pattern
            .as_ref()?
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn resolve(&self, raw: &str) -> (FieldValue, bool) {
        match self.first_remainder(raw).and_then(self.parse) {
            Some(value) => (value, false),
            None => (self.default.clone(), true),
        }
    }
}

/// `LABEL:` anywhere on a line, case-insensitive; captures the rest of it.
fn label_pattern(label: &str) -> Option<Regex> {
    let source = format!(r"(?i){}:[ \t]*([^\r\n]*)", regex::escape(label));
    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Field label '{}' unusable, default only: {}", label, e);
            None
        }
    }
}

/// One resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedField {
    pub label: String,
    pub value: FieldValue,
    /// Whether the default was substituted.
    pub defaulted: bool,
}

/// Resolved fields, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    fields: Vec<ExtractedField>,
}

impl ExtractedFields {
    pub fn get(&self, label: &str) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.label == label)
    }

    pub fn text(&self, label: &str) -> Option<&str> {
        self.get(label).and_then(|f| f.value.as_text())
    }

    pub fn list(&self, label: &str) -> Option<&[String]> {
        self.get(label).and_then(|f| f.value.as_list())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }


    /// Number of fields that fell back to their default.
    pub fn defaulted_count(&self) -> usize {
        self.fields.iter().filter(|f| f.defaulted).count()
    }
}

/// Resolve every field against `raw`. Never fails.
pub fn extract(raw: &str, specs: &[FieldSpec]) -> ExtractedFields {
    let fields: Vec<ExtractedField> = specs
        .iter()
        .map(|spec| {
            let (value, defaulted) = spec.resolve(raw);
            ExtractedField {
                label: spec.label.clone(),
                value,
                defaulted,
            }
        })
        .collect();

    let extracted = ExtractedFields { fields };
    debug!(
        "Extracted {} fields ({} defaulted)",
        extracted.len(),
        extracted.defaulted_count()
    );
    extracted
}

/// Every non-empty value of a repeated label, in text order.
pub fn extract_repeated(raw: &str, label: &str) -> Vec<String> {
    let Some(pattern) = label_pattern(label) else {
        return Vec::new();
    };
    pattern
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("SUMMARY", "default summary"),
            FieldSpec::list("HABITS", &["Maintain hydration", "Regular movement"]),
            FieldSpec::text("NUTRITION", "default nutrition"),
        ]
    }

    #[test]
    fn test_extracts_labelled_lines() {
        let raw = "Here you go!\nsummary:  Sleep more, stress less.  \nHABITS: walk, stretch , , read\nNUTRITION: Greens";
        let fields = extract(raw, &specs());
        assert_eq!(fields.text("SUMMARY"), Some("Sleep more, stress less."));
        assert_eq!(
            fields.list("HABITS").unwrap(),
            &["walk".to_string(), "stretch".into(), "read".into()]
        );
        assert_eq!(fields.text("NUTRITION"), Some("Greens"));
        assert_eq!(fields.defaulted_count(), 0);
    }

    #[test]
    fn test_missing_label_uses_default_verbatim() {
        let fields = extract("SUMMARY: ok", &specs());
        let habits = fields.get("HABITS").unwrap();
        assert!(habits.defaulted);
        assert_eq!(
            habits.value,
            FieldValue::List(vec!["Maintain hydration".into(), "Regular movement".into()])
        );
    }

    #[test]
    fn test_total_for_any_input() {
        for raw in ["", "\n\n", "no labels at all", "SUMMARY:", "HABITS: , ,"] {
            let fields = extract(raw, &specs());
            assert_eq!(fields.len(), specs().len(), "{:?}", raw);
        }
        let fields = extract("", &specs());
        assert_eq!(fields.defaulted_count(), 3);
    }

    #[test]
    fn test_first_match_wins() {
        let fields = extract("SUMMARY: first\nSUMMARY: second", &specs());
        assert_eq!(fields.text("SUMMARY"), Some("first"));
    }

    #[test]
    fn test_label_inside_markdown() {
        let fields = extract("**SUMMARY:** bold start\r\nNUTRITION:\tTabs", &specs());
        assert_eq!(fields.text("SUMMARY"), Some("** bold start"));
        assert_eq!(fields.text("NUTRITION"), Some("Tabs"));
    }

    #[test]
    fn test_label_with_regex_metacharacters() {
        let specs = vec![FieldSpec::text("A+B (x)", "none")];
        let fields = extract("a+b (X): yes", &specs);
        assert_eq!(fields.text("A+B (x)"), Some("yes"));
    }

    #[test]
    fn test_extract_repeated_keeps_order() {
        let raw = "TITLE: One\nnoise\ntitle: Two\nTITLE:   \nTITLE: Three";
        assert_eq!(extract_repeated(raw, "TITLE"), vec!["One", "Two", "Three"]);
        assert!(extract_repeated("", "TITLE").is_empty());
    }
}
