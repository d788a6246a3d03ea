//! `{{variable}}` interpolation for request templates.
//!
//! A suite owns one `Variables` set (fixture values plus anything captured
//! during setup); each scenario layers its own values on top of it.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// A copy of `self` with `overrides` taking precedence.
    pub fn layered(&self, overrides: &Variables) -> Variables {
        let mut merged = self.clone();
        for (key, value) in &overrides.values {
            merged.values.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Replace `{{key}}` placeholders in one left-to-right pass; unknown
    /// placeholders are left as-is and substituted values are not rescanned.
    pub fn interpolate(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        for token in tokens(text) {
            match token {
                Token::Text(raw) => result.push_str(raw),
                Token::Placeholder(key) => match self.values.get(key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                },
            }
        }
        result
    }

    /// Placeholder names in `text` with no value in this set.
    pub fn unresolved(&self, text: &str) -> Vec<String> {
        tokens(text)
            .into_iter()
            .filter_map(|token| match token {
                Token::Placeholder(key) if !self.values.contains_key(key) => Some(key.to_string()),
                _ => None,
            })
            .collect()
    }

    /// [`Variables::unresolved`] over every string leaf of a JSON template.
    pub fn unresolved_json(&self, template: &Value) -> Vec<String> {
        match template {
            Value::String(text) => self.unresolved(text),
            Value::Array(items) => items.iter().flat_map(|item| self.unresolved_json(item)).collect(),
            Value::Object(map) => map.values().flat_map(|value| self.unresolved_json(value)).collect(),
            _ => Vec::new(),
        }
    }

    /// Interpolate every string leaf of a JSON template. Keys and non-string
    /// leaves are untouched so deliberately mistyped payloads survive.
    pub fn interpolate_json(&self, template: &Value) -> Value {
        match template {
            Value::String(text) => Value::String(self.interpolate(text)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.interpolate_json(item)).collect())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.interpolate_json(value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

enum Token<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }
        tokens.push(Token::Placeholder(&after[..end]));
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}
