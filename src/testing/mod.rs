//! # Testing & Assertions
//!
//! Assertions evaluated against HTTP responses, and the report types the
//! runner fills in.

mod report;

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::http::HttpResponse;

pub use report::{OutputFormat, RunReport, ScenarioResult, render, write_report};

/// Target of an assertion within the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AssertionTarget {
    StatusCode,
    /// Dot-separated path into the JSON body; numeric parts index arrays.
    /// The empty path is the whole body.
    JsonPath(String),
}

/// Comparison operator for an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssertionOperator {
    Equals,
    NotEquals,
    /// Array membership, or substring for string values.
    Contains,
    Exists,
    /// `expected` is an array the actual value must be a member of.
    OneOf,
    IsString,
}

/// A single assertion that can be evaluated against a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assertion {
    pub target: AssertionTarget,
    pub operator: AssertionOperator,
    pub expected: Value,
}

/// Result of evaluating an assertion.
#[derive(Debug, Clone, Serialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub passed: bool,
    pub actual: Option<Value>,
    pub message: String,
}

/// Builder for assertions on one JSON path.
#[derive(Debug, Clone)]
pub struct PathAssertion(String);

impl PathAssertion {
    fn with(self, operator: AssertionOperator, expected: Value) -> Assertion {
        Assertion {
            target: AssertionTarget::JsonPath(self.0),
            operator,
            expected,
        }
    }

    pub fn equals(self, expected: impl Into<Value>) -> Assertion {
        self.with(AssertionOperator::Equals, expected.into())
    }

    pub fn not_equals(self, expected: impl Into<Value>) -> Assertion {
        self.with(AssertionOperator::NotEquals, expected.into())
    }

    pub fn contains(self, expected: impl Into<Value>) -> Assertion {
        self.with(AssertionOperator::Contains, expected.into())
    }

    pub fn exists(self) -> Assertion {
        self.with(AssertionOperator::Exists, Value::Null)
    }

    pub fn is_string(self) -> Assertion {
        self.with(AssertionOperator::IsString, Value::Null)
    }
}

impl Assertion {
    pub fn status(code: u16) -> Self {
        Self {
            target: AssertionTarget::StatusCode,
            operator: AssertionOperator::Equals,
            expected: Value::from(code),
        }
    }

    pub fn status_one_of(codes: &[u16]) -> Self {
        Self {
            target: AssertionTarget::StatusCode,
            operator: AssertionOperator::OneOf,
            expected: Value::Array(codes.iter().copied().map(Value::from).collect()),
        }
    }

    pub fn body(path: impl Into<String>) -> PathAssertion {
        PathAssertion(path.into())
    }

    pub fn evaluate(&self, response: &HttpResponse) -> AssertionResult {
        let actual = match &self.target {
            AssertionTarget::StatusCode => Some(Value::from(response.status)),
            AssertionTarget::JsonPath(path) => {
                response.json().and_then(|body| lookup(&body, path).cloned())
            }
        };

        let passed = compare(self.operator, actual.as_ref(), &self.expected);
        let message = if passed {
            format!("{self}")
        } else {
            let got = actual
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing>".to_string());
            format!("expected {self}, got {got}")
        };

        AssertionResult {
            assertion: self.clone(),
            passed,
            actual,
            message,
        }
    }
}

impl Display for AssertionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionTarget::StatusCode => write!(f, "status code"),
            AssertionTarget::JsonPath(path) if path.is_empty() => write!(f, "body"),
            AssertionTarget::JsonPath(path) => write!(f, "body.{path}"),
        }
    }
}

impl Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            AssertionOperator::Equals => write!(f, "{} == {}", self.target, self.expected),
            AssertionOperator::NotEquals => write!(f, "{} != {}", self.target, self.expected),
            AssertionOperator::Contains => write!(f, "{} contains {}", self.target, self.expected),
            AssertionOperator::Exists => write!(f, "{} exists", self.target),
            AssertionOperator::OneOf => write!(f, "{} in {}", self.target, self.expected),
            AssertionOperator::IsString => write!(f, "{} is a string", self.target),
        }
    }
}

fn compare(operator: AssertionOperator, actual: Option<&Value>, expected: &Value) -> bool {
    match operator {
        AssertionOperator::Equals => actual == Some(expected),
        AssertionOperator::NotEquals => actual != Some(expected),
        AssertionOperator::Contains => match (actual, expected) {
            (Some(Value::Array(items)), _) => items.contains(expected),
            (Some(Value::String(text)), Value::String(needle)) => text.contains(needle.as_str()),
            _ => false,
        },
        AssertionOperator::Exists => actual.is_some(),
        AssertionOperator::OneOf => match (actual, expected) {
            (Some(value), Value::Array(options)) => options.contains(value),
            _ => false,
        },
        AssertionOperator::IsString => matches!(actual, Some(Value::String(_))),
    }
}

/// Resolve a dot-separated path inside a JSON value.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, part| match current {
        Value::Object(map) => map.get(part),
        Value::Array(items) => part.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    })
}
