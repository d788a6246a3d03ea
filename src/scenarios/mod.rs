//! The Brands contract, expressed as data the runner executes.
//!
//! A [`Suite`] groups scenarios that share fixture variables and an optional
//! setup. Request templates and expected values may reference variables with
//! `{{name}}`; the runner resolves them right before sending.

mod create;
mod read;
mod update;

use std::fmt::{self, Display};

use clap::ValueEnum;
use serde_json::Value;

use crate::brands::BRANDS_PATH;
use crate::http::{HttpMethod, RequestInput};
use crate::testing::Assertion;
use crate::variables::Variables;

/// Suite variable holding the generated company name.
pub const RANDOM_NAME: &str = "random_name";
/// Suite variable holding the slug derived from [`RANDOM_NAME`].
pub const RANDOM_SLUG: &str = "random_slug";
/// Scenario variable holding a fresh lorem slug.
pub const LOREM_SLUG: &str = "lorem_slug";
pub const BRAND_ID: &str = "brand_id";
pub const BRAND_SLUG: &str = "brand_slug";

#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate {
    pub method: HttpMethod,
    pub path: Vec<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestTemplate {
    pub fn new(method: HttpMethod, path: &[&str]) -> Self {
        Self {
            method,
            path: path.iter().map(|segment| segment.to_string()).collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    pub fn json(self, body: Value) -> Self {
        let mut template = self.header("Content-Type", "application/json");
        template.body = Some(body);
        template
    }

    pub fn render(&self, variables: &Variables) -> RequestInput {
        RequestInput {
            method: self.method,
            path_segments: self.path.iter().map(|segment| variables.interpolate(segment)).collect(),
            headers: self
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), variables.interpolate(value)))
                .collect(),
            body: self.body.as_ref().map(|body| variables.interpolate_json(body)),
        }
    }

    /// Variables the template references that `variables` cannot resolve.
    pub fn unresolved(&self, variables: &Variables) -> Vec<String> {
        let mut missing: Vec<String> = self
            .path
            .iter()
            .chain(self.headers.iter().map(|(_, value)| value))
            .flat_map(|text| variables.unresolved(text))
            .collect();
        if let Some(body) = &self.body {
            missing.extend(variables.unresolved_json(body));
        }
        missing.sort();
        missing.dedup();
        missing
    }
}

/// Copies a value out of a response body into a suite variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub variable: String,
    pub json_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub request: RequestTemplate,
    pub assertions: Vec<Assertion>,
    pub captures: Vec<Capture>,
}

impl Step {
    pub fn new(request: RequestTemplate) -> Self {
        Self {
            request,
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn capture(mut self, variable: &str, json_path: &str) -> Self {
        self.captures.push(Capture {
            variable: variable.to_string(),
            json_path: json_path.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// How a failing setup affects the rest of the suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetupPolicy {
    /// Every scenario fails with the setup error.
    #[default]
    Required,
    /// Scenarios still run; those needing a value the setup failed to
    /// capture fail on the unresolved variable.
    BestEffort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    pub name: String,
    pub setup: Vec<Step>,
    pub setup_policy: SetupPolicy,
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            setup: Vec::new(),
            setup_policy: SetupPolicy::default(),
            scenarios: Vec::new(),
        }
    }

    pub fn setup(mut self, step: Step) -> Self {
        self.setup.push(step);
        self
    }

    pub fn setup_policy(mut self, policy: SetupPolicy) -> Self {
        self.setup_policy = policy;
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteKind {
    Create,
    Read,
    Update,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 3] = [SuiteKind::Create, SuiteKind::Read, SuiteKind::Update];

    pub fn suite(self) -> Suite {
        match self {
            SuiteKind::Create => create::suite(),
            SuiteKind::Read => read::suite(),
            SuiteKind::Update => update::suite(),
        }
    }
}

impl Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuiteKind::Create => "create",
            SuiteKind::Read => "read",
            SuiteKind::Update => "update",
        };
        write!(f, "{label}")
    }
}

/// Suites in the order the runner executes them by default.
pub fn all_suites() -> Vec<Suite> {
    SuiteKind::ALL.iter().map(|kind| kind.suite()).collect()
}

pub fn suites(kinds: &[SuiteKind]) -> Vec<Suite> {
    if kinds.is_empty() {
        return all_suites();
    }
    kinds.iter().map(|kind| kind.suite()).collect()
}

fn var(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

fn post_brands(body: Value) -> RequestTemplate {
    RequestTemplate::new(HttpMethod::Post, &[BRANDS_PATH])
        .accept_json()
        .json(body)
}

fn get_brand(id: &str) -> RequestTemplate {
    RequestTemplate::new(HttpMethod::Get, &[BRANDS_PATH, id]).accept_json()
}

fn put_brand(id: &str, body: Value) -> RequestTemplate {
    RequestTemplate::new(HttpMethod::Put, &[BRANDS_PATH, id])
        .accept_json()
        .json(body)
}

/// Create a brand from the suite fixture and remember its id and slug.
fn create_fixture_brand() -> Step {
    Step::new(post_brands(serde_json::json!({
        "name": var(RANDOM_NAME),
        "slug": var(RANDOM_SLUG),
    })))
    .capture(BRAND_ID, "id")
    .capture(BRAND_SLUG, "slug")
}
