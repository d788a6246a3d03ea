//! Sequential suite runner.
//!
//! Suites run one after another, scenarios within a suite run in order, and
//! every step is a single request/response exchange. Nothing is retried: a
//! transport error or a failed assertion ends the scenario and is logged with
//! the response body.

use std::time::Instant;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::fixtures::{BrandFixture, lorem_slug};
use crate::http::{HttpClient, HttpResponse};
use crate::scenarios::{LOREM_SLUG, RANDOM_NAME, RANDOM_SLUG, Scenario, SetupPolicy, Step, Suite};
use crate::testing::{Assertion, AssertionResult, RunReport, ScenarioResult, lookup};
use crate::variables::Variables;

#[derive(Debug, Clone)]
pub struct Runner {
    http: HttpClient,
}

/// What happened during one step.
#[derive(Debug, Default)]
struct StepOutcome {
    request_line: String,
    response: Option<HttpResponse>,
    assertions: Vec<AssertionResult>,
    error: Option<String>,
}

impl StepOutcome {
    fn passed(&self) -> bool {
        self.error.is_none() && self.assertions.iter().all(|result| result.passed)
    }

    fn failure_summary(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        self.assertions
            .iter()
            .filter(|result| !result.passed)
            .map(|result| result.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Runner {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn run(&self, suites: &[Suite]) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::default();

        for suite in suites {
            self.run_suite(suite, &mut report).await;
        }

        report.duration_ms = started.elapsed().as_millis();
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "run finished"
        );
        report
    }

    async fn run_suite(&self, suite: &Suite, report: &mut RunReport) {
        info!(suite = %suite.name, scenarios = suite.scenarios.len(), "running suite");

        let fixture = BrandFixture::generate();
        let mut variables = Variables::new();
        variables.set(RANDOM_NAME, fixture.name);
        variables.set(RANDOM_SLUG, fixture.slug);

        let blocked = match self.run_setup(suite, &mut variables).await {
            Ok(()) => None,
            Err(reason) => match suite.setup_policy {
                SetupPolicy::Required => Some(reason),
                SetupPolicy::BestEffort => {
                    warn!(suite = %suite.name, "running scenarios after incomplete setup: {reason}");
                    None
                }
            },
        };

        for scenario in &suite.scenarios {
            let result = match &blocked {
                None => self.run_scenario(&suite.name, scenario, &mut variables).await,
                Some(reason) => ScenarioResult {
                    suite: suite.name.clone(),
                    name: scenario.name.clone(),
                    passed: false,
                    duration_ms: 0,
                    assertions: Vec::new(),
                    error: Some(format!("suite setup failed: {reason}")),
                    last_request: None,
                    last_status: None,
                    last_body: None,
                },
            };

            if !result.passed {
                log_failure(&result);
            }
            report.push(result);
        }
    }

    /// Runs the setup steps in order, feeding their captures into the suite
    /// variables. Stops at the first failing step.
    async fn run_setup(&self, suite: &Suite, variables: &mut Variables) -> Result<(), String> {
        for step in &suite.setup {
            let outcome = self.run_step(step, variables).await;
            if let Some(response) = &outcome.response {
                apply_captures(step, response, variables);
            }

            if !outcome.passed() {
                let reason = outcome.failure_summary();
                error!(
                    suite = %suite.name,
                    request = %outcome.request_line,
                    status = outcome.response.as_ref().map(|r| r.status),
                    body = outcome.response.as_ref().map(|r| r.body.as_str()).unwrap_or(""),
                    "suite setup failed: {reason}"
                );
                return Err(reason);
            }
        }
        Ok(())
    }

    async fn run_scenario(
        &self,
        suite: &str,
        scenario: &Scenario,
        suite_variables: &mut Variables,
    ) -> ScenarioResult {
        let started = Instant::now();
        let mut local = Variables::new();
        local.set(LOREM_SLUG, lorem_slug());

        let mut assertions = Vec::new();
        let mut error = None;
        let mut last: Option<StepOutcome> = None;

        for step in &scenario.steps {
            let variables = suite_variables.layered(&local);
            let outcome = self.run_step(step, &variables).await;

            if let Some(response) = &outcome.response {
                apply_captures(step, response, suite_variables);
            }

            assertions.extend(outcome.assertions.iter().cloned());
            let passed = outcome.passed();
            if outcome.error.is_some() {
                error = outcome.error.clone();
            }
            last = Some(outcome);

            if !passed {
                break;
            }
        }

        let passed = error.is_none() && assertions.iter().all(|result| result.passed);
        let last_response = last.as_ref().and_then(|outcome| outcome.response.as_ref());

        ScenarioResult {
            suite: suite.to_string(),
            name: scenario.name.clone(),
            passed,
            duration_ms: started.elapsed().as_millis(),
            assertions,
            error,
            last_request: last.as_ref().map(|outcome| outcome.request_line.clone()),
            last_status: last_response.map(|response| response.status),
            last_body: last_response
                .filter(|_| !passed)
                .map(|response| response.body.clone()),
        }
    }

    async fn run_step(&self, step: &Step, variables: &Variables) -> StepOutcome {
        let unresolved = step.request.unresolved(variables);
        let request = step.request.render(variables);
        let request_line = format!("{} {}", request.method, request.display_path());

        if !unresolved.is_empty() {
            return StepOutcome {
                request_line,
                error: Some(format!("unresolved variables: {}", unresolved.join(", "))),
                ..StepOutcome::default()
            };
        }

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(err) => {
                return StepOutcome {
                    request_line,
                    error: Some(err.to_string()),
                    ..StepOutcome::default()
                };
            }
        };

        let assertions: Vec<AssertionResult> = step
            .assertions
            .iter()
            .map(|assertion| resolve(assertion, variables).evaluate(&response))
            .collect();

        // Failed assertions already explain the step; only report missing
        // captures when they are the sole problem.
        let error = if assertions.iter().all(|result| result.passed) {
            missing_captures(step, &response)
        } else {
            None
        };

        StepOutcome {
            request_line,
            response: Some(response),
            assertions,
            error,
        }
    }
}

fn resolve(assertion: &Assertion, variables: &Variables) -> Assertion {
    Assertion {
        expected: variables.interpolate_json(&assertion.expected),
        ..assertion.clone()
    }
}

fn captured_value(step_path: &str, response: &HttpResponse) -> Option<String> {
    let body = response.json()?;
    match lookup(&body, step_path)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn apply_captures(step: &Step, response: &HttpResponse, variables: &mut Variables) {
    for capture in &step.captures {
        match captured_value(&capture.json_path, response) {
            Some(value) => variables.set(capture.variable.clone(), value),
            None => warn!(
                variable = %capture.variable,
                path = %capture.json_path,
                status = response.status,
                "nothing to capture"
            ),
        }
    }
}

fn missing_captures(step: &Step, response: &HttpResponse) -> Option<String> {
    let missing: Vec<&str> = step
        .captures
        .iter()
        .filter(|capture| captured_value(&capture.json_path, response).is_none())
        .map(|capture| capture.variable.as_str())
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(format!(
            "response {} had nothing to capture for {}",
            response.status,
            missing.join(", ")
        ))
    }
}

fn log_failure(result: &ScenarioResult) {
    let reasons = match &result.error {
        Some(error) => error.clone(),
        None => result
            .failed_assertions()
            .map(|failed| failed.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    };

    error!(
        suite = %result.suite,
        scenario = %result.name,
        request = result.last_request.as_deref().unwrap_or(""),
        status = result.last_status,
        body = result.last_body.as_deref().unwrap_or(""),
        "scenario failed: {reasons}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::scenarios::RequestTemplate;
    use serde_json::json;

    fn response(status: u16, body: Value) -> HttpResponse {
        HttpResponse {
            status,
            duration_ms: 0,
            body: body.to_string(),
        }
    }

    fn capturing_step() -> Step {
        Step::new(RequestTemplate::new(HttpMethod::Post, &["brands"]))
            .capture("brand_id", "id")
            .capture("brand_slug", "slug")
    }

    #[test]
    fn resolve_interpolates_expected_values() {
        let mut vars = Variables::new();
        vars.set(RANDOM_NAME, "Koch LLC");

        let assertion = Assertion::body("name").equals("{{random_name}}");
        assert_eq!(resolve(&assertion, &vars).expected, json!("Koch LLC"));
    }

    #[test]
    fn captures_copy_strings_into_variables() {
        let mut vars = Variables::new();
        let resp = response(201, json!({"id": "01JK", "slug": "koch-llc"}));

        apply_captures(&capturing_step(), &resp, &mut vars);
        assert_eq!(vars.get("brand_id"), Some("01JK"));
        assert_eq!(vars.get("brand_slug"), Some("koch-llc"));
        assert_eq!(missing_captures(&capturing_step(), &resp), None);
    }

    #[test]
    fn captures_ignore_arrays_and_objects() {
        let resp = response(422, json!({"id": {"nested": 1}, "slug": ["A brand already exists"]}));
        let mut vars = Variables::new();

        apply_captures(&capturing_step(), &resp, &mut vars);
        assert_eq!(vars.get("brand_id"), None);
        assert_eq!(vars.get("brand_slug"), None);

        let resp = response(201, json!({"id": 42, "slug": "koch-llc"}));
        apply_captures(&capturing_step(), &resp, &mut vars);
        assert_eq!(vars.get("brand_id"), Some("42"));
    }

    #[test]
    fn missing_captures_are_reported() {
        let resp = response(422, json!({"slug": ["taken"]}));
        let mut vars = Variables::new();

        apply_captures(&capturing_step(), &resp, &mut vars);
        assert_eq!(vars.get("brand_id"), None);
        assert_eq!(
            missing_captures(&capturing_step(), &resp).as_deref(),
            Some("response 422 had nothing to capture for brand_id, brand_slug")
        );
    }
}
