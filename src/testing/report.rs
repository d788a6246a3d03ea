use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

use super::AssertionResult;

/// Output format for run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub suite: String,
    pub name: String,
    pub passed: bool,
    pub duration_ms: u128,
    pub assertions: Vec<AssertionResult>,
    /// Transport or setup failure that stopped the scenario early.
    pub error: Option<String>,
    /// `METHOD /path` of the last request sent.
    pub last_request: Option<String>,
    pub last_status: Option<u16>,
    pub last_body: Option<String>,
}

impl ScenarioResult {
    pub fn failed_assertions(&self) -> impl Iterator<Item = &AssertionResult> {
        self.assertions.iter().filter(|result| !result.passed)
    }
}

/// Summary report for a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    pub fn push(&mut self, result: ScenarioResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn find(&self, suite: &str, name: &str) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .find(|result| result.suite == suite && result.name == name)
    }
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let mut current_suite: Option<&str> = None;

    for result in &report.results {
        if current_suite != Some(result.suite.as_str()) {
            let _ = writeln!(out, "{}", result.suite);
            current_suite = Some(result.suite.as_str());
        }

        let mark = if result.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  [{mark}] {} ({} ms)", result.name, result.duration_ms);

        if result.passed {
            continue;
        }
        if let Some(error) = &result.error {
            let _ = writeln!(out, "         error: {error}");
        }
        for failed in result.failed_assertions() {
            let _ = writeln!(out, "         {}", failed.message);
        }
        if let Some(request) = &result.last_request {
            let status = result
                .last_status
                .map(|status| status.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(out, "         last exchange: {request} -> {status}");
        }
        if let Some(body) = &result.last_body {
            let _ = writeln!(out, "         response body: {body}");
        }
    }

    let _ = writeln!(
        out,
        "\n{} scenarios, {} passed, {} failed ({} ms)",
        report.total, report.passed, report.failed, report.duration_ms
    );
    out
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let raw = serde_json::to_string_pretty(report)?;
    fs::write(path, raw)?;
    Ok(())
}
