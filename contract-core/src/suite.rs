use chrono::NaiveDate;
use serde::Serialize;
use std::{fmt, sync::Arc, time::Instant};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    endpoint::ForecastEndpoint,
    model::WeatherRequestParams,
    scenario::{Outcome, Scenario},
};

/// How scenarios are scheduled. Either way each one fetches its own reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One tokio task per scenario.
    #[default]
    Parallel,
    Sequential,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub description: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub results: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn not_passed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.results.iter().filter(|r| !r.outcome.is_passed())
    }

    pub fn is_success(&self) -> bool {
        self.not_passed().next().is_none()
    }

    pub fn outcome_of(&self, scenario: Scenario) -> Option<&Outcome> {
        self.results.iter().find(|r| r.scenario == scenario).map(|r| &r.outcome)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast contract for {} .. {}", self.start_date, self.end_date)?;
        for r in &self.results {
            write!(
                f,
                "  [{:<7}] {:<20} {} ({} ms)",
                r.outcome.label(),
                r.scenario.as_str(),
                r.description,
                r.elapsed_ms
            )?;
            if let Some(detail) = r.outcome.detail() {
                write!(f, "\n            {detail}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{} passed, {} not passed", self.passed(), self.results.len() - self.passed())
    }
}

async fn run_one(
    endpoint: &dyn ForecastEndpoint,
    params: &WeatherRequestParams,
    scenario: Scenario,
) -> ScenarioReport {
    let started = Instant::now();
    let outcome = scenario.run(endpoint, params).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match &outcome {
        Outcome::Passed => info!(%scenario, elapsed_ms, "scenario passed"),
        other => warn!(%scenario, elapsed_ms, detail = ?other.detail(), "scenario {}", other.label()),
    }

    ScenarioReport { scenario, description: scenario.description(), outcome, elapsed_ms }
}

fn spawn_one(
    endpoint: &Arc<dyn ForecastEndpoint>,
    params: &WeatherRequestParams,
    scenario: Scenario,
) -> JoinHandle<ScenarioReport> {
    let endpoint = Arc::clone(endpoint);
    let params = params.clone();
    tokio::spawn(async move { run_one(endpoint.as_ref(), &params, scenario).await })
}

/// Await a scenario task; a task that panicked is reported as aborted.
async fn join_one(scenario: Scenario, handle: JoinHandle<ScenarioReport>) -> ScenarioReport {
    match handle.await {
        Ok(report) => report,
        Err(err) => {
            warn!(%scenario, error = %err, "scenario task aborted");
            ScenarioReport {
                scenario,
                description: scenario.description(),
                outcome: Outcome::Aborted(err.to_string()),
                elapsed_ms: 0,
            }
        }
    }
}

/// Run `scenarios` against `endpoint`, each with its own request.
///
/// A failing or panicking scenario never stops the others; results come back
/// in the order the scenarios were given.
pub async fn run_suite(
    endpoint: Arc<dyn ForecastEndpoint>,
    params: &WeatherRequestParams,
    scenarios: &[Scenario],
    execution: Execution,
) -> SuiteReport {
    let mut results = Vec::with_capacity(scenarios.len());

    match execution {
        Execution::Sequential => {
            for &scenario in scenarios {
                let handle = spawn_one(&endpoint, params, scenario);
                results.push(join_one(scenario, handle).await);
            }
        }
        Execution::Parallel => {
            let handles: Vec<_> = scenarios
                .iter()
                .map(|&scenario| (scenario, spawn_one(&endpoint, params, scenario)))
                .collect();

            for (scenario, handle) in handles {
                results.push(join_one(scenario, handle).await);
            }
        }
    }

    SuiteReport { start_date: params.start_date, end_date: params.end_date, results }
}
