//! Request lifecycle for prediction submissions.
//!
//! The lifecycle lives in a single `watch` cell. Every transition is one
//! `send_if_modified` call, so a reader sees either the old or the new state,
//! never a mix. Each admitted submission gets the next sequence number and
//! only the submission holding the latest number may publish its outcome.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    domain::{PredictionResult, ScenarioInput},
    error::RequestFailure,
    protocol::{PredictRequest, RequestDialect},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{boundary::validate_response, error::InputRejected, transport::PredictionTransport};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_EVENT_COUNT: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "payload", rename_all = "snake_case")]
pub enum RequestLifecycleState {
    Idle,
    Loading,
    Error(RequestFailure),
    Result(PredictionResult),
}

impl RequestLifecycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestLifecycleState::Loading)
    }

    fn name(&self) -> &'static str {
        match self {
            RequestLifecycleState::Idle => "idle",
            RequestLifecycleState::Loading => "loading",
            RequestLifecycleState::Error(_) => "error",
            RequestLifecycleState::Result(_) => "result",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleSnapshot {
    /// Sequence number of the submission that produced this state; 0 before
    /// the first submission.
    pub seq: u64,
    pub state: RequestLifecycleState,
    pub updated_at: DateTime<Utc>,
}

impl LifecycleSnapshot {
    fn new(seq: u64, state: RequestLifecycleState) -> Self {
        Self {
            seq,
            state,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyPolicy {
    /// A submit while a request is in flight is ignored.
    #[default]
    SingleFlight,
    /// A new submit takes over; the older response is dropped on arrival.
    Supersede,
}

/// Whether the scenario is range-checked before it leaves the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputValidation {
    /// Send whatever the user entered and let the service judge it.
    #[default]
    Deferred,
    Strict { max_event_count: u64 },
}

impl InputValidation {
    pub fn check(&self, scenario: &ScenarioInput) -> Result<(), InputRejected> {
        match *self {
            InputValidation::Deferred => Ok(()),
            InputValidation::Strict { max_event_count } => {
                if scenario.population_base == 0 {
                    return Err(InputRejected::EmptyPopulation);
                }
                if scenario.event_count > max_event_count {
                    return Err(InputRejected::EventCountTooLarge {
                        count: scenario.event_count,
                        max: max_event_count,
                    });
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitPolicy {
    pub concurrency: ConcurrencyPolicy,
    pub input_validation: InputValidation,
    pub timeout: Duration,
    pub dialect: RequestDialect,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            concurrency: ConcurrencyPolicy::default(),
            input_validation: InputValidation::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            dialect: RequestDialect::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another request was in flight; nothing was sent.
    Ignored,
    /// A newer submission took over before this one finished.
    Superseded { seq: u64 },
    Completed {
        seq: u64,
        state: RequestLifecycleState,
    },
}

pub struct RequestOrchestrator {
    transport: Arc<dyn PredictionTransport>,
    policy: SubmitPolicy,
    state: watch::Sender<LifecycleSnapshot>,
}

impl RequestOrchestrator {
    pub fn new(transport: Arc<dyn PredictionTransport>, policy: SubmitPolicy) -> Self {
        let (state, _) = watch::channel(LifecycleSnapshot::new(0, RequestLifecycleState::Idle));
        Self {
            transport,
            policy,
            state,
        }
    }

    pub fn policy(&self) -> &SubmitPolicy {
        &self.policy
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleSnapshot> {
        self.state.subscribe()
    }

    /// Returns to the idle placeholder. Has no effect while a request is in flight.
    pub fn reset(&self) -> bool {
        self.state.send_if_modified(|snapshot| match snapshot.state {
            RequestLifecycleState::Loading | RequestLifecycleState::Idle => false,
            _ => {
                *snapshot = LifecycleSnapshot::new(snapshot.seq, RequestLifecycleState::Idle);
                true
            }
        })
    }

    pub async fn submit(&self, scenario: &ScenarioInput) -> SubmitOutcome {
        let Some(seq) = self.begin() else {
            debug!("submit ignored; a prediction request is already in flight");
            return SubmitOutcome::Ignored;
        };
        let mut guard = LoadingGuard {
            state: &self.state,
            seq,
            armed: true,
        };
        info!(
            seq,
            disaster_type = %scenario.disaster_type,
            event_count = scenario.event_count,
            population_base = scenario.population_base,
            "prediction requested"
        );

        let next = self.run(seq, scenario).await;
        guard.armed = false;
        self.finish(seq, next)
    }

    fn begin(&self) -> Option<u64> {
        let concurrency = self.policy.concurrency;
        let mut admitted = None;
        self.state.send_if_modified(|snapshot| {
            if snapshot.state.is_loading() && concurrency == ConcurrencyPolicy::SingleFlight {
                return false;
            }
            let seq = snapshot.seq + 1;
            *snapshot = LifecycleSnapshot::new(seq, RequestLifecycleState::Loading);
            admitted = Some(seq);
            true
        });
        admitted
    }

    async fn run(&self, seq: u64, scenario: &ScenarioInput) -> RequestLifecycleState {
        if let Err(rejected) = self.policy.input_validation.check(scenario) {
            warn!(seq, %rejected, "scenario rejected before sending");
            return RequestLifecycleState::Error(rejected.into());
        }

        let request = PredictRequest::from_scenario(scenario, self.policy.dialect);
        let response =
            match tokio::time::timeout(self.policy.timeout, self.transport.predict(&request)).await
            {
                Ok(Ok(response)) => response,
                Ok(Err(err)) => return RequestLifecycleState::Error(err.into()),
                Err(_) => {
                    return RequestLifecycleState::Error(RequestFailure::timeout(format!(
                        "no response within {} ms",
                        self.policy.timeout.as_millis()
                    )))
                }
            };

        match validate_response(response) {
            Ok(result) => RequestLifecycleState::Result(result),
            Err(err) => RequestLifecycleState::Error(err.into()),
        }
    }

    fn finish(&self, seq: u64, next: RequestLifecycleState) -> SubmitOutcome {
        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.seq != seq {
                return false;
            }
            *snapshot = LifecycleSnapshot::new(seq, next.clone());
            true
        });
        if !applied {
            debug!(seq, "dropping response from superseded request");
            return SubmitOutcome::Superseded { seq };
        }

        match &next {
            RequestLifecycleState::Result(result) => info!(
                seq,
                sectors = result.sector_estimates.len(),
                total_damage_units = result.total_damage_units,
                "prediction completed"
            ),
            RequestLifecycleState::Error(failure) => warn!(
                seq,
                kind = ?failure.kind,
                detail = %failure.detail,
                "prediction failed"
            ),
            other => debug!(seq, state = other.name(), "prediction finished"),
        }
        SubmitOutcome::Completed { seq, state: next }
    }
}

/// Clears a `Loading` state left behind when a submit future is dropped
/// before it finishes.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<LifecycleSnapshot>,
    seq: u64,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let seq = self.seq;
        let cleared = self.state.send_if_modified(|snapshot| {
            if snapshot.seq != seq || !snapshot.state.is_loading() {
                return false;
            }
            *snapshot = LifecycleSnapshot::new(seq, RequestLifecycleState::Idle);
            true
        });
        if cleared {
            warn!(seq, "prediction request abandoned before completion");
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
