use std::sync::Arc;

use crate::{
    orchestrator::{RequestOrchestrator, SubmitOutcome, SubmitPolicy},
    presentation::{PresentationController, View},
    scenario::ScenarioState,
    transport::PredictionTransport,
};

/// One screen's worth of state: the scenario being edited, the request
/// lifecycle and the view selection on top of them.
pub struct DecisionSession {
    scenario: ScenarioState,
    orchestrator: RequestOrchestrator,
    presenter: PresentationController,
}

impl DecisionSession {
    pub fn new(
        scenario: ScenarioState,
        transport: Arc<dyn PredictionTransport>,
        policy: SubmitPolicy,
        presenter: PresentationController,
    ) -> Self {
        Self {
            scenario,
            orchestrator: RequestOrchestrator::new(transport, policy),
            presenter,
        }
    }

    pub fn scenario(&self) -> &ScenarioState {
        &self.scenario
    }

    pub fn scenario_mut(&mut self) -> &mut ScenarioState {
        &mut self.scenario
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.orchestrator
    }

    /// Submits a copy of the current scenario; later edits do not affect the
    /// request in flight.
    pub async fn submit(&self) -> SubmitOutcome {
        let input = self.scenario.input().clone();
        self.orchestrator.submit(&input).await
    }

    pub fn view(&self) -> View {
        self.presenter
            .view(&self.orchestrator.snapshot(), self.scenario.input())
    }
}
