//! Client pipeline for the disaster decision-support screen: scenario state,
//! the single-flight prediction request lifecycle, result classification and
//! the chart/table projections the screen draws from.

pub mod boundary;
pub mod classify;
pub mod error;
pub mod orchestrator;
pub mod presentation;
pub mod projection;
pub mod scenario;
pub mod session;
pub mod transport;

pub use classify::{classify, Classification, ConfidenceBand, SeverityBand};
pub use error::{InputRejected, ResponseError, ScenarioError, TransportError};
pub use orchestrator::{
    ConcurrencyPolicy, InputValidation, LifecycleSnapshot, RequestLifecycleState,
    RequestOrchestrator, SubmitOutcome, SubmitPolicy,
};
pub use presentation::{PresentationController, ResultView, View};
pub use projection::{ChartSeries, ProjectionBuilder, SectorProjection, UnitRule};
pub use scenario::{ScenarioField, ScenarioState};
pub use session::DecisionSession;
pub use transport::{HttpTransport, PredictionTransport};
