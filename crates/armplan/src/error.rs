use std::fmt;

/// Unified error type for the armplan crate.
///
/// Every failure mode of the planning pipeline is terminal for its request:
/// no variant is retried, repaired, or downgraded before it reaches the
/// request boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Required planner credential is absent. Fatal, not retryable.
    Configuration(String),
    /// Caller-supplied image or instruction missing, wrong type, or empty.
    Input(String),
    /// External planner transport failure (non-success HTTP status).
    ExternalService { status: u16, body: String },
    /// External planner returned no usable candidate or text part.
    EmptyResponse(String),
    /// Planner reply text is not valid JSON.
    Parse(String),
    /// Parsed JSON does not satisfy the trajectory schema. The message
    /// enumerates every violated field path, not just the first.
    SchemaValidation(String),
    /// Schema-valid but zero-length trajectory.
    EmptyPlan,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            PlanError::Input(msg) => write!(f, "invalid input: {msg}"),
            PlanError::ExternalService { status, body } => {
                write!(f, "planner service error (HTTP {status}): {body}")
            }
            PlanError::EmptyResponse(msg) => write!(f, "empty planner response: {msg}"),
            PlanError::Parse(msg) => write!(f, "unparseable planner output: {msg}"),
            PlanError::SchemaValidation(msg) => write!(f, "invalid trajectory: {msg}"),
            PlanError::EmptyPlan => write!(f, "planner returned an empty trajectory"),
        }
    }
}

impl std::error::Error for PlanError {}

/// Result type alias using [`PlanError`].
pub type PlanResult<T> = Result<T, PlanError>;
