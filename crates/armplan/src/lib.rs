pub mod server;

pub mod config;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod planner;
pub mod prompt;
pub mod schema;

pub use crate::config::{ArmConfig, PlannerConfig, ServerConfig};
pub use crate::error::{PlanError, PlanResult};
pub use crate::pipeline::TrajectoryPipeline;
pub use crate::planner::{GeminiPlanner, Planner};
pub use crate::schema::{GripperState, TrajectoryPlan, TrajectoryStep};
