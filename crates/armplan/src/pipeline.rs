//! The planning pipeline: caller input → validated trajectory.

use std::sync::Arc;

use crate::config::ArmConfig;
use crate::error::{PlanError, PlanResult};
use crate::image::EncodedImage;
use crate::planner::Planner;
use crate::prompt::build_planning_prompt;
use crate::schema::{validate_plan, TrajectoryPlan};

/// One-shot trajectory planning over an external vision-language planner.
///
/// Constructed once at startup with explicit configuration; holds no
/// per-request state, no cache, and no queue. Each call makes exactly one
/// outbound planner request and either returns a whole validated plan or a
/// classified failure. No retries, no repair.
pub struct TrajectoryPipeline {
    config: ArmConfig,
    planner: Arc<dyn Planner>,
}

impl TrajectoryPipeline {
    pub fn new(config: ArmConfig, planner: Arc<dyn Planner>) -> Self {
        Self { config, planner }
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// Plan a trajectory for one (image, instruction) pair.
    ///
    /// Blank instructions and empty images are rejected before any external
    /// call is made.
    pub async fn plan(
        &self,
        image_payload: &str,
        instruction: &str,
    ) -> PlanResult<TrajectoryPlan> {
        if instruction.trim().is_empty() {
            return Err(PlanError::Input("instruction is empty".to_string()));
        }
        let image = EncodedImage::from_payload(image_payload)?;

        let prompt = build_planning_prompt(&self.config, instruction);
        tracing::debug!(prompt_len = prompt.len(), "requesting trajectory");

        let reply = self.planner.generate(&prompt, &image).await?;

        let value: serde_json::Value = serde_json::from_str(&reply)
            .map_err(|error| PlanError::Parse(error.to_string()))?;

        let plan = validate_plan(&value).inspect_err(|error| {
            tracing::warn!(%error, "planner output rejected");
        })?;

        tracing::info!(steps = plan.steps.len(), "trajectory accepted");
        Ok(plan)
    }
}
