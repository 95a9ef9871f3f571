//! The external planner boundary.

mod gemini;

pub use gemini::GeminiPlanner;

use async_trait::async_trait;

use crate::error::PlanResult;
use crate::image::EncodedImage;

/// A vision-language planner: prompt + workspace image in, free-form reply
/// text out.
///
/// The reply is whatever the backend produced; parsing and validation happen
/// in the pipeline, never here.
#[async_trait]
pub trait Planner: Send + Sync {
    async fn generate(&self, prompt: &str, image: &EncodedImage) -> PlanResult<String>;
}
