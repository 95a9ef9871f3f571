//! Trajectory types and plan validation.
//!
//! The planner's reply enters the system as an untyped `serde_json::Value`
//! and only becomes a typed [`TrajectoryPlan`] through [`validate_plan`].
//! Validation walks every field and collects every violation before
//! failing, so the caller gets full diagnostic context in one message.
//!
//! Deliberately lenient: `step_id` values are not required to be unique or
//! monotonic, and `target_coords` is never cross-checked against `angles`
//! via forward kinematics. Both are the upstream planner's responsibility.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{PlanError, PlanResult};

/// Closed interval allowed for both joint angles, in degrees.
pub const ANGLE_MIN: f64 = -180.0;
pub const ANGLE_MAX: f64 = 180.0;

/// Minimum step duration in seconds; durations must be strictly greater.
pub const MIN_DURATION: f64 = 0.1;

/// Gripper state at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GripperState {
    Open,
    Closed,
}

/// Shoulder and elbow rotation, each in `[-180, 180]` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JointAngles {
    pub shoulder: f64,
    pub elbow: f64,
}

/// The planner's claimed end-effector position in canvas pixel space.
///
/// Declarative only: never recomputed from the angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TargetCoords {
    pub x: f64,
    pub y: f64,
}

/// One discrete pose/action in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrajectoryStep {
    pub step_id: i64,
    /// Free-text rationale, for display only.
    pub description: String,
    pub angles: JointAngles,
    pub target_coords: TargetCoords,
    pub gripper: GripperState,
    /// Seconds allotted to transition into this pose.
    pub duration: f64,
}

/// An ordered, non-empty sequence of steps. Accepted whole or discarded
/// whole; never mutated after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrajectoryPlan {
    #[serde(rename = "trajectory")]
    pub steps: Vec<TrajectoryStep>,
}

/// One required field of a trajectory step, as enforced by [`validate_plan`].
///
/// The prompt builder renders its output contract from this same table, so
/// the prompt and the validator cannot drift independently: a field added
/// here is both demanded of the planner and checked on the way back.
pub struct FieldSpec {
    pub path: &'static str,
    pub requirement: String,
}

/// The full field set of a trajectory step.
pub fn field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            path: "step_id",
            requirement: "integer, position of the step in the sequence".to_string(),
        },
        FieldSpec {
            path: "description",
            requirement: "string, short rationale for the step".to_string(),
        },
        FieldSpec {
            path: "angles.shoulder",
            requirement: format!("number, degrees, between {ANGLE_MIN} and {ANGLE_MAX} inclusive"),
        },
        FieldSpec {
            path: "angles.elbow",
            requirement: format!("number, degrees, between {ANGLE_MIN} and {ANGLE_MAX} inclusive"),
        },
        FieldSpec {
            path: "target_coords.x",
            requirement: "number, end-effector x in canvas pixels".to_string(),
        },
        FieldSpec {
            path: "target_coords.y",
            requirement: "number, end-effector y in canvas pixels".to_string(),
        },
        FieldSpec {
            path: "gripper",
            requirement: "string, either \"open\" or \"closed\"".to_string(),
        },
        FieldSpec {
            path: "duration",
            requirement: format!("number, seconds, strictly greater than {MIN_DURATION}"),
        },
    ]
}

/// Validate an untyped planner reply against the trajectory schema.
///
/// Collects every violated field path and reason into one combined
/// [`PlanError::SchemaValidation`] message rather than stopping at the
/// first. A schema-valid but empty trajectory yields
/// [`PlanError::EmptyPlan`]. On success the steps come back unchanged:
/// no reordering, no clamping, no appended neutral pose.
pub fn validate_plan(value: &Value) -> PlanResult<TrajectoryPlan> {
    let root = value.as_object().ok_or_else(|| {
        PlanError::SchemaValidation("root: expected a JSON object".to_string())
    })?;

    let trajectory = match root.get("trajectory") {
        Some(Value::Array(steps)) => steps,
        Some(other) => {
            return Err(PlanError::SchemaValidation(format!(
                "trajectory: expected an array, got {}",
                json_type_name(other)
            )));
        }
        None => {
            return Err(PlanError::SchemaValidation(
                "trajectory: missing required field".to_string(),
            ));
        }
    };

    let mut violations = Vec::new();
    for (index, step) in trajectory.iter().enumerate() {
        validate_step(index, step, &mut violations);
    }

    if !violations.is_empty() {
        return Err(PlanError::SchemaValidation(violations.join("; ")));
    }

    if trajectory.is_empty() {
        return Err(PlanError::EmptyPlan);
    }

    serde_json::from_value(value.clone())
        .map_err(|error| PlanError::SchemaValidation(error.to_string()))
}

fn validate_step(index: usize, step: &Value, violations: &mut Vec<String>) {
    let prefix = format!("trajectory[{index}]");

    let Some(obj) = step.as_object() else {
        violations.push(format!(
            "{prefix}: expected an object, got {}",
            json_type_name(step)
        ));
        return;
    };

    match obj.get("step_id") {
        Some(value) if value.is_i64() || value.is_u64() => {}
        Some(value) => violations.push(format!(
            "{prefix}.step_id: expected an integer, got {}",
            json_type_name(value)
        )),
        None => violations.push(format!("{prefix}.step_id: missing required field")),
    }

    match obj.get("description") {
        Some(value) if value.is_string() => {}
        Some(value) => violations.push(format!(
            "{prefix}.description: expected a string, got {}",
            json_type_name(value)
        )),
        None => violations.push(format!("{prefix}.description: missing required field")),
    }

    match obj.get("angles") {
        Some(Value::Object(angles)) => {
            validate_angle(&prefix, "shoulder", angles.get("shoulder"), violations);
            validate_angle(&prefix, "elbow", angles.get("elbow"), violations);
        }
        Some(other) => violations.push(format!(
            "{prefix}.angles: expected an object, got {}",
            json_type_name(other)
        )),
        None => violations.push(format!("{prefix}.angles: missing required field")),
    }

    match obj.get("target_coords") {
        Some(Value::Object(coords)) => {
            for axis in ["x", "y"] {
                match coords.get(axis).and_then(Value::as_f64) {
                    Some(_) => {}
                    None => violations.push(format!(
                        "{prefix}.target_coords.{axis}: expected a number"
                    )),
                }
            }
        }
        Some(other) => violations.push(format!(
            "{prefix}.target_coords: expected an object, got {}",
            json_type_name(other)
        )),
        None => violations.push(format!("{prefix}.target_coords: missing required field")),
    }

    match obj.get("gripper").and_then(Value::as_str) {
        Some("open") | Some("closed") => {}
        Some(other) => violations.push(format!(
            "{prefix}.gripper: expected \"open\" or \"closed\", got \"{other}\""
        )),
        None => violations.push(format!(
            "{prefix}.gripper: missing or not a string"
        )),
    }

    match obj.get("duration").and_then(Value::as_f64) {
        Some(duration) if duration > MIN_DURATION => {}
        Some(duration) => violations.push(format!(
            "{prefix}.duration: must be greater than {MIN_DURATION} seconds, got {duration}"
        )),
        None => violations.push(format!(
            "{prefix}.duration: missing or not a number"
        )),
    }
}

fn validate_angle(
    prefix: &str,
    joint: &str,
    value: Option<&Value>,
    violations: &mut Vec<String>,
) {
    match value.and_then(Value::as_f64) {
        Some(angle) if (ANGLE_MIN..=ANGLE_MAX).contains(&angle) => {}
        Some(angle) => violations.push(format!(
            "{prefix}.angles.{joint}: must be between {ANGLE_MIN} and {ANGLE_MAX} degrees, got {angle}"
        )),
        None => violations.push(format!(
            "{prefix}.angles.{joint}: missing or not a number"
        )),
    }
}

/// Returns a human-readable name for the JSON type of a value.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
