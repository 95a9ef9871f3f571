//! Planning prompt construction.
//!
//! The prompt is a pure function of the arm configuration and the caller's
//! instruction: same inputs, byte-identical output. It spells out the
//! kinematic envelope the planner must respect and the exact output shape
//! the validator will enforce, rendered from the same field table
//! ([`crate::schema::field_specs`]) so the two cannot drift apart.

use crate::config::ArmConfig;
use crate::schema::field_specs;

/// Build the full planning prompt for one request.
///
/// The instruction text is included verbatim; emptiness is rejected
/// upstream, not here.
pub fn build_planning_prompt(config: &ArmConfig, instruction: &str) -> String {
    let (base_x, base_y) = config.base();
    let mut lines = vec![
        "You are a trajectory planner for a 2-joint robot arm drawn on a 2D canvas.".to_string(),
        "You receive a snapshot image of the workspace and an instruction, and you".to_string(),
        "respond with a JSON motion plan.".to_string(),
        String::new(),
        "## Workspace".to_string(),
        String::new(),
        format!(
            "- The canvas is {} x {} pixels. The origin (0, 0) is the top-left corner;",
            config.canvas_width, config.canvas_height
        ),
        "  x increases to the right and y increases downward.".to_string(),
        format!(
            "- The arm base is fixed at the canvas center ({base_x}, {base_y})."
        ),
        format!(
            "- The upper arm (shoulder to elbow) is {} pixels long.",
            config.upper_arm_length
        ),
        format!(
            "- The lower arm (elbow to gripper) is {} pixels long.",
            config.lower_arm_length
        ),
        format!(
            "- The gripper can therefore reach at most {} pixels from the base.",
            config.max_reach()
        ),
        String::new(),
        "## Angle conventions".to_string(),
        String::new(),
        "- shoulder: rotation of the upper arm around the base, in degrees from".to_string(),
        "  -180 to 180. 0 points right along the positive x axis; positive angles".to_string(),
        "  rotate downward on screen (toward positive y).".to_string(),
        "- elbow: rotation of the lower arm relative to the upper arm, in degrees".to_string(),
        "  from -180 to 180. 0 means the arm is fully extended in a straight line;".to_string(),
        "  positive values flex the joint, negative values hyperextend it.".to_string(),
        String::new(),
        "## Required output".to_string(),
        String::new(),
        "Respond with JSON only: an object with a single \"trajectory\" key holding".to_string(),
        "a non-empty array of steps, in execution order. Each step must have exactly".to_string(),
        "these fields:".to_string(),
        String::new(),
    ];

    for spec in field_specs() {
        lines.push(format!("- {}: {}", spec.path, spec.requirement));
    }

    lines.extend([
        String::new(),
        "## Rules".to_string(),
        String::new(),
        "- Do NOT append a final step returning the arm to a neutral or retracted".to_string(),
        "  pose. The arm stays at the last commanded pose indefinitely.".to_string(),
        "- target_coords is your own forward-kinematics claim for where the gripper".to_string(),
        "  ends up; keep it consistent with the angles you choose.".to_string(),
        String::new(),
        "## Instruction".to_string(),
        String::new(),
        instruction.to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        let config = ArmConfig::default();
        let first = build_planning_prompt(&config, "reach for the ball");
        let second = build_planning_prompt(&config, "reach for the ball");
        assert_eq!(first, second);
    }

    #[test]
    fn prompt_describes_workspace_geometry() {
        let config = ArmConfig::default();
        let prompt = build_planning_prompt(&config, "wave");
        assert!(prompt.contains("960 x 540"));
        assert!(prompt.contains("(480, 270)"));
        assert!(prompt.contains("120 pixels"));
        assert!(prompt.contains("100 pixels"));
        assert!(prompt.contains("top-left"));
    }

    #[test]
    fn prompt_lists_every_schema_field() {
        let prompt = build_planning_prompt(&ArmConfig::default(), "wave");
        for spec in field_specs() {
            assert!(
                prompt.contains(spec.path),
                "prompt is missing field {}",
                spec.path
            );
        }
    }

    #[test]
    fn prompt_forbids_neutral_return_step() {
        let prompt = build_planning_prompt(&ArmConfig::default(), "wave");
        assert!(prompt.contains("Do NOT append a final step"));
    }

    #[test]
    fn instruction_is_included_verbatim() {
        let prompt = build_planning_prompt(&ArmConfig::default(), "pick up the red cube");
        assert!(prompt.ends_with("pick up the red cube"));
    }

    #[test]
    fn geometry_changes_flow_into_prompt() {
        let config = ArmConfig {
            canvas_width: 800,
            canvas_height: 600,
            upper_arm_length: 150,
            lower_arm_length: 90,
        };
        let prompt = build_planning_prompt(&config, "wave");
        assert!(prompt.contains("800 x 600"));
        assert!(prompt.contains("(400, 300)"));
        assert!(prompt.contains("at most 240 pixels"));
    }
}
