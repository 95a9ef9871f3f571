//! Process configuration.
//!
//! All configuration is constructed once at startup and passed into the
//! components that need it; nothing in the pipeline reads the environment
//! after this point.

use std::net::SocketAddr;

/// Fixed geometry of the rendered workspace and the arm inside it.
///
/// The base sits at the canvas center; both segment lengths are constants
/// the planner must respect when proposing joint angles.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Shoulder-to-elbow segment length in pixels.
    pub upper_arm_length: u32,
    /// Elbow-to-gripper segment length in pixels.
    pub lower_arm_length: u32,
}

impl ArmConfig {
    /// Base position of the arm: the canvas center.
    pub fn base(&self) -> (u32, u32) {
        (self.canvas_width / 2, self.canvas_height / 2)
    }

    /// Maximum reach from the base, with the arm fully extended.
    pub fn max_reach(&self) -> u32 {
        self.upper_arm_length + self.lower_arm_length
    }
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            canvas_width: 960,
            canvas_height: 540,
            upper_arm_length: 120,
            lower_arm_length: 100,
        }
    }
}

/// Connection settings for the external vision-language planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// API key for authentication. Empty means unconfigured.
    pub api_key: String,
    /// Model name (e.g. "gemini-2.0-flash").
    pub model: String,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Sampling temperature; kept low so plans are near-deterministic.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("ARMPLAN_GEMINI_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or_default(),
            model: std::env::var("ARMPLAN_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let port = std::env::var("ARMPLAN_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(4860);
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }
}
