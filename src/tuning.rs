//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`]; a JSON file can
//! override them for playtesting without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs threaded through the simulation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical quantum for inferred rows
    pub cell_height: f32,
    /// Horizontal distance per discrete shift command
    pub shift_step: f32,
    /// Exponential smoothing rate toward the shift target (per second)
    pub shift_smoothing: f32,
    /// Constant fall speed (units/s)
    pub fall_speed: f32,
    /// Settled pieces needed in one inferred row to clear it
    pub line_clear_threshold: u32,
    /// Score per cleared row
    pub points_per_line: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell_height: CELL_HEIGHT,
            shift_step: SHIFT_STEP,
            shift_smoothing: SHIFT_SMOOTHING,
            fall_speed: FALL_SPEED,
            line_clear_threshold: LINE_CLEAR_THRESHOLD as u32,
            points_per_line: POINTS_PER_LINE,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_height <= 0.0 {
            return Err("cell_height must be positive".into());
        }
        if self.shift_step <= 0.0 {
            return Err("shift_step must be positive".into());
        }
        if self.fall_speed <= 0.0 {
            return Err("fall_speed must be positive".into());
        }
        if self.line_clear_threshold == 0 {
            return Err("line_clear_threshold must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.cell_height, CELL_HEIGHT);
        assert_eq!(tuning.line_clear_threshold, LINE_CLEAR_THRESHOLD as u32);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            fall_speed: 2.4,
            ..Default::default()
        };
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed.fall_speed, 2.4);
        assert_eq!(parsed.cell_height, tuning.cell_height);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = Tuning::from_json(r#"{"points_per_line": 250}"#).unwrap();
        assert_eq!(parsed.points_per_line, 250);
        assert_eq!(parsed.cell_height, CELL_HEIGHT);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tuning = Tuning {
            cell_height: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
        let tuning = Tuning {
            line_clear_threshold: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
