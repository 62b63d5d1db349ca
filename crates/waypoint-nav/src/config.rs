use crate::curve::SPEED_EPSILON;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How curve progress advances each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "mode"))]
pub enum CurvePacing {
    /// Approximately constant speed along the curve.
    #[default]
    Uniform,
    /// `t` advances by `distance * rate`, ignoring the curve's shape.
    Parametric { rate: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowerConfig {
    /// Floor for the curve speed divisor in uniform pacing.
    pub curve_speed_epsilon: f32,
    /// Spend distance left over after reaching a waypoint on the next leg
    /// within the same tick.
    pub carry_over: bool,
    pub curve_pacing: CurvePacing,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            curve_speed_epsilon: SPEED_EPSILON,
            carry_over: true,
            curve_pacing: CurvePacing::Uniform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_uniform_pacing_with_carry_over() {
        let config = FollowerConfig::default();
        assert_eq!(config.curve_pacing, CurvePacing::Uniform);
        assert!(config.carry_over);
        assert!(config.curve_speed_epsilon > 0.0);
    }
}
