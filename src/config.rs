use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Tunable gameplay constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Trigger radius for collectibles, the robot and the gate.
    #[serde(default = "default_collect_radius")]
    pub collect_radius: f32,
    /// Trigger radius for NPC dialogue.
    #[serde(default = "default_talk_radius")]
    pub talk_radius: f32,
    /// Distance covered by a single key press.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Half extent of the walkable ground plane.
    #[serde(default = "default_boundary")]
    pub boundary: f32,
    /// Drop an enqueue whose text is already showing or pending.
    #[serde(default = "default_dedupe")]
    pub dedupe_messages: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            collect_radius: default_collect_radius(),
            talk_radius: default_talk_radius(),
            move_speed: default_move_speed(),
            boundary: default_boundary(),
            dedupe_messages: default_dedupe(),
        }
    }
}

impl GameConfig {
    /// Rejects radii, speed or boundary that are negative or not finite.
    pub fn validate(&self) -> Result<(), GameError> {
        for (name, value) in [
            ("collect_radius", self.collect_radius),
            ("talk_radius", self.talk_radius),
            ("move_speed", self.move_speed),
            ("boundary", self.boundary),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

fn default_collect_radius() -> f32 {
    1.0
}

fn default_talk_radius() -> f32 {
    1.5
}

fn default_move_speed() -> f32 {
    0.1
}

fn default_boundary() -> f32 {
    4.5
}

fn default_dedupe() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_or_nan_settings_are_rejected() {
        let config = GameConfig {
            boundary: -1.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidSetting {
                name: "boundary",
                value: -1.0
            })
        );
        let config = GameConfig {
            move_speed: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidSetting { name: "move_speed", .. })
        ));
    }
}
