pub mod lines;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use rules::{run_rules, DialogueLine, Effect, GateLine, QuestRoles, Rule, RULES};

/// Quest progress. Every flag only ever goes from `false` to `true`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestState {
    /// Set when the bear is picked up and kept set after it is handed to the
    /// robot: the gate and villager logic read it as "bear task done".
    pub has_teddy_bear: bool,
    pub robot_has_teddy_bear: bool,
    pub has_password: bool,
    pub has_key: bool,
    /// Also decides whether the key is visible.
    pub key_quest_started: bool,
    pub npc_interacted: bool,
    /// Terminal.
    pub game_won: bool,
    pub score: u32,
}

impl QuestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags in a fixed order, for progress comparisons.
    pub fn flags(&self) -> [bool; 7] {
        [
            self.has_teddy_bear,
            self.robot_has_teddy_bear,
            self.has_password,
            self.has_key,
            self.key_quest_started,
            self.npc_interacted,
            self.game_won,
        ]
    }

    /// What the player should do next.
    pub fn objective(&self) -> &'static str {
        if self.game_won {
            "You opened the gate. Well done!"
        } else if !self.has_teddy_bear {
            "Find the robot's teddy bear"
        } else if !self.robot_has_teddy_bear {
            "Bring the teddy bear to the robot"
        } else if !self.key_quest_started {
            "Talk to the villager"
        } else if !self.has_key {
            "Find the key"
        } else {
            "Go to the gate"
        }
    }

    /// Text for the objective/score panel.
    pub fn info_text(&self) -> String {
        format!(
            "Objective: {} | Score: {} | Password: {} | Key: {}",
            self.objective(),
            self.score,
            yes_no(self.has_password),
            yes_no(self.has_key),
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
