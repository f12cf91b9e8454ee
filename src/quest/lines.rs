//! Banner text and how long each line stays on screen.

/// A line of narrative text with its display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub text: &'static str,
    pub duration_ms: u64,
}

const fn line(text: &'static str, duration_ms: u64) -> Line {
    Line { text, duration_ms }
}

pub const TEDDY_FOUND: Line = line("You found the teddy bear!", 2500);
pub const KEY_FOUND: Line = line("You found the key!", 2500);
pub const ROBOT_PASSWORD: Line = line(
    "Robot: Beep boop! My teddy bear! Thank you, friend. The gate password is \"SUNFLOWER\".",
    4000,
);

pub const GATE_VICTORY: Line = line(
    "The gate swings open! You used the password and the key. You win!",
    5000,
);
pub const GATE_NEED_KEY: Line = line(
    "The gate accepts the password, but it is still locked. You need a key.",
    3000,
);
pub const GATE_HELP_ROBOT: Line = line(
    "The gate is sealed. Maybe you should help the robot first.",
    3000,
);
pub const GATE_NEED_BOTH: Line = line(
    "The gate is locked. You need the password and the key to open it.",
    3000,
);

pub const NPC_KEY_QUEST: Line = line(
    "Villager: You helped the robot! The gate also needs a key. I saw one shining near the old well.",
    4000,
);
pub const NPC_KEY_HINT: Line = line(
    "Villager: The key should be near the old well. Keep looking!",
    3000,
);
pub const NPC_HAS_KEY: Line = line(
    "Villager: You found the key! Now head to the gate.",
    3000,
);
pub const NPC_GREETING: Line = line(
    "Villager: Hello traveler! The robot lost its teddy bear. Can you find it?",
    4000,
);
pub const NPC_ROBOT_HINT: Line = line(
    "Villager: That is the robot's teddy bear! Bring it back to the robot.",
    3000,
);
pub const NPC_REMINDER: Line = line(
    "Villager: The robot is still missing its teddy bear.",
    3000,
);
