//! Guarded quest rules, evaluated in a fixed order every tick.
//!
//! A rule's guard reads the game state and proximity and yields at most one
//! [`Effect`]; the effect then mutates the state and queues banner text.

use glam::Vec3;
use log::info;

use crate::error::GameError;
use crate::game::GameState;
use crate::proximity::in_range;
use crate::registry::{EntityHandle, EntityKind, EntityRegistry};

use super::lines::{self, Line};

/// Gate tint once the robot has handed out the password.
pub const GATE_UNLOCKED_COLOR: Vec3 = Vec3::new(1.0, 0.65, 0.0);
/// Gate tint after the player wins.
pub const GATE_OPEN_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Entities that take part in the quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestRoles {
    pub character: EntityHandle,
    pub npc: EntityHandle,
    pub robot: EntityHandle,
    pub teddy_bear: EntityHandle,
    pub key: EntityHandle,
    pub gate: EntityHandle,
}

impl QuestRoles {
    /// Picks the first entity of every required kind.
    pub fn resolve(world: &EntityRegistry) -> Result<Self, GameError> {
        let find = |kind| world.first_of(kind).ok_or(GameError::MissingEntity(kind));
        Ok(Self {
            character: find(EntityKind::Character)?,
            npc: find(EntityKind::Npc)?,
            robot: find(EntityKind::Robot)?,
            teddy_bear: find(EntityKind::TeddyBear)?,
            key: find(EntityKind::Key)?,
            gate: find(EntityKind::Gate)?,
        })
    }
}

/// Quest rules in evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    CollectTeddyBear,
    CollectKey,
    GiveTeddyToRobot,
    WinCheck,
    NpcDialogue,
}

pub const RULES: [Rule; 5] = [
    Rule::CollectTeddyBear,
    Rule::CollectKey,
    Rule::GiveTeddyToRobot,
    Rule::WinCheck,
    Rule::NpcDialogue,
];

/// Outcome of a rule whose guard held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CollectTeddyBear,
    CollectKey,
    GiveTeddyToRobot,
    OpenGate,
    GateRefused(GateLine),
    Dialogue(DialogueLine),
}

/// Why the gate stayed shut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateLine {
    NeedKey,
    HelpRobotFirst,
    NeedPasswordAndKey,
}

/// What the villager says, depending on progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueLine {
    StartKeyQuest,
    KeyHint,
    HasKey,
    Greeting,
    RobotHint,
    Reminder,
}

impl Rule {
    /// Returns the effect to apply this tick, if the guard holds.
    pub fn guard(self, state: &GameState) -> Option<Effect> {
        let quest = &state.quest;
        let roles = &state.roles;
        let collect = state.config.collect_radius;
        match self {
            Rule::CollectTeddyBear => {
                near(&state.world, roles.character, roles.teddy_bear, collect)
                    .then_some(Effect::CollectTeddyBear)
            }
            Rule::CollectKey => {
                let visible = state
                    .world
                    .get(roles.key)
                    .map_or(false, |key| key.visible);
                (quest.key_quest_started
                    && visible
                    && near(&state.world, roles.character, roles.key, collect))
                    .then_some(Effect::CollectKey)
            }
            Rule::GiveTeddyToRobot => (quest.has_teddy_bear
                && !quest.robot_has_teddy_bear
                && near(&state.world, roles.character, roles.robot, collect))
            .then_some(Effect::GiveTeddyToRobot),
            Rule::WinCheck => {
                if quest.game_won || !near(&state.world, roles.character, roles.gate, collect) {
                    return None;
                }
                let effect = if quest.has_password && quest.has_key {
                    Effect::OpenGate
                } else if quest.has_password {
                    Effect::GateRefused(GateLine::NeedKey)
                } else if !quest.has_teddy_bear {
                    Effect::GateRefused(GateLine::HelpRobotFirst)
                } else {
                    Effect::GateRefused(GateLine::NeedPasswordAndKey)
                };
                Some(effect)
            }
            Rule::NpcDialogue => {
                let talk = state.config.talk_radius;
                if quest.game_won || !near(&state.world, roles.character, roles.npc, talk) {
                    return None;
                }
                let line = if quest.robot_has_teddy_bear && !quest.key_quest_started {
                    DialogueLine::StartKeyQuest
                } else if quest.key_quest_started && !quest.has_key {
                    DialogueLine::KeyHint
                } else if quest.has_key {
                    DialogueLine::HasKey
                } else if !quest.npc_interacted && !quest.has_teddy_bear {
                    DialogueLine::Greeting
                } else if quest.has_teddy_bear && !quest.robot_has_teddy_bear {
                    DialogueLine::RobotHint
                } else {
                    DialogueLine::Reminder
                };
                Some(Effect::Dialogue(line))
            }
        }
    }
}

impl Effect {
    /// Applies the state change and queues the matching banner line.
    pub fn apply(self, state: &mut GameState) {
        let roles = state.roles;
        let line = match self {
            Effect::CollectTeddyBear => {
                state.world.deactivate(roles.teddy_bear);
                state.quest.score += 1;
                state.quest.has_teddy_bear = true;
                info!("teddy bear collected (score {})", state.quest.score);
                lines::TEDDY_FOUND
            }
            Effect::CollectKey => {
                state.world.deactivate(roles.key);
                state.quest.has_key = true;
                info!("key collected");
                lines::KEY_FOUND
            }
            Effect::GiveTeddyToRobot => {
                state.quest.robot_has_teddy_bear = true;
                state.quest.has_password = true;
                state.world.set_color(roles.gate, GATE_UNLOCKED_COLOR);
                info!("teddy bear returned to robot; password granted");
                lines::ROBOT_PASSWORD
            }
            Effect::OpenGate => {
                state.quest.game_won = true;
                state.world.set_color(roles.gate, GATE_OPEN_COLOR);
                info!("gate opened; game won with score {}", state.quest.score);
                lines::GATE_VICTORY
            }
            Effect::GateRefused(reason) => reason.line(),
            Effect::Dialogue(DialogueLine::StartKeyQuest) => {
                state.quest.key_quest_started = true;
                state.world.reveal(roles.key);
                info!("key quest started");
                lines::NPC_KEY_QUEST
            }
            Effect::Dialogue(DialogueLine::Greeting) => {
                state.quest.npc_interacted = true;
                lines::NPC_GREETING
            }
            Effect::Dialogue(other) => other.line(),
        };
        state.messages.enqueue(line.text, line.duration_ms);
    }
}

impl GateLine {
    pub fn line(self) -> Line {
        match self {
            GateLine::NeedKey => lines::GATE_NEED_KEY,
            GateLine::HelpRobotFirst => lines::GATE_HELP_ROBOT,
            GateLine::NeedPasswordAndKey => lines::GATE_NEED_BOTH,
        }
    }
}

impl DialogueLine {
    pub fn line(self) -> Line {
        match self {
            DialogueLine::StartKeyQuest => lines::NPC_KEY_QUEST,
            DialogueLine::KeyHint => lines::NPC_KEY_HINT,
            DialogueLine::HasKey => lines::NPC_HAS_KEY,
            DialogueLine::Greeting => lines::NPC_GREETING,
            DialogueLine::RobotHint => lines::NPC_ROBOT_HINT,
            DialogueLine::Reminder => lines::NPC_REMINDER,
        }
    }
}

/// Both entities present and within `radius` of each other.
fn near(world: &EntityRegistry, a: EntityHandle, b: EntityHandle, radius: f32) -> bool {
    match (world.get(a), world.get(b)) {
        (Some(a), Some(b)) => in_range(a.position, b.position, radius),
        _ => false,
    }
}

/// Runs every rule once, in priority order, applying each effect before the
/// next guard is checked.
pub fn run_rules(state: &mut GameState) -> Vec<Effect> {
    let mut fired = Vec::new();
    for rule in RULES {
        if let Some(effect) = rule.guard(state) {
            effect.apply(state);
            fired.push(effect);
        }
    }
    fired
}
