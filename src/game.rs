use glam::Vec3;
use log::{debug, error, info};

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::display::DisplaySurface;
use crate::error::GameError;
use crate::input::MoveKey;
use crate::messages::{Message, MessageQueue};
use crate::motion::MotionMapper;
use crate::quest::rules::{run_rules, QuestRoles};
use crate::quest::{Effect, QuestState};
use crate::registry::EntityRegistry;
use crate::world::WorldLayout;

/// Everything the quest rules read and write.
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub quest: QuestState,
    pub world: EntityRegistry,
    pub roles: QuestRoles,
    pub messages: MessageQueue,
    pub camera: CameraRig,
}

impl GameState {
    /// Registers the layout's entities and resolves the quest roles.
    pub fn new(layout: WorldLayout) -> Result<Self, GameError> {
        layout.settings.validate()?;
        let mut world = EntityRegistry::new();
        for entity in layout.entities {
            world.create(entity)?;
        }
        let roles = QuestRoles::resolve(&world)?;
        let mut camera = layout.camera;
        if let Some(character) = world.get(roles.character) {
            camera.follow(character.position);
        }
        Ok(Self {
            messages: MessageQueue::with_dedupe(layout.settings.dedupe_messages),
            config: layout.settings,
            quest: QuestState::new(),
            world,
            roles,
            camera,
        })
    }

    pub fn character_position(&self) -> Vec3 {
        self.world
            .get(self.roles.character)
            .map_or(Vec3::ZERO, |character| character.position)
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the start action: no ticks, no input.
    Dormant,
    Running,
}

/// What a single tick did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub effects: Vec<Effect>,
    /// Banner messages that went up during the tick, in order.
    pub shown: Vec<Message>,
}

/// Drives the quest: key presses move the character, ticks run the rules
/// and service the banner queue.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    phase: GamePhase,
    motion: MotionMapper,
    ticks: u64,
}

impl Game {
    pub fn new(layout: WorldLayout) -> Result<Self, GameError> {
        let state = GameState::new(layout).map_err(|err| {
            error!("game cannot start: {err}");
            err
        })?;
        info!(
            "world ready with {} entities (collect radius {}, talk radius {})",
            state.world.len(),
            state.config.collect_radius,
            state.config.talk_radius
        );
        Ok(Self {
            motion: MotionMapper::from_config(&state.config),
            state,
            phase: GamePhase::Dormant,
            ticks: 0,
        })
    }

    /// Leaves the dormant phase. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            return false;
        }
        info!("game started");
        self.phase = GamePhase::Running;
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handles a key-down event by name. Returns `true` if the character moved.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match MoveKey::from_name(key) {
            Some(key) => self.press(&[key]),
            None => false,
        }
    }

    /// Moves the character once for the given keys, relative to the camera.
    pub fn press(&mut self, keys: &[MoveKey]) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let character = self.state.roles.character;
        let Some(from) = self.state.world.get(character).map(|c| c.position) else {
            return false;
        };
        let to = self.motion.step(from, keys, self.state.camera.forward());
        if to == from {
            return false;
        }
        self.state.world.set_position(character, to);
        self.state.camera.follow(to);
        debug!("character moved to ({:.2}, {:.2}, {:.2})", to.x, to.y, to.z);
        true
    }

    /// One frame: expire banners, run the quest rules, show the next queued
    /// message and refresh the info panel.
    pub fn tick<D>(&mut self, now_ms: u64, display: &mut D) -> TickReport
    where
        D: DisplaySurface + ?Sized,
    {
        if self.phase != GamePhase::Running {
            return TickReport::default();
        }
        self.ticks += 1;
        let mut shown = self.state.messages.expire_due(now_ms, display);
        let effects = run_rules(&mut self.state);
        shown.extend(self.state.messages.process(now_ms, display).cloned());
        display.set_info(&self.state.quest.info_text());
        TickReport { effects, shown }
    }
}
