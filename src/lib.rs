//! Core of a small third-person quest game.
//!
//! The crate owns the game rules: an entity registry, proximity checks, the
//! quest state machine, a timed banner queue and the key-to-motion mapping,
//! all driven by a per-frame tick on a caller-supplied clock. Rendering and
//! platform glue sit at the edges (`render`, `web`) so the rules stay
//! testable headless.

pub mod camera;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod messages;
pub mod motion;
pub mod proximity;
pub mod quest;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod world;

pub use camera::CameraRig;
pub use config::GameConfig;
pub use display::{DisplayLog, DisplaySurface, RecordingDisplay};
pub use error::GameError;
pub use game::{Game, GamePhase, GameState, TickReport};
pub use input::MoveKey;
pub use messages::{Message, MessageQueue};
pub use motion::MotionMapper;
pub use quest::{Effect, QuestState};
pub use registry::{Entity, EntityHandle, EntityKind, EntityRegistry};
pub use render::CameraParams;
pub use scheduler::Scheduler;
pub use session::{parse_script, BannerEvent, Session, Step};
pub use world::WorldLayout;
