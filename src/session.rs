use std::fmt::Write as _;

use log::{debug, warn};

use crate::display::RecordingDisplay;
use crate::error::GameError;
use crate::game::Game;
use crate::input::MoveKey;

/// Upper bound on simulated time spent flushing the banner queue.
const DRAIN_LIMIT_MS: u64 = 10 * 60 * 1000;
/// Longest single `wait:` step.
pub const MAX_WAIT_MS: u64 = 60 * 60 * 1000;

/// One instruction of a headless session script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Press a movement key `repeat` times, one frame after each press.
    Press { key: MoveKey, repeat: u32 },
    /// Let simulated time pass.
    Wait { ms: u64 },
}

impl Step {
    pub fn parse(token: &str) -> Result<Self, GameError> {
        let invalid = |reason: &str| GameError::InvalidStep {
            step: token.to_string(),
            reason: reason.to_string(),
        };
        if let Some(ms) = token.strip_prefix("wait:") {
            let ms = ms
                .parse::<u64>()
                .map_err(|_| invalid("expected milliseconds after `wait:`"))?;
            if ms > MAX_WAIT_MS {
                return Err(invalid("waits are limited to one hour"));
            }
            return Ok(Step::Wait { ms });
        }
        let (name, repeat) = match token.split_once('*') {
            Some((name, count)) => {
                let count = count
                    .parse::<u32>()
                    .map_err(|_| invalid("expected a repeat count after `*`"))?;
                (name, count)
            }
            None => (token, 1),
        };
        let key = MoveKey::from_name(name).ok_or_else(|| invalid("only w, a, s and d move"))?;
        Ok(Step::Press { key, repeat })
    }
}

/// Splits a whitespace-separated script into steps.
pub fn parse_script(script: &str) -> Result<Vec<Step>, GameError> {
    script.split_whitespace().map(Step::parse).collect()
}

/// A banner that went up at a given simulated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerEvent {
    pub at_ms: u64,
    pub text: String,
}

/// Plays a script against a game on a simulated clock.
pub struct Session {
    game: Game,
    display: RecordingDisplay,
    now_ms: u64,
    frame_ms: u64,
    timeline: Vec<BannerEvent>,
}

impl Session {
    /// Starts `game` and prepares a clock advancing `frame_ms` per frame.
    pub fn new(mut game: Game, frame_ms: u64) -> Self {
        game.start();
        Self {
            game,
            display: RecordingDisplay::new(),
            now_ms: 0,
            frame_ms: frame_ms.max(1),
            timeline: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn display(&self) -> &RecordingDisplay {
        &self.display
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn timeline(&self) -> &[BannerEvent] {
        &self.timeline
    }

    /// Runs a single frame at the current time, then advances the clock.
    pub fn frame(&mut self) {
        let report = self.game.tick(self.now_ms, &mut self.display);
        for message in report.shown {
            debug!("[{} ms] banner: {}", self.now_ms, message.text);
            self.timeline.push(BannerEvent {
                at_ms: self.now_ms,
                text: message.text,
            });
        }
        self.now_ms = self.now_ms.saturating_add(self.frame_ms);
    }

    pub fn run_step(&mut self, step: Step) {
        match step {
            Step::Press { key, repeat } => {
                for _ in 0..repeat {
                    if !self.game.press(&[key]) {
                        warn!(
                            "{key:?} press at {} ms did not move the character",
                            self.now_ms
                        );
                    }
                    self.frame();
                }
            }
            Step::Wait { ms } => {
                let until = self.now_ms.saturating_add(ms.min(MAX_WAIT_MS));
                while self.now_ms < until {
                    self.frame();
                }
            }
        }
    }

    pub fn run(&mut self, steps: &[Step]) {
        for step in steps {
            self.run_step(*step);
        }
    }

    /// Keeps ticking until every queued banner has been shown and expired.
    pub fn drain_messages(&mut self) {
        let limit = self.now_ms.saturating_add(DRAIN_LIMIT_MS);
        while !self.game.state().messages.is_idle() && self.now_ms < limit {
            self.frame();
        }
    }

    /// Human readable dump of quest flags and entity states.
    pub fn summary(&self) -> String {
        let state = self.game.state();
        let quest = &state.quest;
        let mut out = String::new();
        let _ = writeln!(out, "Final quest state:");
        let _ = writeln!(out, " - score: {}", quest.score);
        for (name, value) in [
            ("has_teddy_bear", quest.has_teddy_bear),
            ("robot_has_teddy_bear", quest.robot_has_teddy_bear),
            ("has_password", quest.has_password),
            ("has_key", quest.has_key),
            ("key_quest_started", quest.key_quest_started),
            ("npc_interacted", quest.npc_interacted),
            ("game_won", quest.game_won),
        ] {
            let _ = writeln!(out, " - {name}: {value}");
        }
        let _ = writeln!(out, "Final entity states:");
        for entity in state.world.all() {
            let _ = writeln!(
                out,
                " - {} ({}) pos=({:.2}, {:.2}, {:.2}) active={} visible={}",
                entity.id,
                entity.kind,
                entity.position.x,
                entity.position.y,
                entity.position.z,
                entity.active,
                entity.visible
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldLayout;

    fn session() -> Session {
        Session::new(Game::new(WorldLayout::default_layout()).unwrap(), 16)
    }

    #[test]
    fn parses_keys_repeats_and_waits() {
        let steps = parse_script("d  W*3\nwait:250").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Press {
                    key: MoveKey::Right,
                    repeat: 1
                },
                Step::Press {
                    key: MoveKey::Forward,
                    repeat: 3
                },
                Step::Wait { ms: 250 },
            ]
        );
    }

    #[test]
    fn rejects_unknown_steps() {
        assert!(matches!(
            parse_script("jump"),
            Err(GameError::InvalidStep { step, .. }) if step == "jump"
        ));
        assert!(parse_script("w*x").is_err());
        assert!(parse_script("wait:soon").is_err());
        assert!(parse_script("wait:18446744073709551615").is_err());
        assert!(parse_script("wait:3600000").is_ok());
    }

    #[test]
    fn huge_wait_is_capped_instead_of_overflowing() {
        let game = Game::new(WorldLayout::default_layout()).unwrap();
        let mut session = Session::new(game, 1000);
        session.run_step(Step::Wait { ms: 16 });
        session.run_step(Step::Wait { ms: u64::MAX });
        assert_eq!(session.now_ms(), 1000 + MAX_WAIT_MS);
    }

    #[test]
    fn wait_advances_whole_frames() {
        let mut session = session();
        session.run_step(Step::Wait { ms: 100 });
        assert_eq!(session.now_ms(), 112);
        assert_eq!(session.game().ticks(), 7);
    }

    #[test]
    fn collecting_the_bear_is_recorded_on_the_timeline() {
        let mut session = session();
        session.run(&parse_script("a*30 s*30").unwrap());
        session.drain_messages();
        assert_eq!(session.game().state().quest.score, 1);
        assert_eq!(session.timeline()[0].text, "You found the teddy bear!");
        assert!(session.summary().contains(" - has_teddy_bear: true"));
        assert!(session.summary().contains("teddy_bear (teddy_bear)"));
    }
}
