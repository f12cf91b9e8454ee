use std::sync::Arc;

use parking_lot::RwLock;

/// Text panels the game writes to: an objective/score panel and a message banner.
pub trait DisplaySurface {
    fn set_info(&mut self, text: &str);
    fn show_banner(&mut self, text: &str);
    fn hide_banner(&mut self);
}

/// Everything a [`RecordingDisplay`] has been asked to show.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DisplayLog {
    pub info: String,
    pub banner: Option<String>,
    /// Every banner in the order it was shown.
    pub banner_history: Vec<String>,
}

/// Headless display that records panel updates.
///
/// Clones share the same log, so a caller can hand one clone to the game and
/// inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    log: Arc<RwLock<DisplayLog>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DisplayLog {
        self.log.read().clone()
    }

    pub fn info(&self) -> String {
        self.log.read().info.clone()
    }

    pub fn banner(&self) -> Option<String> {
        self.log.read().banner.clone()
    }

    pub fn banner_history(&self) -> Vec<String> {
        self.log.read().banner_history.clone()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_info(&mut self, text: &str) {
        let mut log = self.log.write();
        if log.info != text {
            log.info = text.to_string();
        }
    }

    fn show_banner(&mut self, text: &str) {
        let mut log = self.log.write();
        log.banner = Some(text.to_string());
        log.banner_history.push(text.to_string());
    }

    fn hide_banner(&mut self) {
        self.log.write().banner = None;
    }
}

impl<T> DisplaySurface for &mut T
where
    T: DisplaySurface + ?Sized,
{
    fn set_info(&mut self, text: &str) {
        (**self).set_info(text)
    }

    fn show_banner(&mut self, text: &str) {
        (**self).show_banner(text)
    }

    fn hide_banner(&mut self) {
        (**self).hide_banner()
    }
}
