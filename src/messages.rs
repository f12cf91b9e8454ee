use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::display::DisplaySurface;
use crate::scheduler::Scheduler;

/// Narrative text shown in the banner for a fixed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub duration_ms: u64,
}

impl Message {
    pub fn new(text: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
        }
    }
}

/// FIFO of banner messages. A shown message always stays up for its full
/// duration; later enqueues wait behind it.
#[derive(Debug, Default)]
pub struct MessageQueue {
    pending: VecDeque<Message>,
    current: Option<Shown>,
    expiries: Scheduler<u64>,
    next_serial: u64,
    dedupe: bool,
}

#[derive(Debug)]
struct Shown {
    serial: u64,
    message: Message,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue that drops an enqueue whose text is already showing or pending.
    pub fn with_dedupe(dedupe: bool) -> Self {
        Self {
            dedupe,
            ..Self::default()
        }
    }

    /// Appends a message. Returns `false` if it was suppressed as a duplicate.
    pub fn enqueue(&mut self, text: impl Into<String>, duration_ms: u64) -> bool {
        let message = Message::new(text, duration_ms);
        if self.dedupe && self.contains_text(&message.text) {
            return false;
        }
        debug!("queued message ({} ms): {}", duration_ms, message.text);
        self.pending.push_back(message);
        true
    }

    fn contains_text(&self, text: &str) -> bool {
        self.current
            .as_ref()
            .map_or(false, |shown| shown.message.text == text)
            || self.pending.iter().any(|message| message.text == text)
    }

    /// Ends every message whose time ran out by `now`, showing the next one
    /// straight away. Returns the messages that went up as a result.
    pub fn expire_due<D>(&mut self, now: u64, display: &mut D) -> Vec<Message>
    where
        D: DisplaySurface + ?Sized,
    {
        let mut shown = Vec::new();
        while let Some(serial) = self.expiries.pop_due(now) {
            let finished = self
                .current
                .as_ref()
                .map_or(false, |current| current.serial == serial);
            if !finished {
                continue;
            }
            if let Some(current) = self.current.take() {
                debug!("message expired: {}", current.message.text);
            }
            display.hide_banner();
            if let Some(next) = self.process(now, display) {
                shown.push(next.clone());
            }
        }
        shown
    }

    /// Shows the head of the queue if nothing is currently displayed.
    pub fn process<D>(&mut self, now: u64, display: &mut D) -> Option<&Message>
    where
        D: DisplaySurface + ?Sized,
    {
        if self.current.is_some() {
            return None;
        }
        let message = self.pending.pop_front()?;
        let serial = self.next_serial;
        self.next_serial += 1;
        display.show_banner(&message.text);
        self.expiries
            .schedule(now.saturating_add(message.duration_ms), serial);
        self.current = Some(Shown { serial, message });
        self.current.as_ref().map(|shown| &shown.message)
    }

    pub fn is_displaying(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref().map(|shown| &shown.message)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Message> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;

    fn run_until(queue: &mut MessageQueue, display: &mut RecordingDisplay, end: u64, step: u64) {
        let mut now = 0;
        while now <= end {
            queue.expire_due(now, display);
            queue.process(now, display);
            now += step;
        }
    }

    #[test]
    fn messages_show_in_order_for_full_duration() {
        let mut queue = MessageQueue::new();
        let mut display = RecordingDisplay::new();
        queue.enqueue("A", 500);
        queue.enqueue("B", 500);
        queue.enqueue("C", 500);

        queue.process(0, &mut display);
        assert_eq!(display.banner().as_deref(), Some("A"));

        queue.expire_due(499, &mut display);
        queue.process(499, &mut display);
        assert_eq!(display.banner().as_deref(), Some("A"));

        queue.expire_due(500, &mut display);
        assert_eq!(display.banner().as_deref(), Some("B"));
        queue.expire_due(999, &mut display);
        assert_eq!(display.banner().as_deref(), Some("B"));
        queue.expire_due(1000, &mut display);
        assert_eq!(display.banner().as_deref(), Some("C"));
        queue.expire_due(1500, &mut display);
        assert_eq!(display.banner(), None);
        assert!(queue.is_idle());
        assert_eq!(display.banner_history(), vec!["A", "B", "C"]);
    }

    #[test]
    fn later_enqueue_does_not_cut_off_current_message() {
        let mut queue = MessageQueue::new();
        let mut display = RecordingDisplay::new();
        queue.enqueue("first", 1000);
        queue.process(0, &mut display);
        queue.enqueue("second", 100);
        assert!(queue.process(10, &mut display).is_none());
        queue.expire_due(900, &mut display);
        assert_eq!(display.banner().as_deref(), Some("first"));
        run_until(&mut queue, &mut display, 2000, 50);
        assert_eq!(display.banner_history(), vec!["first", "second"]);
    }

    #[test]
    fn duplicates_kept_without_dedupe() {
        let mut queue = MessageQueue::new();
        assert!(queue.enqueue("again", 100));
        assert!(queue.enqueue("again", 100));
        assert_eq!(queue.pending_len(), 2);
    }

    #[test]
    fn dedupe_suppresses_showing_and_pending_text() {
        let mut queue = MessageQueue::with_dedupe(true);
        let mut display = RecordingDisplay::new();
        assert!(queue.enqueue("hint", 100));
        queue.process(0, &mut display);
        assert!(!queue.enqueue("hint", 100));
        assert!(queue.enqueue("other", 100));
        assert!(!queue.enqueue("other", 100));
        queue.expire_due(100, &mut display);
        queue.expire_due(200, &mut display);
        assert!(queue.enqueue("hint", 100));
    }
}
