//! Fan-out of display notifications.
//!
//! The hub holds only weak handles: a subscriber lives as long as its owner
//! keeps an `Arc` to it, and is dropped from the list on the next
//! notification after that. `unregister` removes one explicitly.

use std::sync::{Arc, Weak};

use trainer_core::Mood;

use crate::Progress;

pub trait Subscriber: Send + Sync {
    fn on_message(&self, text: &str);
    fn on_mood(&self, mood: Mood);
    fn on_redraw(&self);

    /// Level and score line. `None` clears it (back in the menu).
    fn on_progress(&self, _progress: Option<Progress>) {}

    /// Numbered solution menu. An empty slice clears it.
    fn on_choices(&self, _choices: &[String]) {}
}

#[derive(Default)]
pub struct SubscriberHub {
    subscribers: Vec<Weak<dyn Subscriber>>,
}

impl SubscriberHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Subscriber + 'static>(&mut self, subscriber: &Arc<S>) {
        let weak: Weak<S> = Arc::downgrade(subscriber);
        self.subscribers.push(weak);
    }

    pub fn unregister<S: Subscriber + 'static>(&mut self, subscriber: &Arc<S>) {
        let target = Arc::as_ptr(subscriber).cast::<()>();
        self.subscribers
            .retain(|weak| weak.strong_count() > 0 && weak.as_ptr().cast::<()>() != target);
    }

    /// Number of subscribers still alive.
    pub fn len(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify_message(&mut self, text: &str) {
        self.for_each_live(|s| s.on_message(text));
    }

    pub fn notify_mood(&mut self, mood: Mood) {
        self.for_each_live(|s| s.on_mood(mood));
    }

    pub fn notify_redraw(&mut self) {
        self.for_each_live(|s| s.on_redraw());
    }

    pub fn notify_progress(&mut self, progress: Option<Progress>) {
        self.for_each_live(|s| s.on_progress(progress));
    }

    pub fn notify_choices(&mut self, choices: &[String]) {
        self.for_each_live(|s| s.on_choices(choices));
    }

    fn for_each_live(&mut self, notify: impl Fn(&dyn Subscriber)) {
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(subscriber) => {
                notify(subscriber.as_ref());
                true
            }
            None => false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<String>>,
        moods: Mutex<Vec<Mood>>,
        redraws: Mutex<u32>,
    }

    impl Subscriber for Recorder {
        fn on_message(&self, text: &str) {
            self.messages.lock().push(text.to_string());
        }

        fn on_mood(&self, mood: Mood) {
            self.moods.lock().push(mood);
        }

        fn on_redraw(&self) {
            *self.redraws.lock() += 1;
        }
    }

    #[test]
    fn register_counts_live_subscribers() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut hub = SubscriberHub::new();
        hub.register(&first);
        hub.register(&second);
        assert_eq!(hub.len(), 2);
    }

    #[test]
    fn unregister_removes_only_that_subscriber() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut hub = SubscriberHub::new();
        hub.register(&first);
        hub.register(&second);

        hub.unregister(&first);
        assert_eq!(hub.len(), 1);

        hub.notify_message("hello");
        assert!(first.messages.lock().is_empty());
        assert_eq!(*second.messages.lock(), vec!["hello".to_string()]);
    }

    #[test]
    fn dropped_subscriber_is_skipped_and_pruned() {
        let kept = Arc::new(Recorder::default());
        let mut hub = SubscriberHub::new();
        {
            let temporary = Arc::new(Recorder::default());
            hub.register(&temporary);
            hub.register(&kept);
        }
        assert_eq!(hub.len(), 1);

        hub.notify_mood(Mood::Happy);
        hub.notify_redraw();
        assert_eq!(*kept.moods.lock(), vec![Mood::Happy]);
        assert_eq!(*kept.redraws.lock(), 1);
        assert_eq!(hub.subscribers.len(), 1);
    }

    #[test]
    fn hub_does_not_extend_lifetime() {
        let subscriber = Arc::new(Recorder::default());
        let mut hub = SubscriberHub::new();
        hub.register(&subscriber);
        assert_eq!(Arc::strong_count(&subscriber), 1);
        drop(subscriber);
        assert!(hub.is_empty());
    }
}
