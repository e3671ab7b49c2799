//! Event channel built on crossbeam-channel.
//!
//! The detector and scanner only ever send; the CLI drains the receiver on
//! a listener thread until every sender has been dropped.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the scanner and detector.
///
/// Clones share one queue, so hashing workers can each hold one.
#[derive(Clone)]
pub struct EventSender(Sender<Event>);

impl EventSender {
    /// Send an event. Once the receiver is gone events are discarded.
    pub fn send(&self, event: Event) {
        self.0.send(event).ok();
    }
}

/// Receiving half, drained by whoever renders progress.
pub struct EventReceiver(Receiver<Event>);

impl EventReceiver {
    /// Events in send order, ending when the last sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.0.iter()
    }
}

pub struct EventChannel;

impl EventChannel {
    /// Unbounded sender/receiver pair; `send` never blocks.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (EventSender(sender), EventReceiver(receiver))
    }
}

/// Sender with no listener, for the plain `scan`/`detect_duplicates` entry points
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HashEvent, HashProgress, ReviewEvent};
    use std::thread;

    #[test]
    fn progress_from_worker_thread_arrives_in_order() {
        let (sender, receiver) = EventChannel::new();

        let worker = sender.clone();
        thread::spawn(move || {
            for completed in 1..=3 {
                worker.send(Event::Hash(HashEvent::Progress(HashProgress {
                    completed,
                    total: 3,
                })));
            }
        })
        .join()
        .unwrap();
        drop(sender);

        let completed: Vec<usize> = receiver
            .iter()
            .map(|event| match event {
                Event::Hash(HashEvent::Progress(p)) => p.completed,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(completed, vec![1, 2, 3]);
    }

    #[test]
    fn sending_without_listener_is_harmless() {
        null_sender().send(Event::Review(ReviewEvent::TourCompleted));
    }
}
