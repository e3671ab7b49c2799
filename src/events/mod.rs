//! # Events Module
//!
//! Channel-based progress reporting, so any UI (CLI, GUI, web) can
//! subscribe to what the engine is doing.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Hash(HashEvent::Progress(p)) = event {
//!             println!("Hashed {}/{}", p.completed, p.total);
//!         }
//!     }
//! });
//!
//! detector.detect_duplicates_with_events(&photos, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
