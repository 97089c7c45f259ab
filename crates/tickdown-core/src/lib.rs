//! # Tickdown Core Library
//!
//! This library provides the domain logic for Tickdown, a desktop overlay
//! utility that shows always-on-top countdown and world-clock widget windows.
//! The Tauri desktop application is a thin shell over this crate: every
//! timing rule, display rule, and completion rule lives here and is
//! unit-testable without a window system.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A wall-clock-based state machine. It owns no
//!   threads and no timers -- the caller passes the current instant into
//!   [`CountdownEngine::tick`] on its own cadence, so a window that was
//!   suspended for a minute catches up on the next tick.
//! - **Fixed Clock**: A pure projection of the current instant into one
//!   named time zone. No state, no completion concept.
//! - **Config**: TOML-based preferences (shortcut binding, clock zone,
//!   default window sizes) loaded once at startup.
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Countdown state machine with one-shot completion
//! - [`FixedClock`]: Time-of-day projection for a fixed zone
//! - [`Event`]: Serialized state-change events consumed by the GUI
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod events;

pub use clock::FixedClock;
pub use config::Config;
pub use countdown::{format_remaining, parse_target, CountdownEngine, CountdownState};
pub use error::{ConfigError, CoreError};
pub use events::Event;
