//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal runtime (`main.rs`) and the store.
//! Key presses run through the focus machine; the handler executes the
//! resulting effects against the store and hands timer and exit requests
//! back to the runtime.
//!
//! # Architecture
//!
//! ```text
//! Terminal Input → Event → handle_event → Store transitions + AppState
//!                              ↑                     ↓
//!                              └──── StoreChanged ◄──┘ (orchestrator, bridge)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and focus effect execution
//! - [`routes`]: Screen and details cursor types
//! - [`state`]: Application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::{handle_event, AppState, Event};
//! use moviedeck::focus::Key;
//! use moviedeck::store::Store;
//! use moviedeck::ui::Theme;
//! use moviedeck::Config;
//!
//! let mut state = AppState::new(Store::default(), Theme::default(), &Config::default());
//! let (_render, _actions) = handle_event(&mut state, &Event::Key(Key::Right))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod handler;
pub mod routes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use routes::{DetailsButton, DetailsCursor, Route};
pub use state::{AppState, FocusSnapshot, CARD_HEIGHT};
