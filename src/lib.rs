//! corkboard: an interactive sticky-note board for the terminal.
//!
//! Notes are posted from a compose box, spawn near the board center without
//! piling up, and are dragged with the mouse. Resting the pointer on a note
//! reveals its edit affordance after three seconds; after five the note
//! either raises itself above the stack or reports how many neighbors
//! cover it. Everything lives in memory for the lifetime of the session.
//!
//! The interaction engine ([`board`], [`geometry`], [`overlap`], [`spawn`],
//! [`drag`], [`hover`], [`richtext`]) is independent of the terminal; the
//! binary wires it to crossterm/ratatui through [`app`], [`event_loop`],
//! and [`ui`].

pub mod actions;
pub mod app;
pub mod board;
pub mod compose;
pub mod constants;
pub mod drag;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod hover;
pub mod keybindings;
pub mod note;
pub mod overlap;
pub mod richtext;
pub mod spawn;
pub mod theme;
pub mod timer;
pub mod tracing_sub;
pub mod ui;

pub use error::{Error, Result};
