//! Dashboard front-end: display port, render pipeline, saved lists, mock
//! sign-in and the controller that wires them to the weather client.

pub mod auth;
pub mod command;
pub mod controller;
pub mod display;
pub mod error_mapping;
pub mod history;
pub mod render;
pub mod terminal;

pub use command::{Command, CommandError};
pub use controller::{AppState, Controller, Flow};
pub use display::{DisplayPort, Notice, NoticeLevel, RecordingDisplay, Section};
pub use render::DisplayUnits;
pub use terminal::TerminalDisplay;
