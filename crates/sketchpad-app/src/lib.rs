//! Sketchpad App Library
//!
//! Headless front end: renders saved drawings and replays scripted input
//! through the stroke engine.

pub mod cli;
pub mod commands;
pub mod error;
pub mod script;

pub use error::{AppError, AppResult};
