//! goblin-glow library
//!
//! Command-line previews for the Loot Goblins particle background and the
//! page effects around it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
pub mod utils;
