//! Root CLI structure for goblin-glow

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goblin-glow")]
#[command(about = "Preview and inspect the Loot Goblins landing page effects", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Particle background operations
    Particles {
        #[command(subcommand)]
        command: crate::commands::particles::ParticleCommands,
    },

    /// Scroll, tilt, ripple, reveal and floating loot calculations
    Effects {
        #[command(subcommand)]
        command: crate::commands::effects::EffectCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
