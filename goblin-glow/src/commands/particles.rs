//! Particle background command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use goblin_particles::{
    AnimationLoop, FixedFrames, Interval, Particle, ParticleField, RecordingSurface, SurfaceSize,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ConfigFormat, load_config, render_config};
use crate::render::{RasterSurface, check_raster_size};
use crate::utils::{
    add_table_row, create_progress_bar, create_spinner, create_table, format_bytes,
    format_percentage, format_range, key_value_table, parse_dimensions, parse_hex_color,
};

#[derive(Subcommand)]
pub enum ParticleCommands {
    /// Show the particle count and settings for a viewport width
    Info {
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Particle configuration file (.json, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective particle configuration
    Config {
        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Particle configuration file to merge over the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run the field headless and summarize the result
    Simulate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of frames to advance
        #[arg(short = 'n', long, default_value = "600")]
        frames: u64,

        /// Resize the surface part-way through, as WIDTHxHEIGHT@FRAME
        #[arg(long, value_parser = parse_resize)]
        resize: Option<ResizeEvent>,

        /// List every particle, not just the summary
        #[arg(long)]
        particles: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render frames to PNG
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of frames to advance before the last one is written
        #[arg(short = 'n', long, default_value = "120")]
        frames: u64,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write each of the last N frames as numbered PNGs
        #[arg(long)]
        sequence: Option<u64>,

        /// Background color as RRGGBB or RRGGBBAA (transparent if omitted)
        #[arg(long, value_parser = parse_hex_color)]
        background: Option<[u8; 4]>,
    },

    /// Run the real-time loop for a while and report frame statistics
    Run {
        #[command(flatten)]
        scene: SceneArgs,

        /// Target frames per second
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,

        /// Seconds to run before stopping the loop
        #[arg(long, default_value = "3")]
        duration: f64,
    },
}

/// Options shared by every command that builds a field
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Surface width in pixels
    #[arg(long, default_value = "1280")]
    pub width: f32,

    /// Surface height in pixels
    #[arg(long, default_value = "720")]
    pub height: f32,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Particle configuration file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SceneArgs {
    fn size(&self) -> Result<SurfaceSize> {
        if !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
        {
            bail!(
                "Surface dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        Ok(SurfaceSize::new(self.width, self.height))
    }

    fn seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::rng().random();
                log::info!("Using random seed {seed}");
                seed
            }
        }
    }

    /// Build the field described by these arguments
    fn build_field(&self) -> Result<(ParticleField, u64)> {
        let config = load_config(self.config.as_deref())?;
        let seed = self.seed();
        let field = ParticleField::new(config, self.size()?, StdRng::seed_from_u64(seed))
            .context("Failed to create particle field")?;
        Ok((field, seed))
    }
}

/// Surface resize scheduled at a given frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub size: SurfaceSize,
    pub at_frame: u64,
}

fn parse_resize(text: &str) -> std::result::Result<ResizeEvent, String> {
    let (dims, frame) = text
        .split_once('@')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT@FRAME, got '{text}'"))?;
    let (width, height) = parse_dimensions(dims)?;
    let at_frame = frame
        .trim()
        .parse()
        .map_err(|_| format!("invalid frame number '{frame}'"))?;
    Ok(ResizeEvent {
        size: SurfaceSize::new(width, height),
        at_frame,
    })
}

pub fn execute(cmd: ParticleCommands) -> Result<()> {
    match cmd {
        ParticleCommands::Info { width, config } => handle_info(width, config.as_deref()),
        ParticleCommands::Config { format, config } => handle_config(format, config.as_deref()),
        ParticleCommands::Simulate {
            scene,
            frames,
            resize,
            particles,
            json,
        } => handle_simulate(&scene, frames, resize, particles, json),
        ParticleCommands::Render {
            scene,
            frames,
            output,
            sequence,
            background,
        } => handle_render(&scene, frames, &output, sequence, background),
        ParticleCommands::Run {
            scene,
            fps,
            duration,
        } => handle_run(&scene, fps, duration),
    }
}

fn handle_info(width: f32, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let device = config.device_for_width(width);

    println!("=== Particle Field for {width}px viewport ===");
    key_value_table(vec![
        ("Device class", device.to_string()),
        ("Particles", config.count_for(device).to_string()),
        ("Mobile breakpoint", format!("{}px", config.mobile_breakpoint)),
        ("Point size", format_range(config.size.min, config.size.max)),
        ("Hue", format_range(config.hue.min, config.hue.max)),
        ("Life (frames)", format!("{} .. {}", config.life.min, config.life.max)),
        (
            "Twinkle",
            format!(
                "{} .. {} (step {})",
                config.twinkle.lower, config.twinkle.upper, config.twinkle.step
            ),
        ),
        ("Bounds margin", format!("{}px", config.margin)),
        (
            "Halo",
            format!(
                "{}x radius, {}x alpha",
                config.glow.radius_scale, config.glow.alpha_scale
            ),
        ),
    ])
    .printstd();

    Ok(())
}

fn handle_config(format: ConfigFormat, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    print!("{}", render_config(&config, format)?);
    if format == ConfigFormat::Json {
        println!();
    }
    Ok(())
}

/// Aggregate view of a field after a headless run
#[derive(Debug, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub device: String,
    pub frames: u64,
    pub particles: usize,
    pub reseeds: u64,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub age_max: u32,
    pub brightening: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_states: Option<Vec<Particle>>,
}

impl SimulationSummary {
    fn collect(field: &ParticleField, seed: u64, include_particles: bool) -> Self {
        let particles = field.particles();
        let opacity_min = particles
            .iter()
            .map(|p| p.opacity)
            .fold(f32::INFINITY, f32::min);
        let opacity_max = particles
            .iter()
            .map(|p| p.opacity)
            .fold(f32::NEG_INFINITY, f32::max);

        Self {
            seed,
            width: field.size().width,
            height: field.size().height,
            device: field.device().to_string(),
            frames: field.frame_count(),
            particles: field.len(),
            reseeds: field.reseed_count(),
            opacity_min: if particles.is_empty() { 0.0 } else { opacity_min },
            opacity_max: if particles.is_empty() { 0.0 } else { opacity_max },
            age_max: particles.iter().map(|p| p.age).max().unwrap_or(0),
            brightening: particles.iter().filter(|p| p.opacity_dir > 0.0).count(),
            particle_states: include_particles.then(|| particles.to_vec()),
        }
    }
}

fn handle_simulate(
    scene: &SceneArgs,
    frames: u64,
    resize: Option<ResizeEvent>,
    list_particles: bool,
    json: bool,
) -> Result<()> {
    let (mut field, seed) = scene.build_field()?;

    for frame in 0..frames {
        if let Some(event) = resize
            && event.at_frame == frame
        {
            field.resize(event.size);
        }
        field.step();
    }

    let summary = SimulationSummary::collect(&field, seed, list_particles);

    if json {
        let text =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{text}");
        return Ok(());
    }

    println!("=== Simulation Summary ===");
    key_value_table(vec![
        ("Seed", summary.seed.to_string()),
        (
            "Surface",
            format!("{}x{} ({})", summary.width, summary.height, summary.device),
        ),
        ("Frames", summary.frames.to_string()),
        ("Particles", summary.particles.to_string()),
        ("Reseeds", summary.reseeds.to_string()),
        (
            "Opacity",
            format_range(summary.opacity_min, summary.opacity_max),
        ),
        ("Oldest particle", format!("{} frames", summary.age_max)),
        (
            "Brightening",
            format_percentage(if summary.particles == 0 {
                0.0
            } else {
                summary.brightening as f64 / summary.particles as f64
            }),
        ),
    ])
    .printstd();

    if list_particles {
        println!("\n=== Particles ===");
        let mut table = create_table(vec![
            "#", "X", "Y", "VX", "VY", "Size", "Opacity", "Hue", "Age", "Life",
        ]);
        for (i, p) in field.particles().iter().enumerate() {
            add_table_row(
                &mut table,
                vec![
                    i.to_string(),
                    format!("{:.1}", p.position.x),
                    format!("{:.1}", p.position.y),
                    format!("{:.3}", p.velocity.x),
                    format!("{:.3}", p.velocity.y),
                    format!("{:.2}", p.size),
                    format!("{:.3}", p.opacity),
                    format!("{:.1}", p.hue),
                    p.age.to_string(),
                    p.life.to_string(),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn sequence_path(output: &Path, index: u64) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    output.with_file_name(format!("{stem}_{index:05}.png"))
}

fn handle_render(
    scene: &SceneArgs,
    frames: u64,
    output: &Path,
    sequence: Option<u64>,
    background: Option<[u8; 4]>,
) -> Result<()> {
    if frames == 0 {
        bail!("At least one frame must be rendered");
    }
    check_raster_size(scene.size()?)?;
    let (field, seed) = scene.build_field()?;
    let size = field.size();
    let surface = match background {
        Some(color) => RasterSurface::new(size, color),
        None => RasterSurface::transparent(size),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let first_saved = frames.saturating_sub(sequence.unwrap_or(0));
    let pb = create_progress_bar(frames, "Rendering");
    let mut animation = AnimationLoop::new(field, surface);
    let mut write_error = None;
    let mut written = Vec::new();

    animation.run_with(&mut FixedFrames::new(frames), |tick, surface| {
        pb.inc(1);
        if sequence.is_some() && tick.index >= first_saved && write_error.is_none() {
            let path = sequence_path(output, tick.index);
            match surface.save_png(&path) {
                Ok(()) => written.push(path),
                Err(e) => write_error = Some(e),
            }
        }
    });
    pb.finish_and_clear();

    if let Some(e) = write_error {
        return Err(e);
    }

    animation.surface().save_png(output)?;
    let bytes = fs::metadata(output).map(|m| m.len()).unwrap_or(0);

    println!(
        "Rendered {frames} frames ({} particles, seed {seed}) to {} ({})",
        animation.field().len(),
        output.display(),
        format_bytes(bytes)
    );
    if !written.is_empty() {
        println!("Wrote {} sequence frames next to it", written.len());
    }
    Ok(())
}

fn handle_run(scene: &SceneArgs, fps: u32, duration: f64) -> Result<()> {
    if !(duration.is_finite() && duration > 0.0) {
        bail!("Duration must be a positive number of seconds, got {duration}");
    }
    let (field, seed) = scene.build_field()?;
    let surface = RecordingSurface::new(field.size());
    let mut animation = AnimationLoop::new(field, surface);
    let mut scheduler = Interval::from_fps(fps);

    let stop = animation.stop_handle();
    let run_for = Duration::try_from_secs_f64(duration)
        .with_context(|| format!("Duration of {duration} seconds is too long"))?;
    let stopper = thread::spawn(move || {
        thread::sleep(run_for);
        stop.stop();
    });

    let spinner = create_spinner(&format!("Animating {} particles", animation.field().len()));
    let stats = animation.run(&mut scheduler);
    spinner.finish_and_clear();

    if stopper.join().is_err() {
        log::warn!("Stop timer thread panicked");
    }

    let achieved = stats.frames as f64 / duration;
    println!("=== Animation Loop ===");
    key_value_table(vec![
        ("Seed", seed.to_string()),
        (
            "Target rate",
            format!("{:.1} fps", 1.0 / scheduler.period().as_secs_f64()),
        ),
        ("Frames", stats.frames.to_string()),
        ("Achieved rate", format!("{achieved:.1} fps")),
        ("Reseeds", stats.reseeded.to_string()),
        ("Stopped by handle", stats.stopped.to_string()),
    ])
    .printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goblin_particles::ParticleConfig;

    #[test]
    fn test_parse_resize() {
        assert_eq!(
            parse_resize("800x600@120"),
            Ok(ResizeEvent {
                size: SurfaceSize::new(800.0, 600.0),
                at_frame: 120
            })
        );
        assert!(parse_resize("800x600").is_err());
        assert!(parse_resize("800x600@soon").is_err());
    }

    #[test]
    fn test_sequence_path() {
        assert_eq!(
            sequence_path(Path::new("out/glow.png"), 7),
            PathBuf::from("out/glow_00007.png")
        );
    }

    #[test]
    fn test_summary_counts() {
        let scene = SceneArgs {
            width: 320.0,
            height: 640.0,
            seed: Some(4),
            config: None,
        };
        let (mut field, seed) = scene.build_field().unwrap();
        for _ in 0..50 {
            field.step();
        }
        let summary = SimulationSummary::collect(&field, seed, true);
        assert_eq!(summary.particles, 35);
        assert_eq!(summary.device, "mobile");
        assert_eq!(summary.frames, 50);
        assert_eq!(summary.particle_states.map(|p| p.len()), Some(35));
        assert!(summary.opacity_min <= summary.opacity_max);
    }

    #[test]
    fn test_default_config_helper() {
        assert_eq!(load_config(None).unwrap(), ParticleConfig::default());
    }
}
