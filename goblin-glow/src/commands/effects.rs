//! Page effect command implementations

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use glam::Vec2;
use goblin_effects::reveal::VISIBLE_CLASS;
use goblin_effects::{
    CardTilt, DeviceClass, FloatingOptions, Rect, RevealOptions, RevealTracker, RippleOptions,
    RippleSet, ScrollEffects, ScrollOptions, TiltOptions, spawn_floating_items,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{
    add_table_row, create_table, format_percentage, key_value_table, parse_dimensions,
    parse_floats,
};

/// Points in a ripple's life that get printed
const RIPPLE_SAMPLES_MS: [u64; 5] = [0, 150, 300, 450, 600];

#[derive(Subcommand)]
pub enum EffectCommands {
    /// Indicator opacity and hero parallax at a scroll offset
    Scroll {
        /// Vertical scroll offset in pixels
        #[arg(long, allow_negative_numbers = true)]
        offset: f32,

        /// Evaluate for a phone-sized viewport
        #[arg(long)]
        mobile: bool,
    },

    /// Card tilt transform for a pointer position
    Tilt {
        /// Card rectangle as X,Y,WIDTH,HEIGHT
        #[arg(long = "rect", value_parser = parse_floats::<4>, default_value = "0,0,300,400")]
        card: [f32; 4],

        /// Pointer position as X,Y
        #[arg(long, value_parser = parse_floats::<2>)]
        pointer: [f32; 2],

        /// Evaluate for a phone-sized viewport
        #[arg(long)]
        mobile: bool,
    },

    /// Ripple geometry and animation for a button click
    Ripple {
        /// Button rectangle as X,Y,WIDTH,HEIGHT
        #[arg(long = "rect", value_parser = parse_floats::<4>, default_value = "0,0,200,48")]
        button: [f32; 4],

        /// Click position as X,Y
        #[arg(long, value_parser = parse_floats::<2>)]
        click: [f32; 2],
    },

    /// Roll the floating loot decorations
    Floating {
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Random seed; a fresh one is drawn and logged when omitted
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print ready-to-insert <img> elements
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Scroll down a page and report when each section is revealed
    Reveal {
        /// Viewport size as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_dimensions, default_value = "1280x720")]
        viewport: (f32, f32),

        /// Section position on the page as TOP,HEIGHT (repeatable)
        #[arg(short, long = "element", value_parser = parse_floats::<2>, required = true)]
        elements: Vec<[f32; 2]>,

        /// Deepest scroll offset to try
        #[arg(long, default_value = "3000")]
        max_scroll: f32,

        /// Scroll distance between evaluations
        #[arg(long, default_value = "50")]
        step: f32,
    },
}

pub fn execute(cmd: EffectCommands) -> Result<()> {
    match cmd {
        EffectCommands::Scroll { offset, mobile } => handle_scroll(offset, device(mobile)),
        EffectCommands::Tilt {
            card,
            pointer,
            mobile,
        } => handle_tilt(rect(card), Vec2::from(pointer), device(mobile)),
        EffectCommands::Ripple { button, click } => handle_ripple(rect(button), Vec2::from(click)),
        EffectCommands::Floating {
            width,
            seed,
            html,
            json,
        } => handle_floating(width, seed, html, json),
        EffectCommands::Reveal {
            viewport,
            elements,
            max_scroll,
            step,
        } => handle_reveal(viewport, &elements, max_scroll, step),
    }
}

fn device(mobile: bool) -> DeviceClass {
    if mobile {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    }
}

fn rect([x, y, width, height]: [f32; 4]) -> Rect {
    Rect::new(x, y, width, height)
}

fn handle_scroll(offset: f32, device: DeviceClass) -> Result<()> {
    let effects = ScrollEffects::new(ScrollOptions::default(), device)
        .context("Invalid scroll options")?;
    let update = effects.on_scroll(offset);

    println!("=== Scroll at {offset}px ({device}) ===");
    key_value_table(vec![
        ("Indicator opacity", format!("{:.3}", update.indicator_opacity)),
        (
            "Hero transform",
            update
                .parallax_transform
                .unwrap_or_else(|| "(disabled)".to_string()),
        ),
    ])
    .printstd();
    Ok(())
}

fn handle_tilt(card: Rect, pointer: Vec2, device: DeviceClass) -> Result<()> {
    let options = TiltOptions::default();
    let mut tilt = CardTilt::new(options, device);

    let Some(transform) = tilt.pointer_move(&card, pointer) else {
        println!("Card tilt is disabled on {device} devices");
        return Ok(());
    };
    let current = tilt.current();

    println!("=== Card Tilt ===");
    key_value_table(vec![
        ("Rotate X", format!("{:.2}deg", current.rotate_x)),
        ("Rotate Y", format!("{:.2}deg", current.rotate_y)),
        ("Scale", current.scale.to_string()),
        ("Transform", transform),
        ("On leave", tilt.pointer_leave().unwrap_or_default()),
    ])
    .printstd();
    Ok(())
}

fn handle_ripple(button: Rect, click: Vec2) -> Result<()> {
    let options = RippleOptions::default();
    let mut ripples = RippleSet::new(options).context("Invalid ripple options")?;
    let ripple = ripples.click(&button, click, Duration::ZERO).clone();

    println!("=== Ripple ===");
    key_value_table(vec![
        ("Diameter", format!("{}px", ripple.size)),
        ("Left", format!("{}px", ripple.left)),
        ("Top", format!("{}px", ripple.top)),
        ("Style", ripple.css(&options)),
    ])
    .printstd();

    println!("\n=== Animation ===");
    let mut table = create_table(vec!["Time", "Scale", "Opacity", "Active"]);
    for ms in RIPPLE_SAMPLES_MS {
        let now = Duration::from_millis(ms);
        ripples.prune(now);
        let (scale, opacity) = match ripple.frame_at(now, &options) {
            Some(frame) => (format!("{:.3}", frame.scale), format!("{:.3}", frame.opacity)),
            None => ("-".to_string(), "-".to_string()),
        };
        add_table_row(
            &mut table,
            vec![format!("{ms}ms"), scale, opacity, ripples.len().to_string()],
        );
    }
    table.printstd();

    println!("\n{}", options.keyframes());
    Ok(())
}

fn handle_floating(width: f32, seed: Option<u64>, html: bool, json: bool) -> Result<()> {
    let seed = seed.unwrap_or_else(|| {
        let seed = rand::rng().random();
        log::info!("Using random seed {seed}");
        seed
    });
    let device = DeviceClass::from_width(width);
    let mut rng = StdRng::seed_from_u64(seed);
    let items = spawn_floating_items(device, &FloatingOptions::default(), &mut rng)
        .context("Invalid floating item options")?;

    if json {
        let text = serde_json::to_string_pretty(&items).context("Failed to serialize items")?;
        println!("{text}");
        return Ok(());
    }
    if html {
        for item in &items {
            println!("{}", item.html());
        }
        return Ok(());
    }

    println!("=== {} floating items ({device}, seed {seed}) ===", items.len());
    let mut table = create_table(vec![
        "Image", "Left", "Width", "Scale", "Duration", "Delay", "Opacity",
    ]);
    for item in &items {
        add_table_row(
            &mut table,
            vec![
                item.image.clone(),
                format!("{:.1}%", item.left_percent),
                format!("{:.0}px", item.width_px),
                format!("{:.2}", item.scale),
                format!("{:.1}s", item.duration_secs),
                format!("{:.1}s", item.delay_secs),
                format!("{:.2}", item.max_opacity),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn handle_reveal(
    (width, height): (f32, f32),
    elements: &[[f32; 2]],
    max_scroll: f32,
    step: f32,
) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        bail!("Scroll step must be positive, got {step}");
    }

    let options = RevealOptions::default();
    let mut tracker = RevealTracker::new(options).context("Invalid reveal options")?;
    tracker.observe_all(0..elements.len());

    let viewport = Rect::new(0.0, 0.0, width, height);
    let mut revealed_at: Vec<Option<f32>> = vec![None; elements.len()];
    let mut ratio_at: Vec<f32> = vec![0.0; elements.len()];
    let ids: Vec<usize> = (0..elements.len()).collect();

    let mut scroll = 0.0;
    while scroll <= max_scroll && tracker.pending() > 0 {
        let rects: Vec<Rect> = elements
            .iter()
            .map(|[top, h]| Rect::new(0.0, top - scroll, width, *h))
            .collect();

        for id in tracker.update(&viewport, ids.iter().zip(rects.iter())) {
            revealed_at[id] = Some(scroll);
            ratio_at[id] = options.intersection_ratio(&viewport, &rects[id]);
        }
        scroll += step;
    }

    println!("=== Reveal ({width}x{height} viewport) ===");
    let mut table = create_table(vec!["#", "Top", "Height", "Revealed at", "Visible"]);
    for (i, [top, h]) in elements.iter().enumerate() {
        let when = match revealed_at[i] {
            Some(offset) => format!("scroll {offset}px (+.{VISIBLE_CLASS})"),
            None => "never".to_string(),
        };
        let visible = if revealed_at[i].is_some() {
            format_percentage(f64::from(ratio_at[i]))
        } else {
            "-".to_string()
        };
        add_table_row(
            &mut table,
            vec![i.to_string(), top.to_string(), h.to_string(), when, visible],
        );
    }
    table.printstd();
    Ok(())
}
