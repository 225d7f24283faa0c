use bealtmian_common::SessionConfig;
use bealtmian_input::InputSnapshot;
use bealtmian_kernel::{CameraPose, Clock, GamePhase, ManualClock, Session};
use bealtmian_render::{DisplayList, DrawStats, FrameComposer};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bealtmian-cli", about = "Headless bealtmian runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default configuration
    Info,
    /// Run frames against a simulated clock and report what was drawn
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "200")]
        frames: u64,
        /// Movement keys held for the whole run, e.g. "wd"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// RNG seed for cube placement and sky noise
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of cubes to scatter
        #[arg(long, default_value = "15")]
        cubes: usize,
        /// Print the last frame's draw calls
        #[arg(long)]
        dump: bool,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Outcome of a simulated run.
#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: u64,
    loading_frames: u64,
    playing_frames: u64,
    floor_quads_drawn: usize,
    floor_quads_skipped: usize,
    cube_faces_drawn: usize,
    cube_faces_skipped: usize,
    draw_calls: DrawStats,
    final_camera: CameraPose,
}

fn simulate(
    config: SessionConfig,
    frames: u64,
    input: InputSnapshot,
) -> anyhow::Result<(SimulationReport, DisplayList)> {
    let clock = ManualClock::new();
    let interval = config.frame_interval;
    let seed = config.seed.unwrap_or_default();
    let mut composer = FrameComposer::new(Session::new(config, clock.now())?);
    let mut list = DisplayList::new();

    let mut report = SimulationReport {
        seed,
        loading_frames: 0,
        playing_frames: 0,
        floor_quads_drawn: 0,
        floor_quads_skipped: 0,
        cube_faces_drawn: 0,
        cube_faces_skipped: 0,
        draw_calls: DrawStats::default(),
        final_camera: *composer.session().camera(),
    };

    for _ in 0..frames {
        let frame = composer.tick(clock.now(), input, &mut list);
        match frame.phase {
            GamePhase::Loading => report.loading_frames += 1,
            GamePhase::Playing => report.playing_frames += 1,
        }
        if frame.entered_play {
            tracing::info!(at_ms = clock.now().as_millis() as u64, "entered play");
        }
        report.floor_quads_drawn += frame.floor_drawn;
        report.floor_quads_skipped += frame.floor_skipped;
        report.cube_faces_drawn += frame.faces_drawn;
        report.cube_faces_skipped += frame.faces_skipped;
        report.draw_calls += list.stats();
        clock.advance(interval);
    }

    report.final_camera = *composer.session().camera();
    Ok((report, list))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("bealtmian-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", bealtmian_common::crate_info());
            println!("kernel: {}", bealtmian_kernel::crate_info());
            println!("input: {}", bealtmian_input::crate_info());
            println!("render: {}", bealtmian_render::crate_info());
            println!("defaults: {:#?}", SessionConfig::default());
        }
        Commands::Simulate {
            frames,
            keys,
            seed,
            cubes,
            dump,
            json,
        } => {
            let config = SessionConfig {
                seed: Some(seed),
                cube_count: cubes,
                ..SessionConfig::default()
            };
            let input = InputSnapshot::from_chars(&keys);
            let (report, last_frame) = simulate(config, frames, input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Simulated {frames} frames (seed={seed}): loading={}, playing={}",
                    report.loading_frames, report.playing_frames
                );
                println!(
                    "Floor quads: drawn={} skipped={}",
                    report.floor_quads_drawn, report.floor_quads_skipped
                );
                println!(
                    "Cube faces: drawn={} skipped={}",
                    report.cube_faces_drawn, report.cube_faces_skipped
                );
                let c = report.final_camera;
                println!(
                    "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.3}",
                    c.position.x, c.position.y, c.position.z, c.yaw
                );
            }
            if dump {
                print!("{last_frame}");
            }
        }
    }

    Ok(())
}
