use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec2;
use tileworld_input::{HostEvent, Key};
use tileworld_kernel::TileGrid;
use tileworld_render::{DebugTextRenderer, RenderGridBuffer, TileRenderer};
use tileworld_runtime::{Clock, Handler, HeadlessHost, ManualClock, Scheduler};
use tileworld_stream::compute_view_window;
use tileworld_tools::{GridInspector, LogContext};
use tileworld_viewer::{TileViewer, ViewerConfig};

#[derive(Parser)]
#[command(name = "tileworld-cli", about = "Headless tileworld tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// World selection shared by every command that builds a grid.
#[derive(Args)]
struct WorldArgs {
    /// JSON viewer configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Terrain seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in tiles
    #[arg(long)]
    grid_width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    grid_height: Option<u32>,
}

impl WorldArgs {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = ViewerConfig::load_or_default(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.grid_width {
            config.grid_width = width;
        }
        if let Some(height) = self.grid_height {
            config.grid_height = height;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Pan {
    Left,
    Right,
    Up,
    Down,
}

impl Pan {
    fn key(self) -> Key {
        match self {
            Pan::Left => Key::Left,
            Pan::Right => Key::Right,
            Pan::Up => Key::Up,
            Pan::Down => Key::Down,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Generate terrain and print a summary
    Generate {
        #[command(flatten)]
        world: WorldArgs,
        /// Print the whole grid as ASCII art
        #[arg(long)]
        map: bool,
        /// Describe these columns
        #[arg(long, value_delimiter = ',')]
        columns: Vec<u32>,
    },
    /// Print the window a camera would show
    View {
        #[command(flatten)]
        world: WorldArgs,
        /// Camera centre, x in tiles (defaults to the grid centre)
        #[arg(long)]
        x: Option<f32>,
        /// Camera centre, y in tiles (defaults to the grid centre)
        #[arg(long)]
        y: Option<f32>,
        /// Display width in pixels
        #[arg(long, default_value = "1024")]
        width: u32,
        /// Display height in pixels
        #[arg(long, default_value = "768")]
        height: u32,
    },
    /// Run the fixed-rate loop on a simulated clock with a scripted pan
    Simulate {
        #[command(flatten)]
        world: WorldArgs,
        /// Simulated seconds to run
        #[arg(long, default_value = "3")]
        seconds: u64,
        /// Direction to pan during the first half of the run
        #[arg(long, value_enum, default_value = "right")]
        pan: Pan,
        /// Simulation ticks per second
        #[arg(long)]
        tps: Option<u32>,
    },
}

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Draw an entire grid, top row first.
fn render_map(grid: &TileGrid) -> String {
    let extent = grid.extent();
    let window = compute_view_window(extent.as_vec2() / 2.0, extent.as_vec2(), extent, extent);
    let mut buffer = RenderGridBuffer::new();
    buffer.generate(grid, &window);

    let mut renderer = DebugTextRenderer::new();
    let mut canvas = String::new();
    renderer.upload(&buffer);
    renderer.draw(&mut canvas, glam::Mat4::IDENTITY);
    canvas
}

fn generate(world: &WorldArgs, map: bool, columns: &[u32]) -> Result<()> {
    let config = world.viewer_config()?;
    let viewer = TileViewer::new(&config, DebugTextRenderer::new())?;
    let grid = viewer.grid();

    println!("seed={}", viewer.seed());
    println!("{}", GridInspector::summary(grid));
    for (kind, count) in GridInspector::kind_counts(grid) {
        println!("  {kind:?}: {count}");
    }
    for &x in columns {
        match GridInspector::inspect_column(grid, x) {
            Some(info) => println!("{info}"),
            None => println!("Column {x} out of range"),
        }
    }
    if map {
        print!("{}", render_map(grid));
    }
    Ok(())
}

fn view(world: &WorldArgs, x: Option<f32>, y: Option<f32>, width: u32, height: u32) -> Result<()> {
    let config = world.viewer_config()?;
    let mut viewer = TileViewer::new(&config, DebugTextRenderer::new())?;
    let mut canvas = String::new();

    viewer.on_open(&mut canvas);
    viewer.on_resize(width, height);
    let center = viewer.camera().center();
    viewer
        .camera_mut()
        .set_center(Vec2::new(x.unwrap_or(center.x), y.unwrap_or(center.y)));
    viewer.on_prepare_render();
    viewer.on_render(&mut canvas);

    let window = viewer.view_window();
    println!(
        "seed={} center=({:.2}, {:.2}) offset=({}, {}) size={}x{}",
        viewer.seed(),
        window.center.x,
        window.center.y,
        window.offset.x,
        window.offset.y,
        window.size.x,
        window.size.y
    );
    print!("{canvas}");
    Ok(())
}

fn simulate(world: &WorldArgs, seconds: u64, pan: Pan, tps: Option<u32>) -> Result<()> {
    let mut config = world.viewer_config()?;
    if let Some(tps) = tps {
        config.ticks_per_second = tps;
        config.validate()?;
    }

    let clock = ManualClock::new(NANOS_PER_SECOND);
    let mut scheduler = Scheduler::new(clock.clone(), config.ticks_per_second)?;
    let mut viewer = TileViewer::new(&config, DebugTextRenderer::new())?;
    let mut host = HeadlessHost::new(
        clock.clone(),
        config.window_width,
        config.window_height,
        String::new(),
    );

    let end = seconds.max(1) * NANOS_PER_SECOND;
    host.schedule(0, HostEvent::key_down(pan.key()));
    host.schedule(end / 2, HostEvent::key_up(pan.key()));
    host.schedule(end, HostEvent::key_down(Key::Escape));
    tracing::info!(seconds, events = host.pending(), "running scripted session");
    scheduler.run(&mut host, &mut viewer);

    let center = viewer.camera().center();
    println!("seed={}", viewer.seed());
    println!("elapsed={:.3}s", clock.now() as f64 / NANOS_PER_SECOND as f64);
    println!("{}", scheduler.stats());
    println!("presents={}", host.presents());
    println!("camera=({:.3}, {:.3})", center.x, center.y);
    print!("{}", host.canvas_ref());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logs = LogContext::init(cli.verbose, cli.log_file.as_deref())?;

    match &cli.command {
        Commands::Info => {
            println!("tileworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tileworld_common::crate_info());
            println!("kernel: {}", tileworld_kernel::crate_info());
            println!("input: {}", tileworld_input::crate_info());
            println!("stream: {}", tileworld_stream::crate_info());
            println!("render: {}", tileworld_render::crate_info());
            println!("author: {}", tileworld_author::crate_info());
            println!("tools: {}", tileworld_tools::crate_info());
            println!("runtime: {}", tileworld_runtime::crate_info());
            println!("viewer: {}", tileworld_viewer::crate_info());
        }
        Commands::Generate {
            world,
            map,
            columns,
        } => generate(world, *map, columns)?,
        Commands::View {
            world,
            x,
            y,
            width,
            height,
        } => view(world, *x, *y, *width, *height)?,
        Commands::Simulate {
            world,
            seconds,
            pan,
            tps,
        } => simulate(world, *seconds, *pan, *tps)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_common::NO_TILE;

    #[test]
    fn map_has_one_line_per_row() {
        let mut grid = TileGrid::new(4, 3);
        grid.set(glam::IVec2::new(0, 0), 0x10).unwrap();
        let map = render_map(&grid);
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows, ["....", "....", "#..."]);
        assert_eq!(grid.get(glam::IVec2::new(1, 0)), Some(NO_TILE));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "tileworld-cli",
            "simulate",
            "--seed",
            "5",
            "--pan",
            "up",
            "--seconds",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                world,
                seconds,
                pan,
                ..
            } => {
                assert_eq!(world.seed, Some(5));
                assert_eq!(seconds, 2);
                assert_eq!(pan.key(), Key::Up);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn overrides_apply_over_defaults() {
        let world = WorldArgs {
            config: None,
            seed: Some(1),
            grid_width: Some(32),
            grid_height: None,
        };
        let config = world.viewer_config().unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, ViewerConfig::default().grid_height);

        let empty = WorldArgs {
            grid_height: Some(0),
            ..world
        };
        assert!(empty.viewer_config().is_err());
    }
}
