mod host;
mod keymap;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tileworld_render_wgpu::WgpuTileRenderer;
use tileworld_runtime::{Scheduler, SystemClock};
use tileworld_tools::LogContext;
use tileworld_viewer::{TileViewer, ViewerConfig};

use crate::host::WinitHost;

#[derive(Parser)]
#[command(name = "tileworld-desktop", about = "Interactive tile-world viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON viewer configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Terrain seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in tiles
    #[arg(long)]
    grid_width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    grid_height: Option<u32>,

    /// Simulation ticks per second
    #[arg(long)]
    tps: Option<u32>,
}

impl Cli {
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
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logs = LogContext::init(cli.verbose, cli.log_file.as_deref())?;

    let config = cli.viewer_config()?;
    let mut scheduler = Scheduler::new(SystemClock::new(), config.ticks_per_second)?;
    let mut viewer = TileViewer::new(&config, WgpuTileRenderer::new())?;
    let mut host = WinitHost::open("tileworld", config.window_width, config.window_height)?;

    scheduler.run(&mut host, &mut viewer);
    tracing::info!(stats = %scheduler.stats(), "exiting");
    Ok(())
}
