use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lumen_seek::bh1750::Bh1750;
use lumen_seek::stepper::GpioStepper;
use lumen_seek::{Config, Controller, SystemClock};

#[derive(Debug, Parser)]
#[command(name = "lumen-seek", version, about = "Light-seeking single-axis platform controller")]
struct Cli {
    /// Config file (defaults to ./lumen-seek.toml, then built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many control cycles instead of running forever
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("load config")?;

    let stepper = GpioStepper::new(&config.motor).context("init stepper driver")?;
    let sensor = Bh1750::new(&config.sensor).context("init light sensor")?;

    info!(
        "sampling {:?} every cycle, sweeping {:?} on a {:.0}% drop",
        config.sampling.window(),
        config.scan.sweep(),
        (1.0 - config.scan.drop_ratio) * 100.0
    );

    let mut controller = Controller::new(config, stepper, sensor, SystemClock::new());

    match cli.cycles {
        Some(cycles) => {
            if let Some(outcome) = controller.run_cycles(cycles) {
                info!("last cycle: {}", outcome);
            }
            info!("finished {} cycles", cycles);
            Ok(())
        }
        None => controller.run(),
    }
}
