use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_seek::bh1750::Bh1750;
use lumen_seek::{Config, IlluminanceSource};

/// Print live lux readings to check sensor wiring and pick thresholds.
#[derive(Debug, Parser)]
#[command(name = "probe", version)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between readings
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("load config")?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║     Light Sensor Probe                               ║");
    println!("╚══════════════════════════════════════════════════════╝\n");
    println!("Sensor: i2c-{} at 0x{:02X}", config.sensor.i2c_bus, config.sensor.address);
    println!("Cover and uncover the sensor to check the range. Ctrl+C to stop.\n");

    let mut sensor = Bh1750::new(&config.sensor).context("init light sensor")?;

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum = 0.0_f64;
    let mut valid = 0_u64;
    let mut invalid = 0_u64;

    println!(
        "{:^8} | {:^12} | {:^12} | {:^12} | {:^12}",
        "Sample", "Lux", "Min", "Max", "Average"
    );
    println!("{:-<8}-+-{:-<12}-+-{:-<12}-+-{:-<12}-+-{:-<12}", "", "", "", "", "");

    loop {
        match sensor.read() {
            Some(lux) => {
                min = min.min(lux);
                max = max.max(lux);
                sum += f64::from(lux);
                valid += 1;

                println!(
                    "{:^8} | {:>12.1} | {:>12.1} | {:>12.1} | {:>12.1}",
                    valid + invalid,
                    lux,
                    min,
                    max,
                    sum / valid as f64
                );
            }
            None => {
                invalid += 1;
                println!("{:^8} | {:>12} |", valid + invalid, "invalid");
            }
        }

        thread::sleep(Duration::from_millis(cli.interval_ms));
    }
}
