//! `prism`: render a frame with the software rasterizer or the ray tracer
//! and save it as a BMP.

mod cli;
mod config;
mod logger;
mod raster;
mod trace;

use anyhow::Result;
use clap::Parser;

use cli::{Args, Command};
use config::PrismConfig;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let config = match &args.config {
        Some(path) => PrismConfig::load(path)?,
        None => PrismConfig::default(),
    };

    match &args.command {
        Command::Raster(raster_args) => raster::run(raster_args, config.raster),
        Command::Trace(trace_args) => trace::run(trace_args, config.trace),
    }
}
