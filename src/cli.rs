use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Backcountry trail analysis CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "backcountry", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify trail mileage at a single buffer distance
    Analyze(AnalyzeArgs),

    /// Run the analysis across several buffer distances
    Sweep(SweepArgs),
}

/// Inputs, outputs, and tuning shared by every run.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Roads shapefile (.shp, with its .dbf sidecar)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub roads: PathBuf,

    /// Railways shapefile, consulted when --include-railways is set
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub railways: Option<PathBuf>,

    /// Trails shapefile
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub trails: PathBuf,

    /// Output directory, created if missing
    #[arg(short, long, value_hint = ValueHint::DirPath, default_value = "output")]
    pub out: PathBuf,

    /// Count railways as disruptors
    #[arg(long)]
    pub include_railways: bool,

    /// Disruptor class to exclude, repeatable; defaults to the
    /// non-motorized classes when not given
    #[arg(long = "exclude-type", value_name = "FCLASS")]
    pub exclude_types: Vec<String>,

    /// Discard surviving segments shorter than this
    #[arg(long, default_value_t = 0.1, value_name = "MILES")]
    pub min_segment_miles: f64,

    /// Vertices per quarter circle in buffer caps
    #[arg(long, default_value_t = 8)]
    pub quad_segments: usize,

    /// EPSG code the input shapefiles are in
    #[arg(long, default_value_t = 4326)]
    pub input_epsg: u32,

    /// EPSG code of the planar working CRS
    #[arg(long, default_value_t = 32610)]
    pub epsg: u32,

    /// Report threshold for the long-trail count
    #[arg(long, default_value_t = 10.0, value_name = "MILES")]
    pub headline_miles: f64,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Buffer distance around every disruptor
    #[arg(long, default_value_t = 1.0, value_name = "MILES")]
    pub buffer_miles: f64,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Buffer distances to run, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [1.0, 2.0, 5.0, 10.0],
        value_name = "MILES"
    )]
    pub distances: Vec<f64>,
}
