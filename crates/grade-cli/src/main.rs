//! grade - color grading LUT baker
//!
//! Bakes grading parameters into `.cube` LUTs and evaluates single colors
//! through the same pipeline.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use grade_color::LutFormat;
use grade_color::tonemap::ToneMapper;
use grade_color::transfer::Oetf;

mod commands;

#[derive(Parser)]
#[command(name = "grade")]
#[command(author, version, about = "Color grading LUT baker")]
#[command(long_about = "
Bakes exposure, white balance, CDL, saturation and tone mapping into a
single lookup table, the way a renderer would before uploading it.

3D LUT input is LogC (EI 800) encoded scene-linear Rec.709. Curves of LDR
tone mappers take linear input. Output is display encoded.

Examples:
  grade bake -o look.cube                         # Default ACES legacy look
  grade bake -c look.yaml -o look.cube -d 33      # Preset from YAML
  grade bake -o night.cube --night 0.8 --exposure -1
  grade bake -o curve.cube --tone-mapper filmic   # 1D curve
  grade eval 0.18 0.18 0.18 --tone-mapper agx
  grade eval 0.5 0.3 0.2 --log                    # Input already LogC
  grade list                                      # Tone mappers
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a LUT and write it as .cube
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Grade one color
    #[command(visible_alias = "e")]
    Eval(EvalArgs),

    /// List tone mappers and their LUT capabilities
    #[command(visible_alias = "l")]
    List,
}

/// Grading parameters shared by `bake` and `eval`.
///
/// The YAML file is loaded first; flags override it.
#[derive(Args)]
struct GradeArgs {
    /// YAML file with grading parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tone mapper (see `grade list`)
    #[arg(short, long, value_parser = parse_tone_mapper)]
    tone_mapper: Option<ToneMapper>,

    /// Exposure in stops
    #[arg(long, allow_hyphen_values = true)]
    exposure: Option<f32>,

    /// Night adaptation strength [0, 1]
    #[arg(long)]
    night: Option<f32>,

    /// White balance temperature [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<f32>,

    /// White balance tint [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    tint: Option<f32>,

    /// Contrast [0, 2]
    #[arg(long)]
    contrast: Option<f32>,

    /// Vibrance [0, 2]
    #[arg(long)]
    vibrance: Option<f32>,

    /// Saturation [0, 2]
    #[arg(long)]
    saturation: Option<f32>,

    /// Tone map luminance only
    #[arg(long)]
    luminance_scaling: bool,

    /// Map out-of-gamut output back into sRGB
    #[arg(long)]
    gamut_mapping: bool,

    /// Output curve: linear, srgb, pq
    #[arg(long, value_parser = parse_oetf)]
    oetf: Option<Oetf>,
}

#[derive(Args)]
struct BakeArgs {
    #[command(flatten)]
    grade: GradeArgs,

    /// Output .cube file
    #[arg(short, long)]
    output: PathBuf,

    /// 3D LUT edge length [16, 64]
    #[arg(short, long)]
    dimension: Option<u32>,

    /// 3D texel format: integer (10-10-10-2) or float (half)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<LutFormat>,

    /// LUT title (defaults to the output file stem)
    #[arg(long)]
    title: Option<String>,

    /// Print the effective parameters as YAML
    #[arg(long)]
    print_config: bool,
}

#[derive(Args)]
struct EvalArgs {
    #[command(flatten)]
    grade: GradeArgs,

    /// Color as three values
    #[arg(num_args = 3, required = true, allow_hyphen_values = true)]
    rgb: Vec<f32>,

    /// Input is LogC encoded LUT coordinates instead of scene linear
    #[arg(long)]
    log: bool,
}

fn parse_tone_mapper(s: &str) -> Result<ToneMapper, String> {
    ToneMapper::from_name(&s.to_lowercase()).ok_or_else(|| {
        let names: Vec<_> = ToneMapper::ALL.iter().map(|tm| tm.name()).collect();
        format!("unknown tone mapper '{s}', expected one of: {}", names.join(", "))
    })
}

fn parse_format(s: &str) -> Result<LutFormat, String> {
    match s.to_lowercase().as_str() {
        "integer" | "int" | "1010102" => Ok(LutFormat::Integer),
        "float" | "half" => Ok(LutFormat::Float),
        _ => Err(format!("unknown LUT format '{s}', expected integer or float")),
    }
}

fn parse_oetf(s: &str) -> Result<Oetf, String> {
    match s.to_lowercase().as_str() {
        "linear" => Ok(Oetf::Linear),
        "srgb" => Ok(Oetf::Srgb),
        "pq" | "st2084" => Ok(Oetf::Pq),
        _ => Err(format!("unknown output curve '{s}', expected linear, srgb or pq")),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Bake(args) => commands::bake::run(args, cli.verbose),
        Commands::Eval(args) => commands::eval::run(args, cli.verbose),
        Commands::List => commands::list::run(),
    }
}
