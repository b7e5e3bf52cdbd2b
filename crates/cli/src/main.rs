#![deny(unsafe_code)]
//! CLI binary for the flowart flow-field renderer.
//!
//! Subcommands:
//! - `render`: trace, smooth, and stroke N lines, then write a PNG
//! - `schema`: print the sketch parameters with their defaults

mod error;
mod logger;

use clap::{Parser, Subcommand};
use error::CliError;
use flowart_sketch::{seeds_from_json, FlowSketch, SketchParams};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "flowart", about = "Flow-field line art renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw flow lines and write a PNG.
    Render {
        /// Number of lines (overrides `lines` in --params).
        #[arg(short = 'n', long)]
        lines: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Sketch parameters as a JSON object (see `flowart schema`).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Seed for the velocity grid.
        #[arg(long)]
        vector_seed: Option<u64>,

        /// Seed for line start points.
        #[arg(long)]
        line_seed: Option<u64>,

        /// Seed for stroke hue and width.
        #[arg(long)]
        color_seed: Option<u64>,
    },
    /// Print the parameter schema.
    Schema,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&SketchParams::param_schema())?
            );
        }
        Command::Render {
            lines,
            output,
            params,
            vector_seed,
            line_seed,
            color_seed,
        } => {
            let started = Instant::now();
            let json: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut sketch_params = SketchParams::from_json(&json)?;
            if let Some(n) = lines {
                sketch_params.lines = n;
            }
            let mut seeds = seeds_from_json(&json);
            seeds.vectors = vector_seed.or(seeds.vectors);
            seeds.lines = line_seed.or(seeds.lines);
            seeds.colors = color_seed.or(seeds.colors);

            let mut sketch = FlowSketch::new(sketch_params, seeds)?;
            sketch.render()?;
            flowart_sketch::snapshot::write_png(sketch.canvas(), &output)?;

            let elapsed = started.elapsed();
            log::info!("rendered in {:.3}s", elapsed.as_secs_f64());

            let resolved = sketch.seeds();
            let (width, height) = (sketch.canvas().width(), sketch.canvas().height());
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "lines": sketch_params.lines,
                    "params": sketch_params.to_json(),
                    "seeds": resolved,
                    "elapsed_secs": elapsed.as_secs_f64(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} lines ({width}x{height}, seeds v={} l={} c={}) -> {}",
                    sketch_params.lines,
                    resolved.vectors,
                    resolved.lines,
                    resolved.colors,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logger::init_logging(cli.log_level.as_deref());
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
