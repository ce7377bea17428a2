use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::render_layout;
use tools::ascii::AsciiRenderer;
use tools::config_file::{ConfigFile, Overrides};
use tools::layout_file::LayoutFile;
use tools::world::WorldListing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Floor count and rooms per floor
    Summary,
    /// Character map of every floor
    Ascii,
    /// World-space positions for every element
    World,
    /// The full layout as JSON
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a multi-floor dungeon layout", long_about = None)]
struct Args {
    /// TOML file with optional [dungeon] and [placement] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    grid_size: Option<u32>,

    #[arg(long)]
    floors: Option<u32>,

    #[arg(long)]
    room_probability: Option<f64>,

    #[arg(long)]
    barrier_probability: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Also write the layout and its settings as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log generation steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tools::init_tracing(args.verbose);

    let mut file = match &args.config {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        None => ConfigFile::default(),
    };
    Overrides {
        seed: args.seed,
        grid_size: args.grid_size,
        floor_count: args.floors,
        room_probability: args.room_probability,
        barrier_probability: args.barrier_probability,
    }
    .apply(&mut file.dungeon);

    let layout = tools::generate_checked(file.dungeon.clone())?;

    if let Some(path) = &args.output {
        LayoutFile::new(file.dungeon.clone(), layout.clone())
            .write_atomic(path)
            .with_context(|| format!("Failed to write layout file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote layout file");
    }

    match args.format {
        OutputFormat::Summary => println!("{layout}"),
        OutputFormat::Ascii => {
            let mut renderer = AsciiRenderer::new(layout.grid_size);
            render_layout(&layout, &mut renderer);
            print!("{}", renderer.finish());
        }
        OutputFormat::World => {
            let mut listing = WorldListing::new(file.placement);
            render_layout(&layout, &mut listing);
            print!("{}", listing.finish());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&layout)
                .context("Failed to serialize layout as JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
