use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use trail_profile::io::read_route_dataset;
use trail_profile::project::{SVG_HEIGHT, SVG_WIDTH, route_svg_path};
use trail_profile::{
    COMBINED_PATH, DATA_DIR, DEFAULT_MIN_DISTANCE_M, combine_files, convert_dir, convert_file,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert GPS tracks to route and elevation JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one GPX/FIT track into route-dayN.json and elevation-dayN.json
    Convert {
        /// Input track file
        input: PathBuf,

        /// Day number used in the output file names
        #[arg(long)]
        day: u32,

        /// Output directory for JSON files
        #[arg(long, default_value = DATA_DIR)]
        output_dir: PathBuf,

        /// Minimum distance in meters between points (0 disables reduction)
        #[arg(long, default_value_t = DEFAULT_MIN_DISTANCE_M)]
        min_distance: f64,
    },
    /// Convert every track below a directory, named after each file
    Batch {
        input_dir: PathBuf,

        #[arg(long, default_value = DATA_DIR)]
        output_dir: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MIN_DISTANCE_M)]
        min_distance: f64,
    },
    /// Stitch two day routes into one continuous route
    Combine {
        #[arg(long, default_value = "data/route-day1.json")]
        day1: PathBuf,

        #[arg(long, default_value = "data/route-day2.json")]
        day2: PathBuf,

        #[arg(short, long, default_value = COMBINED_PATH)]
        output: PathBuf,
    },
    /// Print the SVG path of a route file
    Path {
        route: PathBuf,

        #[arg(long, default_value_t = SVG_WIDTH)]
        width: f64,

        #[arg(long, default_value_t = SVG_HEIGHT)]
        height: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Convert {
            input,
            day,
            output_dir,
            min_distance,
        } => {
            info!("Converting track file: {}", input.display());
            info!("Day: {}", day);
            info!("Output directory: {}", output_dir.display());
            convert_file(&input, &output_dir, &format!("day{}", day), min_distance)?;
            info!("Conversion complete!");
        }
        Command::Batch {
            input_dir,
            output_dir,
            min_distance,
        } => {
            let summary = convert_dir(&input_dir, &output_dir, min_distance)?;
            if !summary.failed.is_empty() {
                return Err(format!("{} track files failed to convert", summary.failed.len()).into());
            }
        }
        Command::Combine { day1, day2, output } => {
            combine_files(&day1, &day2, &output)?;
        }
        Command::Path {
            route,
            width,
            height,
        } => {
            let dataset = read_route_dataset(&route)?;
            println!("{}", route_svg_path(&dataset, &route, width, height)?);
        }
    }

    Ok(())
}
