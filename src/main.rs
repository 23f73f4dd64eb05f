//! Oriented Pattern Grid
//!
//! Drops multi-cell patterns onto a fixed-size voxel grid under quarter-turn
//! rotations, keeping each one only if it fits entirely inside the grid and
//! clear of earlier patterns. Prints the result as z-slices.

use std::num::NonZeroU32;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use glam::{IVec3, UVec3};
use log::LevelFilter;

use orientgrid::geometry::euler_degrees;
use orientgrid::{Explorer, Grid, GridError, Pattern, PlacementError};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("unknown pattern '{0}', expected one of {names}", names = Pattern::NAMES.join(", "))]
    UnknownPattern(String),
}

/// Places rotated patterns onto a voxel grid.
#[derive(Parser)]
#[command(name = "orientgrid")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    explore: ExploreArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Try many random placements of a pattern and report how many fit.
    Explore(ExploreArgs),
    /// Place one pattern at a given anchor and rotation.
    Place(PlaceArgs),
    /// Orient a single local offset and mark the cell it lands on.
    Orient(OrientArgs),
}

#[derive(Args)]
struct GridArgs {
    /// Grid dimensions along x, y and z.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = vec![10, 10, 10])]
    dims: Vec<u32>,

    /// Edge length of one cell, used for cell centers.
    #[arg(long, default_value_t = 1.01)]
    cell_size: f32,
}

impl GridArgs {
    fn build(&self) -> Result<Grid, GridError> {
        Grid::new(UVec3::from_slice(&self.dims), self.cell_size)
    }
}

#[derive(Args)]
struct ExploreArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Number of random placements to attempt.
    #[arg(long, default_value_t = 200)]
    attempts: usize,

    /// Seed for anchors and rotations.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stock pattern to place.
    #[arg(long, default_value = "hexa-l", value_parser = Pattern::NAMES)]
    pattern: String,

    /// Print the grid slices afterwards.
    #[arg(long)]
    show: bool,

    /// List every occupied cell with its tile and spatial center.
    #[arg(long)]
    centers: bool,
}

#[derive(Args)]
struct PlaceArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// World coordinate of the pattern origin.
    #[arg(long, num_args = 3, allow_negative_numbers = true, default_values_t = vec![2, 8, 0])]
    anchor: Vec<i32>,

    /// Rotation in degrees about x, y and z.
    #[arg(long, num_args = 3, allow_negative_numbers = true, default_values_t = vec![0.0, 0.0, -90.0])]
    euler: Vec<f32>,

    /// Stock pattern to place.
    #[arg(long, default_value = "hexa-l", value_parser = Pattern::NAMES)]
    pattern: String,
}

#[derive(Args)]
struct OrientArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Offset relative to the anchor before rotation.
    #[arg(long, num_args = 3, allow_negative_numbers = true, default_values_t = vec![2, 0, 0])]
    local: Vec<i32>,

    /// World coordinate of the local origin.
    #[arg(long, num_args = 3, allow_negative_numbers = true, default_values_t = vec![5, 2, 0])]
    anchor: Vec<i32>,

    /// Rotation in degrees about x, y and z.
    #[arg(long, num_args = 3, allow_negative_numbers = true, default_values_t = vec![0.0, 0.0, -190.0])]
    euler: Vec<f32>,
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Explore(args)) => run_explore(&args),
        Some(Command::Place(args)) => run_place(&args),
        Some(Command::Orient(args)) => run_orient(&args),
        None => run_explore(&cli.explore),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn stock_pattern(name: &str) -> Result<Pattern, CliError> {
    Pattern::named(name).ok_or_else(|| CliError::UnknownPattern(name.to_string()))
}

/// Runs the random placement loop and prints the outcome.
fn run_explore(args: &ExploreArgs) -> Result<(), CliError> {
    let mut grid = args.grid.build()?;
    let pattern = stock_pattern(&args.pattern)?;

    let report = Explorer::new(args.seed).explore(&mut grid, &pattern, args.attempts, NonZeroU32::MIN);
    println!("{} patterns added.", report.placed);

    if args.show {
        print!("{}", grid);
    }
    if args.centers {
        for cell in grid.occupied() {
            let center = grid.cell_center(cell);
            println!("{} tile {} center {}", cell.index(), cell.tile(), center);
        }
    }
    Ok(())
}

/// Places one pattern and prints the grid.
fn run_place(args: &PlaceArgs) -> Result<(), CliError> {
    let mut grid = args.grid.build()?;
    let pattern = stock_pattern(&args.pattern)?;
    let rotation = euler_degrees(args.euler[0], args.euler[1], args.euler[2]);

    match grid.try_place_pattern(NonZeroU32::MIN, &pattern, IVec3::from_slice(&args.anchor), &rotation) {
        Ok(placement) => {
            println!("Placed {} cells.", placement.cells.len());
            print!("{}", grid);
        }
        Err(PlacementError::OutOfBounds { .. }) => println!("Pattern outside grid bounds."),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

/// Orients one offset and marks the destination with tile 1.
fn run_orient(args: &OrientArgs) -> Result<(), CliError> {
    let mut grid = args.grid.build()?;
    let local = IVec3::from_slice(&args.local);
    let anchor = IVec3::from_slice(&args.anchor);
    let rotation = euler_degrees(args.euler[0], args.euler[1], args.euler[2]);

    match grid.try_orient_index(local, anchor, &rotation) {
        Ok(world) => {
            // a one-cell pattern is the only way to write a cell
            if let Err(e) = grid.try_place_pattern(NonZeroU32::MIN, [local], anchor, &rotation) {
                println!("{}", e);
                return Ok(());
            }
            let cell = grid.cell_at(world)?;
            println!("{} -> {} (tile {})", local, world, cell.tile());
        }
        Err(_) => println!("Oriented cell outside grid bounds."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_run_is_explore() {
        let cli = Cli::parse_from(["orientgrid", "--attempts", "50", "--seed", "9"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.explore.attempts, 50);
        assert_eq!(cli.explore.grid.dims, vec![10, 10, 10]);
        assert_eq!(cli.explore.pattern, "hexa-l");
    }

    #[test]
    fn test_place_accepts_negative_angles() {
        let cli = Cli::parse_from([
            "orientgrid", "place", "--anchor", "2", "8", "0", "--euler", "0", "0", "-90",
        ]);
        let Some(Command::Place(args)) = cli.command else {
            panic!("expected place subcommand");
        };
        assert_eq!(args.euler, vec![0.0, 0.0, -90.0]);
        assert!(run_place(&args).is_ok());
    }

    #[test]
    fn test_unknown_pattern_is_rejected() {
        assert!(Cli::try_parse_from(["orientgrid", "explore", "--pattern", "blob"]).is_err());
    }

    #[test]
    fn test_bad_cell_size_is_an_error() {
        let cli = Cli::parse_from(["orientgrid", "orient", "--cell-size", "0"]);
        let Some(Command::Orient(args)) = cli.command else {
            panic!("expected orient subcommand");
        };
        assert!(matches!(
            run_orient(&args),
            Err(CliError::Grid(GridError::InvalidCellSize(_)))
        ));
    }

    #[test]
    fn test_stock_pattern_rejects_unknown_name() {
        for name in Pattern::NAMES {
            assert!(stock_pattern(name).is_ok(), "{name} should resolve");
        }
        let err = stock_pattern("blob").unwrap_err();
        assert!(matches!(&err, CliError::UnknownPattern(name) if name == "blob"));
        assert!(err.to_string().contains("hexa-l"));
    }

    #[test]
    fn test_nan_rotation_marks_nothing() {
        let cli = Cli::parse_from(["orientgrid", "orient", "--euler", "NaN", "0", "0"]);
        let Some(Command::Orient(args)) = cli.command else {
            panic!("expected orient subcommand");
        };
        assert!(args.euler[0].is_nan());
        assert!(run_orient(&args).is_ok());
    }
}
