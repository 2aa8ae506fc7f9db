#![warn(clippy::pedantic)]

use std::{fs, io, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use env_logger::TimestampPrecision;
use itertools::{Itertools, MinMaxResult};
use layer_solver::{CubeState, SolveOutcome, Solution, Solver, SolverConfig, parse_moves};
use log::{LevelFilter, debug, info};
use thiserror::Error;

/// Solves Rubik's Cubes layer by layer using only front turns, bottom turns
/// and whole-cube rotations
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A solver configuration file, in TOML format. Missing fields take their
    /// default values.
    #[arg(long, short = 'c', value_name = "SOLVER_CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single cube.
    Solve {
        /// A move sequence to apply to a solved cube, e.g. "F D' Y2".
        #[arg(long, conflicts_with = "facelets", required_unless_present = "facelets")]
        scramble: Option<String>,
        /// A scanned state: 48 color letters (Y W G O B R), eight per face in
        /// the order U D L F R B. Whitespace is ignored.
        #[arg(long)]
        facelets: Option<String>,
    },
    /// Solve random scrambles and report how long the solutions are.
    Random {
        /// Number of random moves in each scramble.
        #[arg(long, short, default_value_t = 25)]
        length: usize,
        /// Seed for the scramble generator. A random seed is used if omitted.
        #[arg(long, short)]
        seed: Option<u64>,
        /// How many scrambles to solve.
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Print the default solver configuration as TOML.
    DefaultConfig,
}

#[derive(Error, Debug)]
enum ConfigError {
    #[error("Failed to read solver configuration file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse solver configuration file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<SolverConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str::<SolverConfig>(&text).map_err(|source| ConfigError::Parse { path, source })
}

fn print_solution(solution: &Solution) {
    println!("Solution ({} moves): {}", solution.trace.len(), solution.trace);
}

/// Minimum, mean and maximum of the solution lengths, if there are any.
fn length_summary(lengths: &[usize]) -> Option<(usize, f64, usize)> {
    let (min, max) = match lengths.iter().minmax() {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(&length) => (length, length),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    #[allow(clippy::cast_precision_loss)]
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    Some((min, mean, max))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let solver = Solver::new(load_config(cli.config)?);
    debug!("Using {:?}", solver.config());

    match cli.command {
        Commands::Solve { scramble, facelets } => {
            let mut cube = match (scramble, facelets) {
                (Some(scramble), _) => {
                    let mut cube = CubeState::solved();
                    cube.apply_moves(&parse_moves(&scramble)?)?;
                    cube
                }
                (None, Some(facelets)) => facelets.parse::<CubeState>()?,
                (None, None) => return Err(eyre!("Either --scramble or --facelets is required")),
            };
            info!("Solving\n{cube}");

            let solution = solver.solve(&mut cube)?;
            print_solution(&solution);
            if solution.outcome == SolveOutcome::UnsolvableScramble {
                return Err(eyre!(
                    "Unsolvable scramble; the cube must have been reassembled incorrectly"
                ));
            }
        }
        Commands::Random {
            length,
            seed,
            count,
        } => {
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            println!("Seed: {seed}");
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut cube = CubeState::new();

            let mut lengths = Vec::with_capacity(count);
            for _ in 0..count {
                let scramble = cube.reset_scrambled(length, &mut rng);
                println!("Scramble: {}", scramble.iter().join(" "));

                let solution = solver.solve(&mut cube)?;
                print_solution(&solution);
                lengths.push(solution.trace.len());
            }

            if let Some((min, mean, max)) = length_summary(&lengths) {
                println!("Solution lengths: min {min}, mean {mean:.1}, max {max}");
            }
        }
        Commands::DefaultConfig => {
            print!("{}", toml::to_string_pretty(&SolverConfig::default())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::length_summary;

    #[test]
    fn summarizes_solution_lengths() {
        assert_eq!(length_summary(&[]), None);
        assert_eq!(length_summary(&[42]), Some((42, 42.0, 42)));
        assert_eq!(length_summary(&[30, 10, 20]), Some((10, 20.0, 30)));
    }
}
