use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use log::{debug, warn, LevelFilter};

use grid_search::path_io::{format_path, is_connected, load_path, save_path};
use grid_search::{Algorithm, CellMap, PathingGrid, SearchConfig, SearchNode};

#[derive(Parser, Debug)]
#[command(name = "gridsearch")]
#[command(about = "Finds paths on grid maps with uninformed and heuristic search")]
struct Args {
    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Warn, global = true)]
    verbosity: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a path between two cells
    Search(SearchArgs),

    /// Show a map, optionally with a stored path
    Show {
        map: PathBuf,

        /// Path file with one `row,column` coordinate per line
        path: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// 0: breadth-first, 1: depth-first, 2: iterative deepening,
    /// 3: straight-line heuristic, 4: diagonal heuristic
    algorithm: usize,

    /// Map file made of `.` (free) and `#` (blocked) cells
    map: PathBuf,

    start_row: i32,
    start_column: i32,
    goal_row: i32,
    goal_column: i32,

    /// Depth limit of the depth-first searches
    #[arg(short, long, default_value_t = grid_search::solver::DEFAULT_DEPTH_LIMIT)]
    depth_limit: usize,

    /// Give up after expanding this many nodes
    #[arg(short, long)]
    max_expansions: Option<usize>,

    /// Write the found path to this file
    #[arg(short, long, value_name = "FILE")]
    save_path: Option<PathBuf>,

    /// Answer "no path" without searching when start and goal lie on different components.
    /// Skipped searches report no expanded nodes.
    #[arg(short, long)]
    component_check: bool,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            depth_limit: self.depth_limit,
            max_expansions: self.max_expansions,
            check_components: self.component_check,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity)
        .format_timestamp(None)
        .init();

    match args.command {
        Command::Search(search_args) => {
            let algorithm = Algorithm::from_index(search_args.algorithm)?;
            let cell_map = CellMap::load(&search_args.map)?;
            let grid = PathingGrid::from_cells(
                cell_map,
                (search_args.start_row, search_args.start_column),
                (search_args.goal_row, search_args.goal_column),
            )?;
            let config = search_args.config();
            search(algorithm, grid, &config, search_args.save_path)
        }
        Command::Show { map, path } => {
            let mut cell_map = CellMap::load(&map)?;
            if let Some(file) = path {
                let path = load_path(&file)?;
                if !is_connected(&path) {
                    warn!("{} contains non-adjacent consecutive steps", file.display());
                }
                cell_map.set_path(path);
            }
            print!("{}", cell_map);
            Ok(())
        }
    }
}

fn search(
    algorithm: Algorithm,
    grid: PathingGrid,
    config: &SearchConfig,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("{}", algorithm.name());
    let (path, expanded, elapsed) = {
        let outcome = algorithm.solve(&grid, config);
        let expanded = outcome.expanded();
        (outcome.goal.map(SearchNode::into_path), expanded, outcome.elapsed)
    };

    match &path {
        Some(path) => {
            debug!("Path: {}", format_path(path));
            if let Some(file) = &output {
                save_path(file, path)?;
            }
        }
        None => println!("No path found."),
    }
    println!("Nodes expanded: {}", expanded);
    println!("  Milliseconds: {}", elapsed.as_millis());
    if let Some(path) = &path {
        println!("      Distance: {}", path.len() - 1);
    }

    let mut cell_map = grid.into_map();
    if let Some(path) = path {
        cell_map.set_path(path);
    }
    print!("{}", cell_map);
    Ok(())
}
