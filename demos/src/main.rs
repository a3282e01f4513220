//! Headless driver: builds a random board and ticks each requested search to
//! completion, one expansion per frame, then prints a summary.
//!
//! Run: cargo run --bin stepgrid -- --rows 40 --cols 40 --walls 0.2 --seed 7
//!
//! Set `RUST_LOG=debug` (or `trace` for every expansion) to follow the runs.

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stepgrid_search::{Algorithm, GridConfig, Point, RunController, Status};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Search {
    Bfs,
    Dijkstra,
    Astar,
    All,
}

impl Search {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Bfs => &[Algorithm::Bfs],
            Self::Dijkstra => &[Algorithm::Dijkstra],
            Self::Astar => &[Algorithm::AStar],
            Self::All => &Algorithm::ALL,
        }
    }
}

/// Step-wise BFS / Dijkstra / A* on a randomly walled grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 40)]
    rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 40)]
    cols: i32,

    /// Probability for each cell to be a wall
    #[arg(short, long, default_value_t = GridConfig::DEFAULT_WALL_PROBABILITY)]
    walls: f64,

    /// Goal cell as ROW,COL (defaults to the right edge, six rows from the bottom)
    #[arg(short, long, value_parser = parse_cell)]
    goal: Option<Point>,

    /// RNG seed for a reproducible board (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Which search to run
    #[arg(short, long, value_enum, default_value_t = Search::All)]
    algorithm: Search,
}

fn parse_cell(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("row: {e}"))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("col: {e}"))?;
    Ok(Point::from_row_col(row, col))
}

/// What one finished run looked like.
struct Summary {
    status: Status,
    ticks: usize,
    peak_frontier: usize,
    distance: Option<i32>,
    path_len: usize,
}

fn drive(rc: &mut RunController, algorithm: Algorithm) -> Summary {
    rc.start(algorithm);
    let mut peak_frontier = rc.frontier_len();
    let status = loop {
        let status = rc.tick();
        peak_frontier = peak_frontier.max(rc.frontier_len());
        if status != Status::Running {
            break status;
        }
    };
    Summary {
        status,
        ticks: rc.ticks(),
        peak_frontier,
        distance: rc.goal_distance(),
        path_len: rc.path().len(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = GridConfig::with_size(args.rows, args.cols).with_wall_probability(args.walls);
    if let Some(goal) = args.goal {
        config = config.with_goal(goal);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let graph = match config.build(&mut rng) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "board {}x{} seed {seed}: start {}, goal {}, {} walls",
        graph.rows(),
        graph.cols(),
        graph.start(),
        graph.goal(),
        graph.wall_count()
    );

    let mut rc = RunController::new(graph);
    for &algorithm in args.algorithm.algorithms() {
        let s = drive(&mut rc, algorithm);
        let name = algorithm.to_string();
        let distance = s.distance.map_or_else(|| "N/A".to_string(), |d| d.to_string());
        println!(
            "{name:<9} {:<12} ticks {:>5}  peak frontier {:>4}  length {distance:>4}  path cells {}",
            s.status.to_string(),
            s.ticks,
            s.peak_frontier,
            s.path_len
        );
    }
    rc.reset();
}
