use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use slopes::brute::{count_slopes_naive, min_slope_naive};
use slopes::prelude::*;
use slopes::Breakpoint;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod points_io;
mod provenance;

use points_io::{read_points_csv, write_points_csv};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "slopes-cli")]
#[command(about = "Pairwise slope statistics over planar point sets")]
struct Cmd {
    /// Log per-round selector progress
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write a seeded random point cloud as CSV (columns x,y)
    Generate {
        #[arg(long, default_value_t = 1000)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100.0)]
        half_extent: f64,
        /// Snap coordinates to integers
        #[arg(long)]
        integer_grid: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Minimum pairwise slope
    MinSlope {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Number of pairwise slopes in [alpha, beta]
    Count {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        alpha: f64,
        #[arg(long, allow_hyphen_values = true)]
        beta: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// k-th smallest pairwise slope and a point realizing it
    Select {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        rank: u64,
        #[arg(long, default_value_t = slopes::cfg::DEFAULT_MAX_ROUNDS)]
        max_rounds: usize,
        /// Representative point as `x,y`; defaults to the first input point
        #[arg(long, allow_hyphen_values = true)]
        u: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compare the fast statistics against brute force
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, allow_hyphen_values = true, default_value_t = -1.0)]
        alpha: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        beta: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Generate {
            n,
            seed,
            half_extent,
            integer_grid,
            out,
        } => generate(n, seed, half_extent, integer_grid, &out),
        Action::MinSlope { input, out } => run_min_slope(&input, out.as_deref()),
        Action::Count {
            input,
            alpha,
            beta,
            out,
        } => run_count(&input, alpha, beta, out.as_deref()),
        Action::Select {
            input,
            rank,
            max_rounds,
            u,
            out,
        } => run_select(&input, rank, max_rounds, u.as_deref(), out.as_deref()),
        Action::Check { input, alpha, beta } => run_check(&input, alpha, beta),
        Action::Report => report(),
    }
}

#[derive(Serialize)]
struct MinSlopeReport {
    n: usize,
    /// `None` when no finite slope exists.
    min_slope: Option<f64>,
}

#[derive(Serialize)]
struct CountReport {
    n: usize,
    alpha: f64,
    beta: f64,
    count: u64,
}

#[derive(Serialize)]
struct SelectReport {
    n: usize,
    rank: u64,
    rounds: usize,
    slope: f64,
    exact: bool,
    bracket: [f64; 2],
    pair: Option<[[f64; 2]; 2]>,
    point: Option<[f64; 2]>,
}

impl SelectReport {
    fn new(n: usize, bp: &Breakpoint) -> Self {
        let sel = &bp.selection;
        Self {
            n,
            rank: sel.rank,
            rounds: sel.rounds,
            slope: sel.slope,
            exact: sel.exact,
            bracket: [sel.bracket.lo, sel.bracket.hi],
            pair: sel
                .pair
                .map(|p| [[p.left.x, p.left.y], [p.right.x, p.right.y]]),
            point: bp.point.map(|p| [p.x, p.y]),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
struct CheckReport {
    n: usize,
    alpha: f64,
    beta: f64,
    count_fast: u64,
    count_brute: u64,
    min_fast: Option<f64>,
    min_brute: Option<f64>,
}

impl CheckReport {
    fn agrees(&self) -> bool {
        self.count_fast == self.count_brute && self.min_fast == self.min_brute
    }
}

fn generate(n: usize, seed: u64, half_extent: f64, integer_grid: bool, out: &Path) -> Result<()> {
    tracing::info!(n, seed, half_extent, integer_grid, out = %out.display(), "generate");
    let cfg = PointCloudCfg {
        n,
        half_extent,
        integer_grid,
    };
    let points = draw_points(cfg, seed);
    write_points_csv(out, &points)?;
    write_sidecar(
        out,
        Payload::new(
            "generate",
            json!({
                "n": n,
                "seed": seed,
                "half_extent": half_extent,
                "integer_grid": integer_grid
            }),
        ),
    )?;
    Ok(())
}

fn run_min_slope(input: &Path, out: Option<&Path>) -> Result<()> {
    let mut points = read_points_csv(input)?;
    let report = MinSlopeReport {
        n: points.len(),
        min_slope: min_slope(&mut points).finite(),
    };
    tracing::info!(n = report.n, min_slope = ?report.min_slope, "min-slope");
    emit(
        &report,
        out,
        Payload::new("min-slope", json!({ "input": input })),
    )
}

fn run_count(input: &Path, alpha: f64, beta: f64, out: Option<&Path>) -> Result<()> {
    let mut points = read_points_csv(input)?;
    let count = count_slopes(&mut points, alpha, beta)?;
    tracing::info!(n = points.len(), alpha, beta, count, "count");
    let report = CountReport {
        n: points.len(),
        alpha,
        beta,
        count,
    };
    emit(
        &report,
        out,
        Payload::new(
            "count",
            json!({ "input": input, "alpha": alpha, "beta": beta }),
        ),
    )
}

fn run_select(
    input: &Path,
    rank: u64,
    max_rounds: usize,
    u: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let mut points = read_points_csv(input)?;
    let u = match u {
        Some(text) => parse_point(text)?,
        None => *points
            .points()
            .first()
            .context("input has no points to pick a representative from")?,
    };
    let bp = breakpoint(&mut points, &u, rank, max_rounds)?;
    tracing::info!(
        rank,
        rounds = bp.selection.rounds,
        slope = bp.selection.slope,
        exact = bp.selection.exact,
        "select"
    );
    let report = SelectReport::new(points.len(), &bp);
    emit(
        &report,
        out,
        Payload::new(
            "select",
            json!({
                "input": input,
                "rank": rank,
                "max_rounds": max_rounds,
                "u": [u.x, u.y]
            }),
        ),
    )
}

fn run_check(input: &Path, alpha: f64, beta: f64) -> Result<()> {
    let points = read_points_csv(input)?;
    let report = check(points, alpha, beta)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.agrees() {
        bail!("fast and brute-force statistics disagree");
    }
    tracing::info!(n = report.n, "check passed");
    Ok(())
}

fn check(points: PointSet, alpha: f64, beta: f64) -> Result<CheckReport> {
    let count_brute = count_slopes_naive(points.points(), alpha, beta);
    let min_brute = min_slope_naive(points.points()).finite();
    let mut work = points;
    let count_fast = count_slopes(&mut work, alpha, beta)?;
    let min_fast = min_slope(&mut work).finite();
    Ok(CheckReport {
        n: work.len(),
        alpha,
        beta,
        count_fast,
        count_brute,
        min_fast,
        min_brute,
    })
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "slopes_version": slopes::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Print the report; with `out`, also write it plus a provenance sidecar.
fn emit<T: Serialize>(report: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
            }
            std::fs::write(path, &body).with_context(|| format!("writing {}", path.display()))?;
            write_sidecar(path, payload)?;
        }
        None => println!("{}", String::from_utf8_lossy(&body)),
    }
    Ok(())
}

fn parse_point(text: &str) -> Result<Point> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("expected `x,y`, got `{text}`"))?;
    let x: f64 = x.trim().parse().with_context(|| format!("bad x in `{text}`"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("bad y in `{text}`"))?;
    Ok(Point::new(x, y))
}
