//! Point sets as CSV with `x,y` header columns (read and written via Polars).

use anyhow::{Context, Result};
use polars::prelude::*;
use slopes::{Point, PointSet};
use std::fs::File;
use std::path::Path;

pub fn read_points_csv(path: &Path) -> Result<PointSet> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let xs = float_column(&df, "x")?;
    let ys = float_column(&df, "y")?;
    tracing::info!(rows = df.height(), path = %path.display(), "loaded points");
    let pts = xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect();
    PointSet::new(pts).with_context(|| format!("validating {}", path.display()))
}

pub fn write_points_csv(path: &Path, points: &PointSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("null `{name}` at row {row}")))
        .collect()
}
