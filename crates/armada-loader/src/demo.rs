//! One demonstration sub-directory.
//!
//! ```text
//! demo_03/
//!   joint_angles.csv          time,s0,...,w2 with a header row
//!   object_poses.csv          stacked 4x4 object transforms, no header
//!   region_of_interest.txt    optional, a single float
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use armada_core::constants::{DEFAULT_REGION_OF_INTEREST, UNTRACEABLE_SCORE};
use armada_core::errors::LoaderError;
use armada_core::models::{Demonstration, Point2};
use tracing::debug;

use crate::joint_limits::JointLimits;

pub const TRAJECTORY_FILE: &str = "joint_angles.csv";
pub const OBJECT_POSES_FILE: &str = "object_poses.csv";
pub const REGION_OF_INTEREST_FILE: &str = "region_of_interest.txt";

/// Load the demonstration recorded in `dir`.
///
/// A missing trajectory gives the demonstration the lowest score rather
/// than an error; the object poses are required.
pub fn load_demonstration(dir: &Path, limits: &JointLimits) -> Result<Demonstration, LoaderError> {
    let trajectory_path = dir.join(TRAJECTORY_FILE);
    let poses_path = dir.join(OBJECT_POSES_FILE);

    let score = if trajectory_path.is_file() {
        let rows = read_trajectory(&trajectory_path, limits.len())?;
        limits
            .score(rows.iter().map(Vec::as_slice))
            .ok_or_else(|| LoaderError::Parse {
                path: trajectory_path.display().to_string(),
                message: "trajectory has no rows".to_string(),
            })?
    } else {
        debug!(dir = %dir.display(), "no trajectory recorded");
        UNTRACEABLE_SCORE
    };

    let object_position = read_object_position(&poses_path)?;
    let region_of_interest = read_region_of_interest(&dir.join(REGION_OF_INTEREST_FILE))?;

    Ok(Demonstration {
        trajectory_file: trajectory_path.display().to_string(),
        object_poses_file: poses_path.display().to_string(),
        score,
        region_of_interest,
        object_position,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, LoaderError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|_| LoaderError::FileNotFound {
            path: path.display().to_string(),
        })
}

fn csv_error(path: &Path, e: csv::Error) -> LoaderError {
    LoaderError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn parse_float(path: &Path, row: usize, col: usize, field: &str) -> Result<f64, LoaderError> {
    field.trim().parse().map_err(|e| LoaderError::Parse {
        path: path.display().to_string(),
        message: format!("row {row}, col {col}: bad float {field:?}: {e}"),
    })
}

/// Joint columns `1..=joints` of every row after the header.
fn read_trajectory(path: &Path, joints: usize) -> Result<Vec<Vec<f64>>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(open(path)?);

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let row = (1..=joints)
            .map(|col| {
                let field = record.get(col).ok_or_else(|| LoaderError::Parse {
                    path: path.display().to_string(),
                    message: format!("row {}: missing joint column {col}", row_idx + 1),
                })?;
                parse_float(path, row_idx + 1, col, field)
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Translation of the first object: last column of the first two rows.
fn read_object_position(path: &Path) -> Result<Point2, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(open(path)?);

    let mut coords = [0.0; 2];
    let mut records = reader.records();
    for (row, coord) in coords.iter_mut().enumerate() {
        let record = records
            .next()
            .ok_or_else(|| LoaderError::Parse {
                path: path.display().to_string(),
                message: format!("expected at least 2 rows, found {row}"),
            })?
            .map_err(|e| csv_error(path, e))?;
        let last = record.len().saturating_sub(1);
        let field = record.get(last).unwrap_or_default();
        *coord = parse_float(path, row + 1, last, field)?;
    }
    Ok(Point2::new(coords[0], coords[1]))
}

fn read_region_of_interest(path: &Path) -> Result<f64, LoaderError> {
    if !path.is_file() {
        return Ok(DEFAULT_REGION_OF_INTEREST);
    }
    let content = fs::read_to_string(path).map_err(|e| LoaderError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_float(path, 1, 0, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_position_reads_the_last_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OBJECT_POSES_FILE);
        fs::write(&path, "1,0,0,0.91\n0,1,0,-0.12\n0,0,1,-0.06\n0,0,0,1\n").unwrap();
        assert_eq!(read_object_position(&path).unwrap(), Point2::new(0.91, -0.12));
    }

    #[test]
    fn one_row_of_poses_is_not_enough() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OBJECT_POSES_FILE);
        fs::write(&path, "1,0,0,0.91\n").unwrap();
        assert!(matches!(
            read_object_position(&path),
            Err(LoaderError::Parse { .. })
        ));
    }

    #[test]
    fn trajectory_skips_the_time_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TRAJECTORY_FILE);
        fs::write(&path, "time,a,b\n0.0,1.5,2.5\n0.1,1.0,2.0\n").unwrap();
        let rows = read_trajectory(&path, 2).unwrap();
        assert_eq!(rows, vec![vec![1.5, 2.5], vec![1.0, 2.0]]);
    }

    #[test]
    fn short_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TRAJECTORY_FILE);
        fs::write(&path, "time,a,b\n0.0,1.5\n").unwrap();
        assert!(read_trajectory(&path, 2).is_err());
    }

    #[test]
    fn region_of_interest_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REGION_OF_INTEREST_FILE);
        assert_eq!(read_region_of_interest(&path).unwrap(), DEFAULT_REGION_OF_INTEREST);
        fs::write(&path, "2.25\n").unwrap();
        assert_eq!(read_region_of_interest(&path).unwrap(), 2.25);
    }
}
