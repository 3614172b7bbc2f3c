//! TSPLIB problem loader.
//!
//! Supports symmetric `TSP` instances with `EUC_2D` coordinates:
//!
//! ```text
//! NAME : square4
//! TYPE : TSP
//! DIMENSION : 4
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 0 0
//! 2 1 0
//! 3 1 1
//! 4 0 1
//! EOF
//! ```
//!
//! Points are returned ordered by id; the point with id 1 is the origin.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::types::Point;

/// Problems found while reading a TSPLIB file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read problem file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported TYPE {0}")]
    UnsupportedType(String),
    #[error("unsupported EDGE_WEIGHT_TYPE {0}")]
    UnsupportedEdgeWeightType(String),
    #[error("cannot parse DIMENSION {0}")]
    InvalidDimension(String),
    #[error("missing DIMENSION before NODE_COORD_SECTION")]
    MissingDimension,
    #[error("line {line}: malformed coordinate line {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("line {line}: point id {id} outside 1..={dimension}")]
    IdOutOfRange { line: usize, id: u64, dimension: usize },
    #[error("line {line}: duplicate point id {id}")]
    DuplicateId { line: usize, id: u64 },
    #[error("expected {expected} points, found {found}")]
    MissingPoints { expected: usize, found: usize },
}

/// Reads and parses the TSPLIB file at `path`.
pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_problem(&text)
}

/// Parses TSPLIB text.
pub fn parse_problem(text: &str) -> Result<Vec<Point>, LoadError> {
    let mut lines = text.lines().enumerate();
    let mut dimension: Option<usize> = None;

    for (_, raw) in lines.by_ref() {
        let mut parts = raw.splitn(2, ':');
        let key = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        match key {
            "TYPE" if value != "TSP" => {
                return Err(LoadError::UnsupportedType(value.to_string()));
            }
            "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                return Err(LoadError::UnsupportedEdgeWeightType(value.to_string()));
            }
            "DIMENSION" => {
                let dim = value
                    .parse::<usize>()
                    .map_err(|_| LoadError::InvalidDimension(value.to_string()))?;
                dimension = Some(dim);
            }
            "NODE_COORD_SECTION" => break,
            _ => {}
        }
    }

    let dimension = dimension.ok_or(LoadError::MissingDimension)?;
    let mut points: BTreeMap<u64, Point> = BTreeMap::new();

    for (idx, raw) in lines {
        let line = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.first() {
            None => continue,
            Some(&"EOF") => break,
            Some(_) => {}
        }
        let malformed = || LoadError::MalformedLine {
            line,
            content: raw.to_string(),
        };
        if tokens.len() < 3 {
            return Err(malformed());
        }
        let id = tokens[0].parse::<u64>().map_err(|_| malformed())?;
        let x = tokens[1].parse::<f64>().map_err(|_| malformed())?;
        let y = tokens[2].parse::<f64>().map_err(|_| malformed())?;

        if id == 0 || usize::try_from(id).map_or(true, |id| id > dimension) {
            return Err(LoadError::IdOutOfRange { line, id, dimension });
        }
        if points.insert(id, Point::new(id, x, y)).is_some() {
            return Err(LoadError::DuplicateId { line, id });
        }
    }

    if points.len() != dimension {
        return Err(LoadError::MissingPoints {
            expected: dimension,
            found: points.len(),
        });
    }
    Ok(points.into_values().collect())
}
