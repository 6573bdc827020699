//! Reading and writing paths as one `row,column` coordinate per line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::coordinate::Coordinate;
use crate::error::PathError;

pub fn write_path<W: Write>(mut writer: W, path: &[Coordinate]) -> std::io::Result<()> {
    for p in path {
        writeln!(writer, "{}", p)?;
    }
    writer.flush()
}

/// Parses coordinates from `reader`, skipping blank lines.
pub fn read_path<R: BufRead>(reader: R) -> Result<Vec<Coordinate>, PathError> {
    let mut path = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let coordinate = line
            .parse()
            .map_err(|source| PathError::Parse { line: i + 1, source })?;
        path.push(coordinate);
    }
    Ok(path)
}

pub fn save_path<P: AsRef<Path>>(file: P, path: &[Coordinate]) -> Result<(), PathError> {
    let w = BufWriter::new(File::create(file)?);
    Ok(write_path(w, path)?)
}

pub fn load_path<P: AsRef<Path>>(file: P) -> Result<Vec<Coordinate>, PathError> {
    read_path(BufReader::new(File::open(file)?))
}

/// Formats a path on a single line, e.g. for logging.
pub fn format_path(path: &[Coordinate]) -> String {
    path.iter().map(|p| format!("({})", p)).join(" -> ")
}

/// Checks that each coordinate lies in the same or an adjacent cell as the one before it.
pub fn is_connected(path: &[Coordinate]) -> bool {
    path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}
