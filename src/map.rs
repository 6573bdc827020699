use core::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::coordinate::Coordinate;
use crate::error::{MapError, Result};
use crate::CELL_SIZE;

/// Marker of a cell that can be entered.
pub const FREE: char = '.';
/// Marker of an obstacle.
pub const BLOCKED: char = '#';

/// Largest number of cells along an axis. One move beyond the far edge must still fit in an
/// [i32] coordinate.
pub const MAX_CELLS: usize = (i32::MAX / CELL_SIZE) as usize - 2;

/// [CellMap] holds the free/blocked cells of a map in a [BoolGrid] where blocked cells are
/// [true], together with a [UnionFind] of 8-connected free cells and an optional recorded path
/// used for display. The cells never change after loading.
#[derive(Clone, Debug)]
pub struct CellMap {
    grid: BoolGrid,
    components: UnionFind<usize>,
    path: Option<Vec<Coordinate>>,
}

impl CellMap {
    /// Builds a map from rows of [FREE] and [BLOCKED] markers. Rows are trimmed and blank rows
    /// are skipped.
    pub fn from_rows<'a, I>(rows: I) -> Result<CellMap>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let rows = rows
            .into_iter()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>();
        let width = rows.first().ok_or(MapError::Empty)?.chars().count();
        if let Some((row, line)) = rows
            .iter()
            .find_position(|line| line.chars().count() != width)
        {
            return Err(MapError::UnequalRows {
                row,
                expected: width,
                found: line.chars().count(),
            });
        }

        if width > MAX_CELLS || rows.len() > MAX_CELLS {
            return Err(MapError::TooLarge {
                width,
                height: rows.len(),
            });
        }

        let mut grid = BoolGrid::new(width, rows.len(), false);
        for (y, line) in rows.iter().enumerate() {
            for (x, marker) in line.chars().enumerate() {
                match marker {
                    FREE => {}
                    BLOCKED => grid.set(x as i32, y as i32, true),
                    found => {
                        return Err(MapError::InvalidCell {
                            found,
                            row: y,
                            column: x,
                        })
                    }
                }
            }
        }
        let mut map = CellMap {
            grid,
            components: UnionFind::new(0),
            path: None,
        };
        map.generate_components();
        debug!("Loaded {}x{} map", map.height(), map.width());
        Ok(map)
    }

    /// Reads a map from a text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CellMap> {
        fs::read_to_string(path)?.parse()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Checks whether the cell at `(row, column)` lies inside the map and is free.
    pub fn is_free_cell(&self, row: i32, column: i32) -> bool {
        row >= 0
            && column >= 0
            && (row as usize) < self.height()
            && (column as usize) < self.width()
            && !self.grid.get(column, row)
    }

    /// A fine-grained coordinate is valid when it is non-negative and falls inside a free cell.
    pub fn is_valid_position(&self, coordinate: &Coordinate) -> bool {
        if coordinate.row() < 0 || coordinate.column() < 0 {
            return false;
        }
        let cell = coordinate.cell();
        self.is_free_cell(cell.y, cell.x)
    }

    /// Checks whether the cells of both coordinates are free and on the same 8-connected
    /// component. Every search step stays within the same or an adjacent cell, so [false] means
    /// no path can exist; [true] does not guarantee one.
    pub fn reachable(&self, from: &Coordinate, to: &Coordinate) -> bool {
        self.is_valid_position(from)
            && self.is_valid_position(to)
            && self
                .components
                .equiv(self.cell_ix(from.cell()), self.cell_ix(to.cell()))
    }

    /// Retrieves the component id of the cell containing a valid coordinate.
    pub fn get_component(&self, coordinate: &Coordinate) -> usize {
        self.components.find(self.cell_ix(coordinate.cell()))
    }

    /// Records a path to draw with [Display](fmt::Display).
    pub fn set_path(&mut self, path: Vec<Coordinate>) {
        self.path = Some(path);
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        self.path.as_deref()
    }

    fn cell_ix(&self, cell: Point) -> usize {
        cell.y as usize * self.width() + cell.x as usize
    }

    /// Generates a new [UnionFind] structure and links up free cells with their free
    /// 8-neighbours.
    fn generate_components(&mut self) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        self.components = UnionFind::new(self.width() * self.height());
        for y in 0..h {
            for x in 0..w {
                if !self.is_free_cell(y, x) {
                    continue;
                }
                let parent_ix = self.cell_ix(Point::new(x, y));
                // Links to the remaining four neighbours are made from their side.
                [
                    Point::new(x + 1, y),
                    Point::new(x - 1, y + 1),
                    Point::new(x, y + 1),
                    Point::new(x + 1, y + 1),
                ]
                .into_iter()
                .filter(|p| self.is_free_cell(p.y, p.x))
                .map(|p| self.cell_ix(p))
                .collect::<Vec<_>>()
                .into_iter()
                .for_each(|ix| {
                    self.components.union(parent_ix, ix);
                });
            }
        }
    }
}

impl FromStr for CellMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        CellMap::from_rows(s.lines())
    }
}

/// Draws the map with one character per cell. Cells crossed by the recorded path are drawn as
/// `*`, its first and last cells as `S` and `G`.
impl fmt::Display for CellMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self.path().unwrap_or_default();
        let crossed = path.iter().map(Coordinate::cell).collect::<FxHashSet<_>>();
        let first = path.first().map(Coordinate::cell);
        let last = path.last().map(Coordinate::cell);
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if first == Some(p) {
                        'S'
                    } else if last == Some(p) {
                        'G'
                    } else if crossed.contains(&p) {
                        '*'
                    } else if self.grid.get(x, y) {
                        BLOCKED
                    } else {
                        FREE
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
