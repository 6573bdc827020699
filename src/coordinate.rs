use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;

use crate::error::ParseCoordinateError;
use crate::{CELL_SIZE, DIAGONAL_SIZE};

/// A point in the fine-grained unit space. One cell spans [CELL_SIZE] units on each axis, so a
/// coordinate can sit anywhere inside a cell, not only at its centre.
///
/// Ordering is by row, then column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    row: i32,
    column: i32,
}

impl Coordinate {
    /// Builds a coordinate from raw units.
    pub const fn new(row: i32, column: i32) -> Coordinate {
        Coordinate { row, column }
    }

    /// The coordinate at the centre of the cell at `(cell_row, cell_column)`.
    pub const fn from_cell(cell_row: i32, cell_column: i32) -> Coordinate {
        Coordinate {
            row: cell_row * CELL_SIZE + CELL_SIZE / 2,
            column: cell_column * CELL_SIZE + CELL_SIZE / 2,
        }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    /// Index of the containing cell, using the [Point] convention of `x` for the column and `y`
    /// for the row. Only meaningful for non-negative coordinates.
    pub fn cell(&self) -> Point {
        Point::new(self.column / CELL_SIZE, self.row / CELL_SIZE)
    }

    /// Translates the coordinate by raw unit offsets.
    pub fn step(&self, d_row: i32, d_column: i32) -> Coordinate {
        Coordinate::new(self.row + d_row, self.column + d_column)
    }

    /// Checks whether `other` lies in the same cell or one of the 8 surrounding cells.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        // The extra unit absorbs the truncation of the per-axis division.
        self.cell_distance_squared(other) <= 1 + 1
    }

    /// Checks whether both coordinates fall inside the same cell.
    pub fn same_cell(&self, other: &Coordinate) -> bool {
        self.row / CELL_SIZE == other.row / CELL_SIZE
            && self.column / CELL_SIZE == other.column / CELL_SIZE
    }

    /// Euclidean distance in whole cell steps, truncated.
    pub fn straight_line_distance(&self, other: &Coordinate) -> i32 {
        (self.cell_distance_squared(other) as f64).sqrt() as i32
    }

    /// Octile distance in steps: diagonal moves cover [DIAGONAL_SIZE] units per axis, straight
    /// moves cover [CELL_SIZE] units on one axis.
    pub fn diagonal_distance(&self, other: &Coordinate) -> i32 {
        let f = (i64::from(self.row) - i64::from(other.row)).abs();
        let c = (i64::from(self.column) - i64::from(other.column)).abs();
        let d = f.min(c);
        let r = f.max(c) - d;
        (d / i64::from(DIAGONAL_SIZE) + r / i64::from(CELL_SIZE)) as i32
    }

    // Widened so that coordinates read from arbitrary path files cannot overflow.
    fn cell_distance_squared(&self, other: &Coordinate) -> i64 {
        let d_row = (i64::from(self.row) - i64::from(other.row)) / i64::from(CELL_SIZE);
        let d_column = (i64::from(self.column) - i64::from(other.column)) / i64::from(CELL_SIZE);
        d_row * d_row + d_column * d_column
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parses the `row,column` form produced by [Display](fmt::Display).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordinateError::MissingSeparator(s.to_owned()))?;
        Ok(Coordinate::new(
            row.trim().parse()?,
            column.trim().parse()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_centre() {
        let c = Coordinate::from_cell(1, 2);
        assert_eq!(c.row(), CELL_SIZE + CELL_SIZE / 2);
        assert_eq!(c.column(), 2 * CELL_SIZE + CELL_SIZE / 2);
        assert_eq!(c.cell(), Point::new(2, 1));
    }

    #[test]
    fn same_cell_is_reflexive_and_symmetric() {
        let a = Coordinate::from_cell(3, 4);
        let b = a.step(CELL_SIZE / 2 - 1, -(CELL_SIZE / 2));
        assert!(a.same_cell(&a));
        assert!(a.same_cell(&b));
        assert!(b.same_cell(&a));
        assert!(!a.same_cell(&a.step(CELL_SIZE, 0)));
    }

    #[test]
    fn adjacency_covers_the_moore_neighbourhood() {
        let centre = Coordinate::from_cell(5, 5);
        for d_row in -1..=1 {
            for d_column in -1..=1 {
                assert!(centre.is_adjacent(&Coordinate::from_cell(5 + d_row, 5 + d_column)));
            }
        }
        assert!(!centre.is_adjacent(&Coordinate::from_cell(7, 5)));
        assert!(!centre.is_adjacent(&Coordinate::from_cell(3, 6)));
    }

    #[test]
    fn distances_are_symmetric() {
        let p = Coordinate::from_cell(1, 1);
        let q = Coordinate::from_cell(100, 20);
        assert_eq!(p.straight_line_distance(&q), q.straight_line_distance(&p));
        assert_eq!(p.diagonal_distance(&q), q.diagonal_distance(&p));
        // sqrt(99^2 + 19^2) = 100.8
        assert_eq!(p.straight_line_distance(&q), 100);
        // 19 cells of diagonal take 26 steps, 80 straight cells take 80 more.
        assert_eq!(p.diagonal_distance(&q), 19 * CELL_SIZE / DIAGONAL_SIZE + 80);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let low = Coordinate::new(i32::MIN, i32::MIN);
        let high = Coordinate::new(i32::MAX, i32::MAX);
        assert!(!low.is_adjacent(&high));
        assert!(low.straight_line_distance(&high) > 0);
        assert!(low.diagonal_distance(&high) > 0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinate::from_cell(7, 3);
        assert_eq!(p.straight_line_distance(&p), 0);
        assert_eq!(p.diagonal_distance(&p), 0);
    }

    #[test]
    fn diagonal_steps_count_as_single_moves() {
        let p = Coordinate::from_cell(0, 0);
        let q = p.step(3 * DIAGONAL_SIZE, 3 * DIAGONAL_SIZE);
        assert_eq!(p.diagonal_distance(&q), 3);
    }

    #[test]
    fn text_round_trip() {
        for text in ["4059,12178", "0,0", "81190,-5741"] {
            let c: Coordinate = text.parse().unwrap();
            assert_eq!(c.to_string(), text);
        }
        let c: Coordinate = " 12 , 34 ".parse().unwrap();
        assert_eq!(c, Coordinate::new(12, 34));
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            "1234".parse::<Coordinate>(),
            Err(ParseCoordinateError::MissingSeparator(_))
        ));
        assert!(matches!(
            "12,ab".parse::<Coordinate>(),
            Err(ParseCoordinateError::InvalidNumber(_))
        ));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut coordinates = vec![
            Coordinate::new(2, 0),
            Coordinate::new(1, 9),
            Coordinate::new(1, 3),
        ];
        coordinates.sort();
        assert_eq!(
            coordinates,
            vec![Coordinate::new(1, 3), Coordinate::new(1, 9), Coordinate::new(2, 0)]
        );
    }
}
