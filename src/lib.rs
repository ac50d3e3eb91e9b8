//! # pathfinding_visualizer
//!
//! The core of a grid pathfinding visualizer. A user paints walls on a
//! 4-connected, uniform-cost grid and runs either a
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! (historically labelled "dijkstra", which it is equivalent to on an unweighted grid) or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with a Manhattan heuristic.
//!
//! Searches do not sleep or render. They are lazy iterators of [SearchEvent]s which the
//! [Engine] applies to its [CellGrid] one [Step] at a time, leaving pacing and drawing to
//! the caller through the [Renderer] trait.
//!
//! ```
//! use pathfinding_visualizer::{Algorithm, Coord, Engine, SearchOutcome};
//!
//! let mut engine = Engine::new(3, 3).unwrap();
//! engine.toggle_wall(Coord::new(1, 1)).unwrap();
//! let outcome = engine.run(Algorithm::Dijkstra).unwrap();
//! assert_eq!(outcome.path().map(|p| p.len()), Some(5));
//! assert!(matches!(outcome, SearchOutcome::Found(_)));
//! ```
pub mod cell;
pub mod engine;
pub mod error;
pub mod pathing_grid;
pub mod render;
pub mod solver;

use core::fmt;
use smallvec::SmallVec;

pub use cell::Cell;
pub use engine::{Action, Engine};
pub use error::{EngineError, ParseGridError};
pub use pathing_grid::CellGrid;
pub use render::{Pacing, Renderer, Step};
pub use solver::{Algorithm, GridSolver, SearchEvent, SearchOutcome};

/// Size of the inline buffers used for neighbourhoods, enough for a 4-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Neighbour offsets as (row, col) deltas in expansion order: up, right, down, left.
/// This order decides which of several equally short paths a search returns.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// A 0-indexed (row, column) position on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two positions share an edge.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The von Neumann neighbourhood in [NEIGHBOUR_OFFSETS] order, clipped to a
    /// `rows` x `cols` grid.
    pub fn neumann_neighborhood(
        &self,
        rows: usize,
        cols: usize,
    ) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = self.row.checked_add_signed(dr)?;
                let col = self.col.checked_add_signed(dc)?;
                (row < rows && col < cols).then_some(Coord { row, col })
            })
            .collect()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_order_is_up_right_down_left() {
        let n = Coord::new(1, 1).neumann_neighborhood(3, 3);
        assert_eq!(
            n.as_slice(),
            &[
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(1, 0)
            ]
        );
    }

    #[test]
    fn neighbourhood_is_clipped_at_corners() {
        let n = Coord::new(0, 0).neumann_neighborhood(2, 2);
        assert_eq!(n.as_slice(), &[Coord::new(0, 1), Coord::new(1, 0)]);
        assert!(Coord::new(0, 0).neumann_neighborhood(1, 1).is_empty());
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Coord::new(4, 1);
        let b = Coord::new(0, 3);
        assert_eq!(a.manhattan_distance(&b), 6);
        assert_eq!(b.manhattan_distance(&a), 6);
        assert!(Coord::new(2, 2).is_adjacent(&Coord::new(2, 3)));
        assert!(!Coord::new(2, 2).is_adjacent(&Coord::new(3, 3)));
    }
}
