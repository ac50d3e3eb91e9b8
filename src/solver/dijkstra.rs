use fxhash::FxHashSet;
use std::collections::VecDeque;

use crate::{
    pathing_grid::{CellGrid, WallMask},
    solver::{Expansion, Frontier, GridSolver, SearchRun},
    Coord,
};

/// Breadth-first search. On a grid where every move costs the same this expands cells in the
/// same order as Dijkstra's algorithm would, hence the name.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

pub type DijkstraSearch = SearchRun<DijkstraFrontier>;

impl GridSolver for DijkstraSolver {
    type Search = DijkstraSearch;

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn search(&self, grid: &CellGrid, start: Coord, goal: Coord) -> DijkstraSearch {
        SearchRun::new(self.name(), DijkstraFrontier::new(grid.wall_mask(), start, goal))
    }
}

/// FIFO queue of whole paths from the start. A cell counts as visited when a path ending
/// in it is first dequeued, so a cell may sit in the queue several times; later copies
/// are dropped when they come up.
#[derive(Clone, Debug)]
pub struct DijkstraFrontier {
    walls: WallMask,
    start: Coord,
    goal: Coord,
    queue: VecDeque<Vec<Coord>>,
    visited: FxHashSet<Coord>,
}

impl DijkstraFrontier {
    pub fn new(walls: WallMask, start: Coord, goal: Coord) -> DijkstraFrontier {
        DijkstraFrontier {
            walls,
            start,
            goal,
            queue: VecDeque::from([vec![start]]),
            visited: FxHashSet::default(),
        }
    }
}

impl Frontier for DijkstraFrontier {
    fn expand(&mut self) -> Expansion {
        let Some(path) = self.queue.pop_front() else {
            return Expansion::Exhausted;
        };
        let Some(&node) = path.last() else {
            return Expansion::Skipped;
        };
        if node == self.goal {
            return Expansion::Found(path);
        }
        if !self.visited.insert(node) {
            return Expansion::Skipped;
        }
        for n in self.walls.neighborhood_points(&node) {
            if !self.visited.contains(&n) {
                let mut extended = Vec::with_capacity(path.len() + 1);
                extended.extend_from_slice(&path);
                extended.push(n);
                self.queue.push_back(extended);
            }
        }
        if node == self.start {
            Expansion::Skipped
        } else {
            Expansion::Visited(node)
        }
    }

    fn expanded(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{SearchEvent, SearchOutcome};

    fn solve(layout: &str) -> Option<Vec<Coord>> {
        let grid: CellGrid = layout.parse().unwrap();
        DijkstraSolver.get_path_single_goal(&grid, grid.start(), grid.end())
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = CellGrid::new(1, 1).unwrap();
        let events: Vec<SearchEvent> = DijkstraSolver
            .search(&grid, grid.start(), grid.end())
            .collect();
        assert_eq!(
            events,
            vec![
                SearchEvent::Path(Coord::new(0, 0)),
                SearchEvent::Finished(SearchOutcome::Found(vec![Coord::new(0, 0)])),
            ]
        );
    }

    /// Asserts that the border path is taken around a centre wall, preferring up and right.
    #[test]
    fn solve_simple_problem() {
        let path = solve("S..\n.#.\n..E").unwrap();
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 2),
                Coord::new(2, 2)
            ]
        );
    }

    #[test]
    fn enclosed_goal_exhausts() {
        assert_eq!(solve("S.#.\n..#.\n###.\n...E"), None);
    }

    #[test]
    fn visits_in_breadth_first_order() {
        let grid = CellGrid::new(2, 3).unwrap();
        let visited: Vec<Coord> = DijkstraSolver
            .search(&grid, grid.start(), grid.end())
            .filter_map(|event| match event {
                SearchEvent::Visited(c) => Some(c),
                _ => None,
            })
            .collect();
        // Distance 1 cells right then down, then distance 2 cells in queue order.
        assert_eq!(
            visited,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(0, 2),
                Coord::new(1, 1)
            ]
        );
    }

    #[test]
    fn iterator_is_fused_after_finishing() {
        let grid = CellGrid::new(2, 2).unwrap();
        let mut search = DijkstraSolver.search(&grid, grid.start(), grid.end());
        assert!(search.by_ref().any(|e| matches!(e, SearchEvent::Finished(_))));
        assert_eq!(search.next(), None);
        assert_eq!(search.next(), None);
        assert_eq!(search.frontier().expanded(), 3);
    }

    #[test]
    fn walls_are_snapshotted_at_start() {
        let mut grid: CellGrid = "S.\n.E".parse().unwrap();
        let search = DijkstraSolver.search(&grid, grid.start(), grid.end());
        grid.set(Coord::new(0, 1), crate::Cell::Wall);
        grid.set(Coord::new(1, 0), crate::Cell::Wall);
        let outcome = search.last().unwrap();
        assert!(matches!(outcome, SearchEvent::Finished(SearchOutcome::Found(_))));
    }
}
