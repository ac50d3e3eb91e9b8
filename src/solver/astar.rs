use fxhash::FxHashSet;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::{
    pathing_grid::{CellGrid, WallMask},
    solver::{path::reverse_path, Expansion, Frontier, FxIndexMap, GridSolver, SearchRun},
    Coord,
};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Weight of the Manhattan heuristic. Above 1.0 fewer cells are expanded but the
    /// returned path is no longer guaranteed to be shortest.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Coord, p2: &Coord) -> usize {
        weighted_manhattan(p1, p2, self.heuristic_factor)
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

fn weighted_manhattan(p1: &Coord, p2: &Coord, factor: f32) -> usize {
    (p1.manhattan_distance(p2) as f32 * factor) as usize
}

pub type AstarSearch = SearchRun<AstarFrontier>;

impl GridSolver for AstarSolver {
    type Search = AstarSearch;

    fn name(&self) -> &'static str {
        "astar"
    }

    fn search(&self, grid: &CellGrid, start: Coord, goal: Coord) -> AstarSearch {
        SearchRun::new(
            self.name(),
            AstarFrontier::new(grid.wall_mask(), start, goal, self.heuristic_factor),
        )
    }
}

/// Cost bookkeeping for a discovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    /// Index of the predecessor in the parent table, [usize::MAX] for the start.
    pub parent: usize,
    pub g: usize,
    pub f: usize,
}

/// Open set and parent table of an A* search. Both are insertion ordered: the open set is
/// scanned linearly for the lowest f-score and ties go to the entry inserted first.
/// Expanded cells are closed and never relaxed again, which only matters once the
/// heuristic is weighted above 1.0 and stops being consistent.
#[derive(Clone, Debug)]
pub struct AstarFrontier {
    walls: WallMask,
    start: Coord,
    goal: Coord,
    heuristic_factor: f32,
    open: FxIndexMap<Coord, usize>,
    parents: FxIndexMap<Coord, NodeRecord>,
    closed: FxHashSet<Coord>,
}

impl AstarFrontier {
    pub fn new(walls: WallMask, start: Coord, goal: Coord, heuristic_factor: f32) -> AstarFrontier {
        let f = weighted_manhattan(&start, &goal, heuristic_factor);
        let mut open = FxIndexMap::default();
        open.insert(start, f);
        let mut parents = FxIndexMap::default();
        parents.insert(
            start,
            NodeRecord {
                parent: usize::MAX,
                g: 0,
                f,
            },
        );
        AstarFrontier {
            walls,
            start,
            goal,
            heuristic_factor,
            open,
            parents,
            closed: FxHashSet::default(),
        }
    }

    /// Cost record of a cell discovered so far.
    pub fn record(&self, coord: &Coord) -> Option<&NodeRecord> {
        self.parents.get(coord)
    }

    fn pop_lowest(&mut self) -> Option<Coord> {
        let (ix, _) = self
            .open
            .values()
            .enumerate()
            .min_by_key(|&(_, f)| *f)?;
        self.open.shift_remove_index(ix).map(|(coord, _)| coord)
    }
}

impl Frontier for AstarFrontier {
    fn expand(&mut self) -> Expansion {
        let Some(current) = self.pop_lowest() else {
            return Expansion::Exhausted;
        };
        let Some((index, _, record)) = self.parents.get_full(&current) else {
            return Expansion::Skipped;
        };
        if current == self.goal {
            return Expansion::Found(reverse_path(&self.parents, |r| r.parent, index));
        }
        if !self.closed.insert(current) {
            return Expansion::Skipped;
        }
        let new_cost = record.g + 1;
        for successor in self.walls.neighborhood_points(&current) {
            if self.closed.contains(&successor) {
                continue;
            }
            let f = new_cost + weighted_manhattan(&successor, &self.goal, self.heuristic_factor);
            let new_record = NodeRecord {
                parent: index,
                g: new_cost,
                f,
            };
            match self.parents.entry(successor) {
                Vacant(e) => {
                    e.insert(new_record);
                }
                Occupied(mut e) => {
                    if e.get().g > new_cost {
                        e.insert(new_record);
                    } else {
                        continue;
                    }
                }
            }
            // Updates the f-score in place if the successor is already open.
            self.open.insert(successor, f);
        }
        if current == self.start {
            Expansion::Skipped
        } else {
            Expansion::Visited(current)
        }
    }

    fn expanded(&self) -> usize {
        self.closed.len()
    }
}
