use crate::{pathing_grid::CellGrid, Coord};
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::info;
use std::str::FromStr;

pub mod astar;
pub mod dijkstra;
pub mod path;

use path::PathDrawing;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// One observable step of a running search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell other than the start or end was expanded for the first time.
    Visited(Coord),
    /// A cell of the found path, emitted from start to end.
    Path(Coord),
    /// The search is over. No events follow.
    Finished(SearchOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A shortest path from start to end, both included.
    Found(Vec<Coord>),
    /// Every reachable cell was expanded without meeting the end.
    Exhausted,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Coord>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Number of moves on the found path.
    pub fn hops(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }
}

/// Result of expanding a single frontier entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    Visited(Coord),
    /// The entry produced no visible change: a duplicate, or the start itself.
    Skipped,
    Found(Vec<Coord>),
    Exhausted,
}

/// The algorithm-specific part of a search: what is expanded next.
pub trait Frontier {
    fn expand(&mut self) -> Expansion;

    /// Number of cells expanded so far.
    fn expanded(&self) -> usize;
}

enum Phase {
    Searching,
    Drawing(PathDrawing),
    Done,
}

/// Lazily drives a [Frontier], turning its expansions into [SearchEvent]s. After the
/// end has been found the path is walked cell by cell before the final
/// [Finished](SearchEvent::Finished) event. The iterator is fused.
pub struct SearchRun<F> {
    name: &'static str,
    frontier: F,
    phase: Phase,
}

impl<F: Frontier> SearchRun<F> {
    pub fn new(name: &'static str, frontier: F) -> SearchRun<F> {
        SearchRun {
            name,
            frontier,
            phase: Phase::Searching,
        }
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }
}

impl<F: Frontier> Iterator for SearchRun<F> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        loop {
            match &mut self.phase {
                Phase::Done => return None,
                Phase::Drawing(drawing) => {
                    let event = drawing.next();
                    if event.is_none() {
                        self.phase = Phase::Done;
                    }
                    return event;
                }
                Phase::Searching => match self.frontier.expand() {
                    Expansion::Visited(coord) => return Some(SearchEvent::Visited(coord)),
                    Expansion::Skipped => {}
                    Expansion::Found(path) => {
                        info!(
                            "{}: found a path of {} cells after expanding {} cells",
                            self.name,
                            path.len(),
                            self.frontier.expanded()
                        );
                        self.phase = Phase::Drawing(PathDrawing::new(path));
                    }
                    Expansion::Exhausted => {
                        info!(
                            "{}: no path, exhausted after expanding {} cells",
                            self.name,
                            self.frontier.expanded()
                        );
                        self.phase = Phase::Done;
                        return Some(SearchEvent::Finished(SearchOutcome::Exhausted));
                    }
                },
            }
        }
    }
}

impl<F: Frontier> std::iter::FusedIterator for SearchRun<F> {}

pub trait GridSolver {
    type Search: Iterator<Item = SearchEvent>;

    fn name(&self) -> &'static str;

    /// Starts a search from start to goal over the walls of the grid as they are now.
    /// Nothing is computed until the returned iterator is polled.
    fn search(&self, grid: &CellGrid, start: Coord, goal: Coord) -> Self::Search;

    /// Runs a search to completion, discarding the intermediate events.
    fn get_path_single_goal(
        &self,
        grid: &CellGrid,
        start: Coord,
        goal: Coord,
    ) -> Option<Vec<Coord>> {
        self.search(grid, start, goal)
            .find_map(|event| match event {
                SearchEvent::Finished(outcome) => Some(outcome),
                _ => None,
            })
            .and_then(SearchOutcome::into_path)
    }

    /// Hop count of a path, every move costing 1.
    fn get_path_cost(&self, path: &[Coord]) -> usize {
        path.len().saturating_sub(1)
    }
}

/// The searches a user can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Breadth-first search, equivalent to Dijkstra on a uniform-cost grid.
    Dijkstra,
    Astar,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" | "bfs" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::Astar),
            other => Err(format!("unknown algorithm {other:?}")),
        }
    }
}
