use crate::{Cell, Coord, SearchOutcome};
use std::time::Duration;

/// Animation delays attached to the steps of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after a cell is marked visited.
    pub visit_delay: Duration,
    /// Pause after a cell is marked as part of the path.
    pub path_delay: Duration,
}

impl Pacing {
    /// No pauses at all, for headless runs.
    pub const INSTANT: Pacing = Pacing {
        visit_delay: Duration::ZERO,
        path_delay: Duration::ZERO,
    };
}

impl Default for Pacing {
    fn default() -> Pacing {
        Pacing {
            visit_delay: Duration::from_millis(10),
            path_delay: Duration::from_millis(50),
        }
    }
}

/// What the [Engine](crate::Engine) did in response to one search event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell changed its visual state. The driver should draw it and wait `delay`.
    Paint {
        coord: Coord,
        cell: Cell,
        delay: Duration,
    },
    /// The search ended and the animation lock has been released.
    Finished(SearchOutcome),
}

/// Draws cells on behalf of the engine. Called synchronously for every change.
pub trait Renderer {
    fn draw_cell(&mut self, coord: Coord, cell: Cell);

    /// Suspends for the animation delay of the last drawn cell.
    fn pause(&mut self, _delay: Duration) {}
}

/// A renderer that remembers what it was asked to draw.
#[cfg(test)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RecordingRenderer {
    pub drawn: Vec<(Coord, Cell)>,
    pub paused: Duration,
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn draw_cell(&mut self, coord: Coord, cell: Cell) {
        self.drawn.push((coord, cell));
    }

    fn pause(&mut self, delay: Duration) {
        self.paused += delay;
    }
}
