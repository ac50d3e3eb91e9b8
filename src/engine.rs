use crate::{
    render::{Pacing, Renderer, Step},
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver},
    Algorithm, Cell, CellGrid, Coord, EngineError, GridSolver, SearchEvent, SearchOutcome,
};
use core::fmt;
use log::{debug, info, warn};

/// The discrete user actions an input layer can forward to [Engine::dispatch].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleWall(Coord),
    RunDijkstra,
    RunAstar,
    ClearTransient,
    Invert,
    Regenerate,
}

/// [Engine] owns the grid, the animation lock and the search currently being animated.
///
/// While a search is active every editing operation, and starting another search, is
/// refused with [EngineError::Animating]. The lock is taken by
/// [start_search](Engine::start_search) and released when [step](Engine::step) hands out
/// the final [Step::Finished], so it stays held while the found path is drawn.
pub struct Engine {
    grid: CellGrid,
    pacing: Pacing,
    animating: bool,
    active: Option<Box<dyn Iterator<Item = SearchEvent>>>,
}

impl Engine {
    pub fn new(rows: usize, cols: usize) -> Result<Engine, EngineError> {
        Ok(Engine::from_grid(CellGrid::new(rows, cols)?))
    }

    pub fn from_grid(grid: CellGrid) -> Engine {
        Engine {
            grid,
            pacing: Pacing::default(),
            animating: false,
            active: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Engine {
        self.pacing = pacing;
        self
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.animating {
            Err(EngineError::Animating)
        } else {
            Ok(())
        }
    }

    /// Replaces the grid with an empty `rows` x `cols` one, dropping all walls and markings.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.grid = CellGrid::new(rows, cols)?;
        debug!("Generated a {}x{} grid", rows, cols);
        Ok(())
    }

    /// [generate](Engine::generate) with the current dimensions.
    pub fn regenerate(&mut self) -> Result<(), EngineError> {
        self.generate(self.grid.rows(), self.grid.cols())
    }

    /// Flips a cell between empty and wall and returns its new state. A visited or path
    /// marking on the cell is dropped first, so such a cell becomes a wall.
    pub fn toggle_wall(&mut self, coord: Coord) -> Result<Cell, EngineError> {
        self.ensure_idle()?;
        let cell = self
            .grid
            .get(&coord)
            .ok_or(EngineError::OutOfBounds(coord))?;
        if cell.is_fixed() {
            return Err(EngineError::FixedCell(coord));
        }
        let toggled = if cell.is_wall() { Cell::Empty } else { Cell::Wall };
        self.grid.set(coord, toggled);
        Ok(toggled)
    }

    /// Clears all markings, then swaps walls and empty cells.
    pub fn invert(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.grid.clear_transient();
        self.grid.invert_walls();
        Ok(())
    }

    /// Resets visited and path cells to empty and returns how many were reset.
    pub fn clear_transient(&mut self) -> Result<usize, EngineError> {
        self.ensure_idle()?;
        Ok(self.grid.clear_transient())
    }

    /// Whether the end can currently be reached from the start.
    pub fn reachable(&mut self) -> bool {
        self.grid.update();
        self.grid.reachable(&self.grid.start(), &self.grid.end())
    }

    pub fn start_search(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        match algorithm {
            Algorithm::Dijkstra => self.start_with(&DijkstraSolver),
            Algorithm::Astar => self.start_with(&AstarSolver::new()),
        }
    }

    /// Takes the animation lock, clears the markings of the previous search and installs a
    /// new search from start to end. The search only advances through [step](Engine::step).
    pub fn start_with<S>(&mut self, solver: &S) -> Result<(), EngineError>
    where
        S: GridSolver,
        S::Search: 'static,
    {
        self.ensure_idle()?;
        self.animating = true;
        self.grid.clear_transient();
        let start = self.grid.start();
        let end = self.grid.end();
        if !self.reachable() {
            debug!("{} is not reachable from {}", end, start);
        }
        info!("Starting {} search from {} to {}", solver.name(), start, end);
        self.active = Some(Box::new(solver.search(&self.grid, start, end)));
        Ok(())
    }

    /// Advances the active search by one event and applies it to the grid. Returns [None]
    /// when no search is active. Path markings on the start and end are reported but not
    /// stored, those cells keep their state.
    pub fn step(&mut self) -> Option<Step> {
        let search = self.active.as_mut()?;
        let event = search.next().unwrap_or_else(|| {
            warn!("Search ended without reporting an outcome");
            SearchEvent::Finished(SearchOutcome::Exhausted)
        });
        let step = match event {
            SearchEvent::Visited(coord) => {
                self.grid.set(coord, Cell::Visited);
                Step::Paint {
                    coord,
                    cell: Cell::Visited,
                    delay: self.pacing.visit_delay,
                }
            }
            SearchEvent::Path(coord) => {
                self.grid.set(coord, Cell::Path);
                Step::Paint {
                    coord,
                    cell: Cell::Path,
                    delay: self.pacing.path_delay,
                }
            }
            SearchEvent::Finished(outcome) => {
                self.active = None;
                self.animating = false;
                Step::Finished(outcome)
            }
        };
        Some(step)
    }

    /// Steps the active search to its end without pacing.
    pub fn finish(&mut self) -> Option<SearchOutcome> {
        loop {
            if let Step::Finished(outcome) = self.step()? {
                return Some(outcome);
            }
        }
    }

    /// Starts a search and runs it to completion without pacing.
    pub fn run(&mut self, algorithm: Algorithm) -> Result<SearchOutcome, EngineError> {
        self.start_search(algorithm)?;
        Ok(self.finish().unwrap_or(SearchOutcome::Exhausted))
    }

    /// Drives the active search through `renderer`, drawing each changed cell and pausing
    /// for its delay.
    pub fn animate<R: Renderer>(&mut self, renderer: &mut R) -> Option<SearchOutcome> {
        loop {
            match self.step()? {
                Step::Paint { coord, cell, delay } => {
                    renderer.draw_cell(coord, cell);
                    renderer.pause(delay);
                }
                Step::Finished(outcome) => return Some(outcome),
            }
        }
    }

    /// Draws every cell, for a full repaint after the grid changed wholesale.
    pub fn redraw<R: Renderer>(&self, renderer: &mut R) {
        for (coord, cell) in self.grid.iter() {
            renderer.draw_cell(coord, cell);
        }
    }

    /// Performs a user action. Run actions only start the search; the caller drives it
    /// with [step](Engine::step) or [animate](Engine::animate).
    pub fn dispatch(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::ToggleWall(coord) => self.toggle_wall(coord).map(|_| ()),
            Action::RunDijkstra => self.start_search(Algorithm::Dijkstra),
            Action::RunAstar => self.start_search(Algorithm::Astar),
            Action::ClearTransient => self.clear_transient().map(|_| ()),
            Action::Invert => self.invert(),
            Action::Regenerate => self.regenerate(),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Engine")
            .field("grid", &self.grid)
            .field("pacing", &self.pacing)
            .field("animating", &self.animating)
            .field("active", &self.active.is_some())
            .finish()
    }
}
