use crate::{Cell, Coord, EngineError, ParseGridError, N_SMALLVEC_SIZE};
use core::fmt;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::ops::Index;
use std::str::FromStr;

/// [CellGrid] stores the [Cell] state of every position in row-major order, with the start in
/// the top-left corner and the end in the bottom-right corner. In addition it maintains
/// connected components of the non-wall cells using a [UnionFind] structure, so that
/// reachability can be answered without running a search.
#[derive(Clone, Debug)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CellGrid {
    /// Creates an empty `rows` x `cols` grid with the start at (0, 0) and the end at
    /// (rows - 1, cols - 1). On a 1x1 grid the two coincide and the cell holds [Cell::Start].
    pub fn new(rows: usize, cols: usize) -> Result<CellGrid, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }
        let mut cells = vec![Cell::Empty; rows * cols];
        cells[rows * cols - 1] = Cell::End;
        cells[0] = Cell::Start;
        Ok(CellGrid::from_cells(rows, cols, cells))
    }

    fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> CellGrid {
        let mut grid = CellGrid {
            rows,
            cols,
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    pub fn end(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    /// Packed key `row * cols + col` of an in-bounds coordinate.
    pub fn get_ix(&self, coord: &Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: &Coord) -> Option<Cell> {
        self.in_bounds(coord).then(|| self.cells[self.get_ix(coord)])
    }

    /// All positions with their state, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        iproduct!(0..self.rows, 0..self.cols)
            .map(|(row, col)| Coord::new(row, col))
            .zip(self.cells.iter().copied())
    }

    pub fn can_move_to(&self, coord: &Coord) -> bool {
        self.get(coord).is_some_and(|cell| !cell.is_wall())
    }

    /// The non-wall neighbours of a position, in expansion order.
    pub fn neighborhood_points(&self, coord: &Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        coord
            .neumann_neighborhood(self.rows, self.cols)
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .collect()
    }

    /// Snapshot of which cells are walls, owned by a running search.
    pub fn wall_mask(&self) -> WallMask {
        WallMask {
            rows: self.rows,
            cols: self.cols,
            blocked: self.cells.iter().map(|cell| cell.is_wall()).collect(),
        }
    }

    /// Updates a position on the grid. Joins newly connected components and flags the
    /// components as dirty if components are (potentially) broken apart into multiple.
    /// The start and end cells are never overwritten.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        let ix = self.get_ix(&coord);
        let old = self.cells[ix];
        if old.is_fixed() {
            return;
        }
        if cell.is_wall() {
            if !old.is_wall() {
                self.components_dirty = true;
            }
        } else if old.is_wall() {
            for n in self.neighborhood_points(&coord) {
                let n_ix = self.get_ix(&n);
                self.components.union(ix, n_ix);
            }
        }
        self.cells[ix] = cell;
    }

    /// Resets every visited or path cell to empty and returns how many were reset.
    pub fn clear_transient(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_transient()) {
            *cell = Cell::Empty;
            cleared += 1;
        }
        cleared
    }

    /// Swaps walls and empty cells everywhere. Visited and path cells are left as they are,
    /// callers clear them first.
    pub(crate) fn invert_walls(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = match *cell {
                Cell::Wall => Cell::Empty,
                Cell::Empty => Cell::Wall,
                other => other,
            };
        }
        self.generate_components();
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: &Coord) -> usize {
        self.components.find(self.get_ix(coord))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out-of-bounds coordinates
    /// and walls are unreachable.
    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.can_move_to(start) && self.can_move_to(goal) {
            !self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let point = Coord::new(row, col);
            if !self.can_move_to(&point) {
                continue;
            }
            let parent_ix = self.get_ix(&point);
            [Coord::new(row + 1, col), Coord::new(row, col + 1)]
                .into_iter()
                .filter(|p| self.can_move_to(p))
                .map(|p| self.get_ix(&p))
                .collect::<SmallVec<[usize; 2]>>()
                .into_iter()
                .for_each(|ix| {
                    self.components.union(parent_ix, ix);
                });
        }
    }
}

impl PartialEq for CellGrid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl Eq for CellGrid {}

impl Index<Coord> for CellGrid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        assert!(self.in_bounds(&coord), "coordinate {coord} is outside the grid");
        &self.cells[coord.row * self.cols + coord.col]
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for CellGrid {
    type Err = ParseGridError;

    /// Parses the text form written by [Display](fmt::Display). Blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(ParseGridError::Empty);
        };
        let rows = lines.len();
        let cols = first.chars().count();
        let end = Coord::new(rows - 1, cols - 1);
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let coord = Coord::new(row, col);
                let cell =
                    Cell::from_symbol(ch).ok_or(ParseGridError::UnknownCell { row, col, ch })?;
                match cell {
                    Cell::Start if coord != Coord::new(0, 0) => {
                        return Err(ParseGridError::MisplacedStart(coord))
                    }
                    Cell::End if coord != end || coord == Coord::new(0, 0) => {
                        return Err(ParseGridError::MisplacedEnd(coord))
                    }
                    _ if coord == Coord::new(0, 0) && cell != Cell::Start => {
                        return Err(ParseGridError::MissingStart)
                    }
                    _ if coord == end && coord != Coord::new(0, 0) && cell != Cell::End => {
                        return Err(ParseGridError::MissingEnd)
                    }
                    _ => cells.push(cell),
                }
            }
        }
        Ok(CellGrid::from_cells(rows, cols, cells))
    }
}

/// Which cells of a [CellGrid] are walls at the moment a search starts.
#[derive(Clone, Debug)]
pub struct WallMask {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
}

impl WallMask {
    pub fn can_move_to(&self, coord: &Coord) -> bool {
        coord.row < self.rows
            && coord.col < self.cols
            && !self.blocked[coord.row * self.cols + coord.col]
    }

    pub fn neighborhood_points(&self, coord: &Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        coord
            .neumann_neighborhood(self.rows, self.cols)
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .collect()
    }
}
