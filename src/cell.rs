/// State of a single grid position.
///
/// [Start](Cell::Start) and [End](Cell::End) are placed when the grid is generated and never
/// change afterwards. [Wall](Cell::Wall) and [Empty](Cell::Empty) are toggled by the user,
/// [Visited](Cell::Visited) and [Path](Cell::Path) are written by a running search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Start,
    End,
    Wall,
    Visited,
    Path,
}

impl Cell {
    /// Start and End cells, which no edit or search may overwrite.
    pub fn is_fixed(self) -> bool {
        matches!(self, Cell::Start | Cell::End)
    }

    /// Markings left behind by a search.
    pub fn is_transient(self) -> bool {
        matches!(self, Cell::Visited | Cell::Path)
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    /// Name of the visual class a renderer applies for this state. Empty cells carry none.
    pub fn class(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Start => "start",
            Cell::End => "end",
            Cell::Wall => "wall",
            Cell::Visited => "visited",
            Cell::Path => "path",
        }
    }

    /// Character used by the text form of a grid.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Wall => '#',
            Cell::Visited => 'o',
            Cell::Path => '*',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Cell> {
        Some(match ch {
            '.' => Cell::Empty,
            'S' => Cell::Start,
            'E' => Cell::End,
            '#' => Cell::Wall,
            'o' => Cell::Visited,
            '*' => Cell::Path,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_back_to_cells() {
        for cell in [
            Cell::Empty,
            Cell::Start,
            Cell::End,
            Cell::Wall,
            Cell::Visited,
            Cell::Path,
        ] {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(Cell::from_symbol('x'), None);
    }

    #[test]
    fn only_start_and_end_are_fixed() {
        assert!(Cell::Start.is_fixed() && Cell::End.is_fixed());
        assert!(!Cell::Wall.is_fixed());
        assert!(Cell::Path.is_transient() && !Cell::Empty.is_transient());
        assert_eq!(Cell::Empty.class(), "");
        assert_eq!(Cell::Visited.class(), "visited");
    }
}
