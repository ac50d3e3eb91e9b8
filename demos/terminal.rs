use pathfinding_visualizer::{Algorithm, Cell, Coord, Engine, Pacing, Renderer};
use std::io::{self, Write};
use std::time::Duration;

// In this example a search is animated in the terminal on a grid with shape
//  ______
// |S  #  |
// |## # #|
// |   #  |
// | ## # |
// |     E|
//  ______
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Run with `cargo run --example terminal -- astar` to pick the algorithm.

const LAYOUT: &str = "\
S..#..
##.#.#
...#..
.##.#.
.....E";

/// Keeps a character buffer of the grid and repaints it after every path cell.
struct TerminalRenderer {
    rows: Vec<Vec<char>>,
}

impl TerminalRenderer {
    fn print(&self) {
        let mut out = io::stdout().lock();
        for row in &self.rows {
            let line: String = row.iter().collect();
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);
    }
}

impl Renderer for TerminalRenderer {
    fn draw_cell(&mut self, coord: Coord, cell: Cell) {
        self.rows[coord.row][coord.col] = cell.symbol();
    }

    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
        if delay >= Pacing::default().path_delay {
            self.print();
        }
    }
}

fn main() {
    let algorithm = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<Algorithm>())
        .transpose()
        .unwrap_or_else(|err| {
            eprintln!("{err}");
            std::process::exit(2);
        })
        .unwrap_or(Algorithm::Dijkstra);

    let mut engine = Engine::from_grid(LAYOUT.parse().unwrap());
    let mut renderer = TerminalRenderer {
        rows: vec![vec![' '; engine.grid().cols()]; engine.grid().rows()],
    };
    engine.redraw(&mut renderer);
    renderer.print();

    engine.start_search(algorithm).unwrap();
    match engine.animate(&mut renderer) {
        Some(outcome) => match outcome.hops() {
            Some(hops) => println!("{algorithm}: path of {hops} moves"),
            None => println!("{algorithm}: no path"),
        },
        None => println!("{algorithm}: search did not start"),
    }
    println!("{}", engine.grid());
}
