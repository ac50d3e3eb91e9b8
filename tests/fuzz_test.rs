/// Fuzzes the searches by checking for many random grids that a path is found exactly when the
/// end is reachable, being part of the same connected component as the start, and that both
/// solvers agree on its length.
use itertools::Itertools;
use pathfinding_visualizer::{
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver},
    Algorithm, Cell, CellGrid, Coord, Engine, SearchEvent, SearchOutcome,
};
use rand::prelude::*;

fn random_engine(rows: usize, cols: usize, rng: &mut StdRng) -> Engine {
    let mut engine = Engine::new(rows, cols).unwrap();
    for row in 0..rows {
        for col in 0..cols {
            let coord = Coord::new(row, col);
            if rng.gen_bool(0.4) && !engine.grid()[coord].is_fixed() {
                engine.toggle_wall(coord).unwrap();
            }
        }
    }
    engine
}

fn assert_valid_path(grid: &CellGrid, path: &[Coord]) {
    assert_eq!(path.first(), Some(&grid.start()));
    assert_eq!(path.last(), Some(&grid.end()));
    assert!(path.iter().all(|p| grid[*p] != Cell::Wall));
    assert!(path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b)));
    assert!(path.iter().all_unique());
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut engine = random_engine(N, N, &mut rng);
        let reachable = engine.reachable();
        let dijkstra = engine.run(Algorithm::Dijkstra).unwrap();
        let astar = engine.run(Algorithm::Astar).unwrap();
        // Show the grid if the outcome does not match reachability
        if dijkstra.is_found() != reachable || astar.is_found() != reachable {
            println!("{}", engine.grid());
        }
        assert_eq!(dijkstra.is_found(), reachable);
        assert_eq!(astar.is_found(), reachable);
        assert_eq!(dijkstra.hops(), astar.hops());
        if let SearchOutcome::Found(path) = &dijkstra {
            assert!(path.len() > 2 * (N - 1));
            engine.clear_transient().unwrap();
            assert_valid_path(engine.grid(), path);
        }
    }
}

#[test]
fn fuzz_rectangular() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        let engine = random_engine(rows, cols, &mut rng);
        let grid = engine.grid();
        let bfs = DijkstraSolver.get_path_single_goal(grid, grid.start(), grid.end());
        let astar = AstarSolver::new().get_path_single_goal(grid, grid.start(), grid.end());
        assert_eq!(bfs.as_ref().map(Vec::len), astar.as_ref().map(Vec::len));
        for path in bfs.iter().chain(astar.iter()) {
            assert_valid_path(grid, path);
        }
    }
}

#[test]
fn open_grids_take_manhattan_distance() {
    for (rows, cols) in [(1, 1), (1, 7), (5, 1), (4, 6), (12, 9)] {
        let mut engine = Engine::new(rows, cols).unwrap();
        for algorithm in [Algorithm::Dijkstra, Algorithm::Astar] {
            let outcome = engine.run(algorithm).unwrap();
            assert_eq!(outcome.hops(), Some((rows - 1) + (cols - 1)));
        }
    }
}

#[test]
fn weighted_heuristic_finds_a_path_expanding_cells_once() {
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver {
        heuristic_factor: 3.0,
    };
    for _ in 0..500 {
        let mut engine = random_engine(8, 8, &mut rng);
        let reachable = engine.reachable();
        let grid = engine.grid();
        let mut visited = solver
            .search(grid, grid.start(), grid.end())
            .filter_map(|event| match event {
                SearchEvent::Visited(c) => Some(c),
                _ => None,
            });
        assert!(visited.all_unique());
        engine.start_with(&solver).unwrap();
        let outcome = engine.finish().unwrap();
        assert_eq!(outcome.is_found(), reachable);
        if let Some(path) = outcome.path() {
            engine.clear_transient().unwrap();
            assert_valid_path(engine.grid(), path);
        }
    }
}
