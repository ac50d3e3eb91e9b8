use super::{FxIndexMap, SearchEvent, SearchOutcome};
use crate::Coord;
use std::mem;

/// Follows the back-pointers stored in `parents` from the entry at index `start` until an
/// index without entry is reached, and returns the visited keys root first.
pub fn reverse_path<V, F>(parents: &FxIndexMap<Coord, V>, mut parent: F, start: usize) -> Vec<Coord>
where
    F: FnMut(&V) -> usize,
{
    let mut next = Some(start);
    let mut path: Vec<Coord> = std::iter::from_fn(|| {
        let (node, value) = parents.get_index(next?)?;
        next = Some(parent(value));
        Some(*node)
    })
    .collect();
    path.reverse();
    path
}

/// Emits a found path one [Path](SearchEvent::Path) event per cell, start first, followed by
/// the [Finished](SearchEvent::Finished) event carrying the whole path.
#[derive(Clone, Debug)]
pub struct PathDrawing {
    path: Vec<Coord>,
    next: usize,
}

impl PathDrawing {
    pub fn new(path: Vec<Coord>) -> PathDrawing {
        PathDrawing { path, next: 0 }
    }
}

impl Iterator for PathDrawing {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        let n = self.path.len();
        let event = match self.next.cmp(&n) {
            std::cmp::Ordering::Less => SearchEvent::Path(self.path[self.next]),
            std::cmp::Ordering::Equal => {
                SearchEvent::Finished(SearchOutcome::Found(mem::take(&mut self.path)))
            }
            std::cmp::Ordering::Greater => return None,
        };
        self.next += 1;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_pointers_are_followed_to_the_root() {
        let mut parents: FxIndexMap<Coord, usize> = FxIndexMap::default();
        parents.insert(Coord::new(0, 0), usize::MAX);
        parents.insert(Coord::new(0, 1), 0);
        parents.insert(Coord::new(5, 5), 0);
        parents.insert(Coord::new(0, 2), 1);
        let path = reverse_path(&parents, |&p| p, 3);
        assert_eq!(
            path,
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );
    }

    #[test]
    fn drawing_ends_with_the_full_path() {
        let path = vec![Coord::new(0, 0), Coord::new(1, 0)];
        let events: Vec<SearchEvent> = PathDrawing::new(path.clone()).collect();
        assert_eq!(
            events,
            vec![
                SearchEvent::Path(Coord::new(0, 0)),
                SearchEvent::Path(Coord::new(1, 0)),
                SearchEvent::Finished(SearchOutcome::Found(path)),
            ]
        );
    }
}
