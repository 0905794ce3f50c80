//! Candidate move generation.
//!
//! Only cells touching an existing mark (8-neighbourhood) are proposed.
//! This keeps the branching factor small on an infinite board; it also means
//! the search never considers a move more than one cell away from the
//! current shape.

use crate::board::{Coord, ORIGIN, SparseBoard};
use crate::constants::NEIGHBORS;

/// Candidate moves in lexicographic `(x, y)` order, without duplicates.
///
/// An empty board yields the origin only. Neighbours beyond the edge of the
/// `i32` plane are skipped.
pub fn candidates(board: &SparseBoard) -> Vec<Coord> {
    if board.is_empty() {
        return vec![ORIGIN];
    }

    let mut moves: Vec<Coord> = board
        .occupied()
        .flat_map(|(at, _)| NEIGHBORS.iter().filter_map(move |&d| at.offset(d, 1)))
        .filter(|&c| !board.contains(c))
        .collect();
    moves.sort_unstable();
    moves.dedup();
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    #[test]
    fn test_empty_board_gives_origin() {
        assert_eq!(candidates(&SparseBoard::new()), vec![ORIGIN]);
    }

    #[test]
    fn test_single_mark_gives_ring() {
        let mut b = SparseBoard::new();
        b.place(Coord::new(10, -10), Mark::X).unwrap();
        let moves = candidates(&b);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Coord::new(9, -11));
        assert_eq!(moves[7], Coord::new(11, -9));
        assert!(!moves.contains(&Coord::new(10, -10)));
    }

    #[test]
    fn test_corner_of_plane() {
        let mut b = SparseBoard::new();
        b.place(Coord::new(i32::MAX, i32::MIN), Mark::O).unwrap();
        let moves = candidates(&b);
        assert_eq!(
            moves,
            vec![
                Coord::new(i32::MAX - 1, i32::MIN),
                Coord::new(i32::MAX - 1, i32::MIN + 1),
                Coord::new(i32::MAX, i32::MIN + 1),
            ]
        );
    }

    #[test]
    fn test_shared_neighbours_deduplicated() {
        let mut b = SparseBoard::new();
        b.place(Coord::new(0, 0), Mark::X).unwrap();
        b.place(Coord::new(1, 0), Mark::O).unwrap();
        let moves = candidates(&b);
        // 3x4 box minus the two marks
        assert_eq!(moves.len(), 10);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(moves, sorted);
    }
}
