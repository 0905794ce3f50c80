//! Static position evaluation.
//!
//! Finished games score `±WIN_SCORE`. Anything else is scored by summing,
//! for every mark and each of the four line directions, the squared number
//! of friendly marks within reach, as long as the line could still be
//! completed. Friendly lines add to the score and opposing lines subtract.
//!
//! The heuristic is purely local. At shallow depth it can misjudge positions
//! that a deeper search would resolve, and search results inherit that.

use crate::board::{Coord, Mark, SparseBoard};
use crate::constants::{DIRECTIONS, LINE_WEIGHT, WIN_SCORE};
use crate::rules::has_line;

/// Score the board from `perspective`'s point of view.
pub fn evaluate(board: &SparseBoard, perspective: Mark, win_length: usize) -> i32 {
    for side in [Mark::X, Mark::O] {
        if has_line(board, side, win_length) {
            return if side == perspective { WIN_SCORE } else { -WIN_SCORE };
        }
    }

    let mut score = 0;
    for (at, mark) in board.occupied() {
        for &dir in &DIRECTIONS {
            let (count, empty) = line_potential(board, at, dir, mark, win_length);
            if count + empty >= win_length {
                let line_score = (count * count) as i32 * LINE_WEIGHT;
                score += if mark == perspective { line_score } else { -line_score };
            }
        }
    }
    score
}

/// Friendly marks and empty cells seen within `win_length - 1` steps of
/// `at` in both senses of `dir`. Each sense stops at the first opposing mark
/// or at the edge of the plane.
fn line_potential(
    board: &SparseBoard,
    at: Coord,
    dir: (i32, i32),
    mark: Mark,
    win_length: usize,
) -> (usize, usize) {
    let mut count = 1;
    let mut empty = 0;
    for sense in [1, -1] {
        let step = (dir.0 * sense, dir.1 * sense);
        for i in 1..win_length as i32 {
            match at.offset(step, i).map(|c| board.get(c)) {
                Some(m) if m == mark => count += 1,
                Some(Mark::Empty) => empty += 1,
                // opposing mark or edge of the plane
                _ => break,
            }
        }
    }
    (count, empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(i32, i32, Mark)]) -> SparseBoard {
        let mut b = SparseBoard::new();
        for &(x, y, m) in cells {
            b.place(Coord::new(x, y), m).unwrap();
        }
        b
    }

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(evaluate(&SparseBoard::new(), Mark::X, 5), 0);
    }

    #[test]
    fn test_single_mark() {
        // four open directions, each worth 1 * 1 * 10
        let b = board_with(&[(0, 0, Mark::X)]);
        assert_eq!(evaluate(&b, Mark::X, 5), 40);
        assert_eq!(evaluate(&b, Mark::O, 5), -40);
    }

    #[test]
    fn test_pair_in_a_row() {
        // each mark: horizontal count 2 -> 40, three other directions -> 10 each
        let b = board_with(&[(0, 0, Mark::X), (1, 0, Mark::X)]);
        assert_eq!(evaluate(&b, Mark::X, 5), 2 * (40 + 30));
    }

    #[test]
    fn test_symmetric_position_is_balanced() {
        let b = board_with(&[(0, 0, Mark::X), (10, 10, Mark::O)]);
        assert_eq!(evaluate(&b, Mark::X, 5), 0);
    }

    #[test]
    fn test_win_dominates() {
        let b = board_with(&[(0, 0, Mark::O), (1, 0, Mark::O), (2, 0, Mark::O)]);
        assert_eq!(evaluate(&b, Mark::O, 3), WIN_SCORE);
        assert_eq!(evaluate(&b, Mark::X, 3), -WIN_SCORE);
    }

    #[test]
    fn test_plane_edge_blocks_like_a_wall() {
        let b = board_with(&[(i32::MAX, 0, Mark::X)]);
        let (count, empty) = line_potential(&b, Coord::new(i32::MAX, 0), (1, 0), Mark::X, 5);
        assert_eq!((count, empty), (1, 4));
    }

    #[test]
    fn test_blocked_line_scores_nothing() {
        // win length 3: X boxed in horizontally between two Os
        let b = board_with(&[(-1, 0, Mark::O), (0, 0, Mark::X), (1, 0, Mark::O)]);
        let (count, empty) = line_potential(&b, Coord::new(0, 0), (1, 0), Mark::X, 3);
        assert_eq!((count, empty), (1, 0));
    }
}
