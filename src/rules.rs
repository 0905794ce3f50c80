//! Win detection.
//!
//! A player wins with `win_length` or more of their marks in an unbroken
//! horizontal, vertical, or diagonal line. The scan starts from every mark
//! of the player, not just the latest move, so it is correct for any board
//! regardless of how it was built.

use std::iter::successors;

use crate::board::{Coord, Mark, SparseBoard};
use crate::constants::DIRECTIONS;

/// Number of consecutive `mark` cells starting one step from `from` along
/// `dir`, not counting `from` itself. The run ends at the edge of the plane.
#[inline]
pub fn run_from(board: &SparseBoard, from: Coord, dir: (i32, i32), mark: Mark) -> usize {
    // empty cells are unbounded
    if !mark.is_player() {
        return 0;
    }
    let mut n = 0;
    let mut cur = from;
    while let Some(next) = cur.offset(dir, 1) {
        if board.get(next) != mark {
            break;
        }
        n += 1;
        cur = next;
    }
    n
}

/// Length of the line of `mark` through `at` along `dir` (both senses).
#[inline]
fn line_through(board: &SparseBoard, at: Coord, dir: (i32, i32), mark: Mark) -> usize {
    let back = (-dir.0, -dir.1);
    1 + run_from(board, at, dir, mark) + run_from(board, at, back, mark)
}

/// Check whether `mark` has `win_length` in a row anywhere on the board.
pub fn has_line(board: &SparseBoard, mark: Mark, win_length: usize) -> bool {
    if !mark.is_player() {
        return false;
    }
    board
        .occupied()
        .filter(|&(_, m)| m == mark)
        .any(|(at, _)| {
            DIRECTIONS
                .iter()
                .any(|&dir| line_through(board, at, dir, mark) >= win_length)
        })
}

/// The player holding a winning line, if any. X is checked first.
pub fn winner(board: &SparseBoard, win_length: usize) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&m| has_line(board, m, win_length))
}

/// Cells of the first winning line found for `mark`, ordered along the line.
pub fn winning_line(board: &SparseBoard, mark: Mark, win_length: usize) -> Option<Vec<Coord>> {
    if !mark.is_player() {
        return None;
    }
    for (at, m) in board.occupied() {
        if m != mark {
            continue;
        }
        for &dir in &DIRECTIONS {
            let back = run_from(board, at, (-dir.0, -dir.1), mark);
            let forward = run_from(board, at, dir, mark);
            if back + forward + 1 >= win_length {
                let back_dir = (-dir.0, -dir.1);
                let start = successors(Some(at), |c| c.offset(back_dir, 1))
                    .nth(back)
                    .unwrap_or(at);
                return Some(
                    successors(Some(start), |c| c.offset(dir, 1))
                        .take(back + forward + 1)
                        .collect(),
                );
            }
        }
    }
    None
}
