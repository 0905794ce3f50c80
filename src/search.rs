//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search works directly on the caller's board. Every candidate is
//! played through a [`Tentative`](crate::board::Tentative) guard, so the
//! board is restored after each subtree no matter how the subtree exits
//! (normal return, pruning `break`, or an error propagated with `?`).
//!
//! Node counting is explicit: a [`SearchStats`] value is threaded through the
//! recursion by `&mut` and returned with the result.

use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

use crate::board::{BoardError, Coord, Mark, SparseBoard};
use crate::constants::{NODE_CANDIDATES, ROOT_CANDIDATES, WIN_LENGTH};
use crate::eval::evaluate;
use crate::movegen::candidates;
use crate::rules::winner;

/// Tunable limits of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Marks in a row needed to win.
    pub win_length: usize,
    /// Candidates tried at the root.
    pub root_candidates: usize,
    /// Candidates tried at every inner node.
    pub node_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            win_length: WIN_LENGTH,
            root_candidates: ROOT_CANDIDATES,
            node_candidates: NODE_CANDIDATES,
        }
    }
}

impl SearchConfig {
    /// Default limits with a different winning line length.
    pub fn with_win_length(win_length: usize) -> Self {
        Self {
            win_length,
            ..Self::default()
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search calls plus evaluator calls.
    pub nodes: u64,
    /// Evaluator calls alone.
    pub evaluations: u64,
    /// Branches cut by alpha-beta.
    pub cutoffs: u64,
}

/// Outcome of [`Searcher::find_best_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Coord,
    /// Minimax value of `best_move` for the searching player.
    pub score: i32,
    pub depth: u32,
    pub stats: SearchStats,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("cannot search for an empty mark")]
    NoPlayer,
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("no candidate move was searched")]
    NoCandidates,
    /// A generated candidate could not be played or undone. This means the
    /// move generator and the board disagree.
    #[error("board out of sync during search: {0}")]
    Board(#[from] BoardError),
}

/// Minimax searcher.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    /// Searcher with `config`. Candidate caps below 1 are raised to 1 so
    /// that every searched node tries at least one move.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: SearchConfig {
                root_candidates: config.root_candidates.max(1),
                node_candidates: config.node_candidates.max(1),
                ..config
            },
        }
    }

    /// Limits in effect, after clamping.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find the move that maximizes `player`'s minimax value `depth` plies
    /// deep.
    ///
    /// Only the first `root_candidates` candidates in generator order are
    /// tried. Ties keep the earliest candidate. The board is left exactly as
    /// it was passed in.
    pub fn find_best_move(
        &self,
        board: &mut SparseBoard,
        player: Mark,
        depth: u32,
    ) -> Result<SearchResult, SearchError> {
        if !player.is_player() {
            return Err(SearchError::NoPlayer);
        }
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }

        let start = Instant::now();
        let mut stats = SearchStats::default();
        let mut best: Option<(Coord, i32)> = None;

        for mv in candidates(board).into_iter().take(self.config.root_candidates) {
            let score = {
                let mut child = board.tentative(mv, player)?;
                self.minimax(&mut child, depth - 1, false, player, i32::MIN, i32::MAX, &mut stats)?
            };
            debug!("{player} {mv}: {score}");

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        let Some((best_move, score)) = best else {
            return Err(SearchError::NoCandidates);
        };
        info!(
            "{player} depth {depth}: best {best_move} score {score}, {} nodes in {:?}",
            stats.nodes,
            start.elapsed()
        );
        Ok(SearchResult {
            best_move,
            score,
            depth,
            stats,
        })
    }

    /// Value of the current position for `perspective`.
    ///
    /// `maximizing` is true when `perspective` is the side to move.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &mut SparseBoard,
        depth: u32,
        maximizing: bool,
        perspective: Mark,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> Result<i32, SearchError> {
        stats.nodes += 1;
        let win_length = self.config.win_length;

        // leaf: out of depth or the game is already decided
        if depth == 0 || winner(board, win_length).is_some() {
            stats.nodes += 1;
            stats.evaluations += 1;
            return Ok(evaluate(board, perspective, win_length));
        }

        let moves = candidates(board);
        if moves.is_empty() {
            return Ok(0);
        }

        let side = if maximizing { perspective } else { perspective.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves.into_iter().take(self.config.node_candidates) {
            let score = {
                let mut child = board.tentative(mv, side)?;
                self.minimax(&mut child, depth - 1, !maximizing, perspective, alpha, beta, stats)?
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ORIGIN;
    use crate::constants::WIN_SCORE;

    fn board_with(cells: &[(i32, i32, Mark)]) -> SparseBoard {
        let mut b = SparseBoard::new();
        for &(x, y, m) in cells {
            b.place(Coord::new(x, y), m).unwrap();
        }
        b
    }

    #[test]
    fn test_rejects_empty_player() {
        let mut b = SparseBoard::new();
        let s = Searcher::default();
        assert_eq!(s.find_best_move(&mut b, Mark::Empty, 2), Err(SearchError::NoPlayer));
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut b = SparseBoard::new();
        let s = Searcher::default();
        assert_eq!(s.find_best_move(&mut b, Mark::X, 0), Err(SearchError::ZeroDepth));
    }

    #[test]
    fn test_empty_board_plays_origin() {
        let mut b = SparseBoard::new();
        let result = Searcher::default().find_best_move(&mut b, Mark::X, 1).unwrap();
        assert_eq!(result.best_move, ORIGIN);
        // one search call and one evaluation
        assert_eq!(result.stats.nodes, 2);
        assert_eq!(result.stats.evaluations, 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut b = board_with(&[
            (0, 0, Mark::O),
            (0, 1, Mark::O),
            (0, 2, Mark::O),
            (0, 3, Mark::O),
            (5, 0, Mark::X),
        ]);
        let result = Searcher::default().find_best_move(&mut b, Mark::O, 1).unwrap();
        assert_eq!(result.best_move, Coord::new(0, -1));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_four() {
        // O's four is capped at (0, -1); only (0, 4) stops the five
        let mut b = board_with(&[
            (0, -1, Mark::X),
            (0, 0, Mark::O),
            (0, 1, Mark::O),
            (0, 2, Mark::O),
            (0, 3, Mark::O),
        ]);
        let result = Searcher::default().find_best_move(&mut b, Mark::X, 2).unwrap();
        assert_eq!(result.best_move, Coord::new(0, 4));
        assert!(result.score > -WIN_SCORE);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut b = board_with(&[(0, 0, Mark::X), (1, 0, Mark::O), (0, 1, Mark::X), (1, 1, Mark::O)]);
        let before: Vec<_> = b.occupied().collect();
        Searcher::default().find_best_move(&mut b, Mark::X, 3).unwrap();
        let after: Vec<_> = b.occupied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_deeper_search_visits_more_nodes() {
        let cells = [(0, 0, Mark::X), (1, 0, Mark::O)];
        let s = Searcher::default();
        let shallow = s.find_best_move(&mut board_with(&cells), Mark::X, 1).unwrap();
        let deep = s.find_best_move(&mut board_with(&cells), Mark::X, 2).unwrap();
        assert!(deep.stats.nodes > shallow.stats.nodes);
    }

    #[test]
    fn test_root_cap_limits_candidates() {
        let config = SearchConfig {
            root_candidates: 1,
            ..SearchConfig::default()
        };
        let mut b = board_with(&[(0, 0, Mark::X)]);
        let result = Searcher::new(config).find_best_move(&mut b, Mark::O, 1).unwrap();
        // first candidate in (x, y) order
        assert_eq!(result.best_move, Coord::new(-1, -1));
    }

    #[test]
    fn test_zero_caps_are_raised_to_one() {
        let config = SearchConfig {
            root_candidates: 0,
            node_candidates: 0,
            ..SearchConfig::default()
        };
        let searcher = Searcher::new(config);
        assert_eq!(searcher.config().root_candidates, 1);
        assert_eq!(searcher.config().node_candidates, 1);

        let mut b = board_with(&[(0, 0, Mark::X)]);
        let result = searcher.find_best_move(&mut b, Mark::O, 2).unwrap();
        assert_eq!(result.best_move, Coord::new(-1, -1));
        assert!(result.score.abs() <= WIN_SCORE);
    }

    #[test]
    fn test_node_cap_limits_inner_candidates() {
        let config = SearchConfig {
            node_candidates: 1,
            ..SearchConfig::default()
        };
        let mut b = board_with(&[(0, 0, Mark::X)]);
        let result = Searcher::new(config).find_best_move(&mut b, Mark::O, 2).unwrap();
        // eight root moves, each with one reply searched down to a leaf
        assert_eq!(result.stats.nodes, 8 * 3);
        assert_eq!(result.stats.evaluations, 8);

        let full = Searcher::default().find_best_move(&mut b, Mark::O, 2).unwrap();
        assert!(full.stats.evaluations > result.stats.evaluations);
    }
}
