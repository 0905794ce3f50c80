//! Game session: one board plus the statistics of the latest search.
//!
//! This is the interface the interactive front ends and the text protocol
//! talk to. It never touches stdin or stdout itself.

use crate::board::{BoardError, Coord, Mark, SparseBoard};
use crate::movegen::candidates;
use crate::rules::{has_line, winner};
use crate::search::{SearchConfig, SearchError, SearchResult, Searcher};

#[derive(Debug, Clone, Default)]
pub struct GameSession {
    board: SparseBoard,
    searcher: Searcher,
    last_search: Option<SearchResult>,
}

impl GameSession {
    /// New game where `win_length` marks in a row win.
    pub fn new(win_length: usize) -> Self {
        Self::with_config(SearchConfig::with_win_length(win_length))
    }

    /// New game with explicit search limits; the win length comes from
    /// `config`.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            board: SparseBoard::new(),
            searcher: Searcher::new(config),
            last_search: None,
        }
    }

    /// Clear the board and the search statistics.
    pub fn reset(&mut self) {
        self.board = SparseBoard::new();
        self.last_search = None;
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &SparseBoard {
        &self.board
    }

    /// Search limits in effect for this game.
    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }

    /// Marks in a row needed to win.
    pub fn win_length(&self) -> usize {
        self.config().win_length
    }

    /// Content of the cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Mark {
        self.board.get(Coord::new(x, y))
    }

    /// Play `mark` at `(x, y)`. Fails without side effects if the cell is
    /// taken.
    pub fn make_move(&mut self, x: i32, y: i32, mark: Mark) -> Result<(), BoardError> {
        self.board.place(Coord::new(x, y), mark)
    }

    /// True if `mark` has a winning line on the board.
    pub fn check_win(&self, mark: Mark) -> bool {
        has_line(&self.board, mark, self.win_length())
    }

    /// The player with a winning line, if any.
    pub fn winner(&self) -> Option<Mark> {
        winner(&self.board, self.win_length())
    }

    /// Cells next to existing marks, or the origin on an empty board.
    pub fn possible_moves(&self) -> Vec<Coord> {
        candidates(&self.board)
    }

    /// Search `depth` plies for `mark`'s best move. The move is not played.
    pub fn find_best_move(&mut self, mark: Mark, depth: u32) -> Result<Coord, SearchError> {
        self.last_search = None;
        let result = self.searcher.find_best_move(&mut self.board, mark, depth)?;
        self.last_search = Some(result);
        Ok(result.best_move)
    }

    /// Nodes visited by the most recent search, 0 if none ran since reset.
    pub fn nodes_evaluated(&self) -> u64 {
        self.last_search.map_or(0, |r| r.stats.nodes)
    }

    /// Full result of the most recent successful search.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_everything() {
        let mut game = GameSession::new(5);
        game.make_move(0, 0, Mark::X).unwrap();
        game.find_best_move(Mark::O, 1).unwrap();
        assert!(game.nodes_evaluated() > 0);

        game.reset();
        assert_eq!(game.cell(0, 0), Mark::Empty);
        assert_eq!(game.nodes_evaluated(), 0);
        assert!(game.last_search().is_none());
    }

    #[test]
    fn test_failed_search_clears_stats() {
        let mut game = GameSession::new(5);
        game.find_best_move(Mark::X, 1).unwrap();
        assert!(game.find_best_move(Mark::X, 0).is_err());
        assert_eq!(game.nodes_evaluated(), 0);
    }

    #[test]
    fn test_win_length_is_configurable() {
        let mut game = GameSession::new(3);
        assert_eq!(game.win_length(), 3);
        for x in 0..3 {
            game.make_move(x, 0, Mark::O).unwrap();
        }
        assert!(game.check_win(Mark::O));
        assert_eq!(game.winner(), Some(Mark::O));
    }
}
