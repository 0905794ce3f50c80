//! Infinite TicTacToe: connect-N on an unbounded board.
//!
//! Two players take turns placing `X` and `O` anywhere on the integer plane.
//! The first to line up N marks (5 by default) horizontally, vertically, or
//! diagonally wins. A minimax searcher with alpha-beta pruning plays the
//! computer side.
//!
//! ## Modules
//!
//! - [`constants`] - Rule defaults, search limits, evaluation weights
//! - [`table`] - Chained hash table keyed by Cantor-paired coordinates
//! - [`board`] - Coordinates, marks, and the sparse board
//! - [`rules`] - Win detection
//! - [`movegen`] - Candidate moves next to existing marks
//! - [`eval`] - Heuristic position evaluation
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`game`] - Game session used by the front ends
//! - [`display`] - Text rendering of a board window
//! - [`modes`] - Interactive games, demo, and benchmark
//! - [`protocol`] - Line protocol for driving the engine from other programs
//!
//! ## Example
//!
//! ```
//! use infinite_ttt::board::Mark;
//! use infinite_ttt::game::GameSession;
//!
//! let mut game = GameSession::new(5);
//! for x in 0..4 {
//!     game.make_move(x, 0, Mark::X).unwrap();
//! }
//!
//! let best = game.find_best_move(Mark::X, 2).unwrap();
//! game.make_move(best.x, best.y, Mark::X).unwrap();
//! assert!(game.check_win(Mark::X));
//! println!("{} nodes evaluated", game.nodes_evaluated());
//! ```

pub mod board;
pub mod constants;
pub mod display;
pub mod eval;
pub mod game;
pub mod modes;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod table;
