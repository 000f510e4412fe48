//! ggo-rust: a rules engine for the game of Go.
//!
//! Tracks stones on a square grid, maintains groups and their liberties
//! incrementally, performs captures and rejects suicide and repeated
//! positions (positional superko).
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and engine parameters
//! - [`color`] - Stone colors and coordinates
//! - [`board`] - The grid of intersections and position fingerprints
//! - [`place`] - Single intersections and stone placement
//! - [`group`] - Connected groups, merging and capture
//! - [`game`] - Turn order, history and legal-move computation
//! - [`playout`] - Random play
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use ggo_rust::color::{Color, Point};
//! use ggo_rust::game::Game;
//!
//! let mut game = Game::new(9).unwrap();
//! game.play_move(4, 4, Color::Black).unwrap();
//!
//! let state = game.state();
//! assert_eq!(state.stones.get(&Point::new(4, 4)), Some(&Color::Black));
//! assert_eq!(state.move_color, Color::White);
//! ```

pub mod board;
pub mod color;
pub mod constants;
pub mod error;
pub mod game;
pub mod group;
pub mod gtp;
pub mod place;
pub mod playout;
pub mod zobrist;

pub use error::{GameError, GameResult};
