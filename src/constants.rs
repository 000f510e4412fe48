//! Board limits and engine parameters.
//!
//! The core accepts any positive board size. The text protocol front-end is
//! bounded by the vertex alphabet (A-Z without I), hence [`MAX_BOARD_SIZE`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when none is given on the command line.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board the text protocol can address with column letters.
pub const MAX_BOARD_SIZE: usize = 25;

/// Column letters used by vertices. 'I' is skipped by Go convention.
pub const COLUMN_LETTERS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Hashing
// =============================================================================

/// Seed of the Zobrist key table. Mixed with the board size so that every
/// board of a given size gets the same keys.
pub const ZOBRIST_SEED: u64 = 0x6767_6f5f_7275_7374;

// =============================================================================
// Random Play
// =============================================================================

/// Default number of moves played by the random demo game.
pub const DEFAULT_DEMO_MOVES: usize = 80;
