//! Random play.
//!
//! Picks uniformly among the points the game currently allows. Used by the
//! `genmove` protocol command and the demo, and by tests that check board
//! invariants over long random games.

use tracing::debug;

use crate::color::Point;
use crate::error::{GameError, GameResult};
use crate::game::Game;

/// Every point the player to move may try, row-major.
pub fn legal_moves(game: &Game) -> Vec<Point> {
    game.board().points().filter(|&p| game.is_legal(p)).collect()
}

/// A uniformly chosen playable point, or `None` if the mover has to pass.
pub fn random_legal_move(game: &Game, rng: &mut fastrand::Rng) -> Option<Point> {
    let moves = legal_moves(game);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play a random stone for the player to move, or pass if none fits.
///
/// The forbidden set is not refreshed by a pass, so right after one a
/// candidate may still turn out to be suicide. Such candidates are skipped.
pub fn play_random_move(game: &mut Game, rng: &mut fastrand::Rng) -> GameResult<Option<Point>> {
    let color = game.move_color();
    let mut moves = legal_moves(game);
    rng.shuffle(&mut moves);

    for p in moves {
        match game.play_move(p.row, p.column, color) {
            Ok(()) => return Ok(Some(p)),
            Err(GameError::Suicide) => continue,
            Err(e) => return Err(e),
        }
    }
    game.pass_move(color)?;
    Ok(None)
}

/// Play up to `moves` random moves from an empty board.
///
/// Stops early after two consecutive passes.
pub fn random_game(size: usize, moves: usize, seed: u64) -> GameResult<Game> {
    let mut game = Game::new(size)?;
    let mut rng = fastrand::Rng::with_seed(seed);

    for _ in 0..moves {
        if game.passes() >= 2 {
            break;
        }
        play_random_move(&mut game, &mut rng)?;
    }
    debug!(
        size,
        seed,
        move_number = game.move_number(),
        "random game finished"
    );
    Ok(game)
}
