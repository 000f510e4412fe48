//! Turn controller: move order, position history and legal-move computation.
//!
//! After every move the game records the new position fingerprint and
//! recomputes, for the player to move, which empty intersections are
//! forbidden. A point is forbidden when it is suicide, or when it captures a
//! single stone and the resulting position has been seen before (positional
//! superko).

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::board::Board;
use crate::color::{Color, Point};
use crate::error::{GameError, GameResult};
use crate::zobrist::Fingerprint;

/// Temporary color changes on a board, undone when dropped.
struct Simulation<'a> {
    board: &'a mut Board,
    saved: Vec<(Point, Color)>,
}

impl<'a> Simulation<'a> {
    fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            saved: Vec::with_capacity(2),
        }
    }

    fn set(&mut self, p: Point, color: Color) {
        self.saved.push((p, self.board.color(p)));
        self.board.set_color(p, color);
    }

    fn fingerprint(&self) -> Fingerprint {
        self.board.fingerprint()
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        while let Some((p, color)) = self.saved.pop() {
            self.board.set_color(p, color);
        }
    }
}

/// Why an empty intersection is forbidden for the player to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    Suicide,
    Superko,
}

/// A game of Go in progress.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    move_color: Color,
    move_number: usize,
    passes: usize,
    seen: HashSet<Fingerprint>,
    illegal: BTreeSet<Point>,
}

impl Game {
    /// Start a game on an empty `size`×`size` board, Black to move.
    pub fn new(size: usize) -> GameResult<Self> {
        let mut game = Self {
            board: Board::new(size)?,
            move_color: Color::Black,
            move_number: 1,
            passes: 0,
            seen: HashSet::new(),
            illegal: BTreeSet::new(),
        };
        game.compute_illegal_points();
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Color to move next.
    pub fn move_color(&self) -> Color {
        self.move_color
    }

    /// Number of the next move, starting at 1. Passes count as moves.
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// Consecutive passes since the last stone was placed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Intersections the player to move may not play, row-major.
    pub fn illegal_points(&self) -> &BTreeSet<Point> {
        &self.illegal
    }

    /// Whether the player to move may play at `p`.
    pub fn is_legal(&self, p: Point) -> bool {
        self.board.contains(p) && self.board.color(p) == Color::Empty && !self.illegal.contains(&p)
    }

    /// Whether the position has occurred after some earlier move.
    pub fn has_seen(&self, fingerprint: Fingerprint) -> bool {
        self.seen.contains(&fingerprint)
    }

    /// Play a stone of `color` at (`row`, `column`).
    pub fn play_move(&mut self, row: usize, column: usize, color: Color) -> GameResult<()> {
        self.check_turn(color)?;
        if self.illegal.contains(&Point::new(row, column)) {
            return Err(GameError::IllegalMove { row, column });
        }
        self.board.place_stone(row, column, color)?;

        self.seen.insert(self.board.fingerprint());
        debug!(move_number = self.move_number, %color, row, column, "move");
        self.next_move();
        self.passes = 0;
        self.compute_illegal_points();
        Ok(())
    }

    /// Pass the turn. The board, history and forbidden points are untouched.
    pub fn pass_move(&mut self, color: Color) -> GameResult<()> {
        self.check_turn(color)?;
        debug!(move_number = self.move_number, %color, "pass");
        self.next_move();
        self.passes += 1;
        Ok(())
    }

    /// Read-only snapshot for presentation layers.
    pub fn state(&self) -> GameState {
        GameState {
            move_number: self.move_number,
            move_color: self.move_color,
            stones: self.board.stones().collect(),
            illegal: self.illegal.clone(),
        }
    }

    fn check_turn(&self, color: Color) -> GameResult<()> {
        if color != self.move_color {
            return Err(GameError::WrongTurn {
                expected: self.move_color,
                got: color,
            });
        }
        Ok(())
    }

    fn next_move(&mut self) {
        self.move_color = self.move_color.opposite();
        self.move_number += 1;
    }

    /// Rebuild the set of forbidden points for the player to move.
    pub fn compute_illegal_points(&mut self) {
        let empty: Vec<Point> = self
            .board
            .points()
            .filter(|&p| self.board.color(p) == Color::Empty)
            .collect();

        let mut illegal = BTreeSet::new();
        for p in empty {
            if let Some(violation) = self.classify(p) {
                trace!(row = p.row, column = p.column, ?violation, "forbidden");
                illegal.insert(p);
            }
        }
        self.illegal = illegal;
    }

    /// Why the player to move may not play at `p`, or `None` if they may.
    ///
    /// Fails for points off the board or already occupied.
    pub fn violation_at(&mut self, p: Point) -> GameResult<Option<Violation>> {
        let p = self.board.point(p.row, p.column)?;
        if self.board.color(p).is_stone() {
            return Err(GameError::AlreadyOccupied {
                row: p.row,
                column: p.column,
            });
        }
        Ok(self.classify(p))
    }

    /// Classify an empty intersection known to be on the board.
    fn classify(&mut self, p: Point) -> Option<Violation> {
        let color = self.move_color;
        let analysis = self.board.analyze(p, color);
        if analysis.is_suicide() {
            return Some(Violation::Suicide);
        }

        let captured = match analysis.dying.as_slice() {
            [only] => self
                .board
                .group(*only)
                .filter(|g| g.len() == 1)
                .map(|g| g.members()[0])?,
            _ => return None,
        };

        let mut sim = Simulation::new(&mut self.board);
        sim.set(p, color);
        sim.set(captured, Color::Empty);
        let repeated = self.seen.contains(&sim.fingerprint());
        drop(sim);

        repeated.then_some(Violation::Superko)
    }
}

/// Snapshot of a game for serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub move_number: usize,
    pub move_color: Color,
    #[serde(serialize_with = "serialize_stones")]
    pub stones: BTreeMap<Point, Color>,
    pub illegal: BTreeSet<Point>,
}

#[derive(Serialize)]
struct Stone {
    row: usize,
    column: usize,
    color: Color,
}

fn serialize_stones<S>(stones: &BTreeMap<Point, Color>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(stones.iter().map(|(p, &color)| Stone {
        row: p.row,
        column: p.column,
        color,
    }))
}
