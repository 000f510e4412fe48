//! Fixed-size grid of intersections.
//!
//! The board owns every [`Place`] and the arena of groups covering them.
//! Places are stored row-major and never added or removed after
//! construction; only their color and group handle change.

use std::fmt;

use crate::color::{Color, Point};
use crate::error::{GameError, GameResult};
use crate::group::{Group, GroupArena, GroupId};
use crate::place::Place;
use crate::zobrist::{Fingerprint, ZobristTable};

#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    places: Vec<Place>,
    pub(crate) groups: GroupArena,
    zobrist: ZobristTable,
    pub(crate) ko_point: Option<Point>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> GameResult<Self> {
        let cells = size
            .checked_mul(size)
            .filter(|&cells| cells > 0)
            .ok_or(GameError::InvalidBoardSize(size))?;
        let places = (0..size)
            .flat_map(|row| (0..size).map(move |column| Place::new(row, column)))
            .collect();
        Ok(Self {
            size,
            places,
            groups: GroupArena::default(),
            zobrist: ZobristTable::new(cells),
            ko_point: None,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.row * self.size + p.column
    }

    /// Validate a coordinate pair.
    pub fn point(&self, row: usize, column: usize) -> GameResult<Point> {
        if row >= self.size || column >= self.size {
            return Err(GameError::OutOfBounds { row, column });
        }
        Ok(Point::new(row, column))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row < self.size && p.column < self.size
    }

    /// The intersection at (`row`, `column`).
    pub fn intersection_at(&self, row: usize, column: usize) -> GameResult<&Place> {
        let p = self.point(row, column)?;
        Ok(self.place_ref(p))
    }

    // The accessors below take points that are already known to be on the
    // board (validated, or produced by `neighbors_of`/`points`).

    pub(crate) fn place_ref(&self, p: Point) -> &Place {
        &self.places[self.idx(p)]
    }

    pub(crate) fn place_mut(&mut self, p: Point) -> &mut Place {
        let i = self.idx(p);
        &mut self.places[i]
    }

    #[inline]
    pub(crate) fn color(&self, p: Point) -> Color {
        self.place_ref(p).color
    }

    /// Overwrite a color without touching groups. Only used by scoped
    /// simulations that restore the previous color.
    pub(crate) fn set_color(&mut self, p: Point, color: Color) {
        self.place_mut(p).color = color;
    }

    /// Orthogonal neighbors on the board, in the order up, left, down, right.
    pub fn neighbors_of(&self, p: Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let up = (p.row > 0).then(|| Point::new(p.row - 1, p.column));
        let left = (p.column > 0).then(|| Point::new(p.row, p.column - 1));
        let down = (p.row + 1 < s).then(|| Point::new(p.row + 1, p.column));
        let right = (p.column + 1 < s).then(|| Point::new(p.row, p.column + 1));
        [up, left, down, right].into_iter().flatten()
    }

    /// Place a stone of `color` at (`row`, `column`), resolving captures.
    pub fn place_stone(&mut self, row: usize, column: usize, color: Color) -> GameResult<()> {
        let p = self.point(row, column)?;
        self.put(p, color)
    }

    /// Digest of the stone layout, hashed over the grid in row-major order.
    pub fn fingerprint(&self) -> Fingerprint {
        self.zobrist.hash(self.places.iter().map(|p| p.color))
    }

    /// All intersections in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |row| (0..s).map(move |column| Point::new(row, column)))
    }

    /// Occupied intersections with their colors, row-major.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.places
            .iter()
            .filter(|p| p.color.is_stone())
            .map(|p| (p.point(), p.color))
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// The group covering `p`, if a stone is there.
    pub fn group_at(&self, p: Point) -> Option<&Group> {
        if !self.contains(p) {
            return None;
        }
        self.place_ref(p).group.and_then(|id| self.groups.get(id))
    }

    /// All live groups.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().map(|(_, g)| g)
    }

    /// The single stone captured by the last placement when it looked like a
    /// simple ko. Informational only: legality uses full position history.
    pub fn ko_point(&self) -> Option<Point> {
        self.ko_point
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.places.chunks(self.size) {
            for place in row {
                let ch = match place.color {
                    Color::Black => 'X',
                    Color::White => 'O',
                    Color::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
