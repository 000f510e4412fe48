//! A single intersection and stone placement.
//!
//! Placement works incrementally: instead of flood-filling after every stone,
//! the empty intersection is first analyzed against its neighbor groups
//! (liberties of the would-be group, friends to merge, enemies to capture),
//! and the board is only written once the move is known to be legal.

use std::collections::HashSet;

use tracing::debug;

use crate::board::Board;
use crate::color::{Color, Point};
use crate::error::{GameError, GameResult};
use crate::group::{Group, GroupId};

/// One intersection of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    row: usize,
    column: usize,
    pub(crate) color: Color,
    /// Group covering this stone. `None` while the place is empty.
    pub(crate) group: Option<GroupId>,
}

impl Place {
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            color: Color::Empty,
            group: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn point(&self) -> Point {
        Point::new(self.row, self.column)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn is_empty(&self) -> bool {
        self.color == Color::Empty
    }
}

/// What placing a stone on an empty intersection would do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// Liberties of the group formed by the new stone and its friends.
    pub liberties: usize,
    /// Distinct adjacent friendly groups, merged on placement.
    pub friends: Vec<GroupId>,
    /// Distinct adjacent enemy groups whose last liberty is this intersection.
    pub dying: Vec<GroupId>,
}

impl Analysis {
    /// No liberties and nothing captured.
    pub fn is_suicide(&self) -> bool {
        self.liberties == 0 && self.dying.is_empty()
    }
}

fn push_unique(ids: &mut Vec<GroupId>, id: GroupId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

impl Board {
    /// Analyze the intersection at `p` for a stone of `color`.
    pub fn analyze_for_color(&self, p: Point, color: Color) -> GameResult<Analysis> {
        if !self.contains(p) {
            return Err(GameError::OutOfBounds {
                row: p.row,
                column: p.column,
            });
        }
        Ok(self.analyze(p, color))
    }

    pub(crate) fn analyze(&self, p: Point, color: Color) -> Analysis {
        let mut liberties: HashSet<Point> = HashSet::new();
        let mut friends = Vec::new();
        let mut foes = Vec::new();

        for n in self.neighbors_of(p) {
            let place = self.place_ref(n);
            match (place.color, place.group) {
                (Color::Empty, _) => {
                    liberties.insert(n);
                }
                (c, Some(id)) if c == color => push_unique(&mut friends, id),
                (_, Some(id)) => push_unique(&mut foes, id),
                (_, None) => {}
            }
        }

        // `p` itself is about to be occupied, so it is not a liberty of the
        // merged group.
        for &id in &friends {
            let Some(group) = self.groups.get(id) else {
                continue;
            };
            for &stone in group.members() {
                for n in self.neighbors_of(stone) {
                    if n != p && self.color(n) == Color::Empty {
                        liberties.insert(n);
                    }
                }
            }
        }

        let dying = foes
            .into_iter()
            .filter(|&id| self.groups.get(id).is_some_and(|g| g.liberties() == 1))
            .collect();

        Analysis {
            liberties: liberties.len(),
            friends,
            dying,
        }
    }

    /// Put a stone of `color` at `p`: merge friends, capture dying enemies.
    ///
    /// Nothing is written unless the placement is legal.
    pub(crate) fn put(&mut self, p: Point, color: Color) -> GameResult<()> {
        if !color.is_stone() {
            return Err(GameError::InvalidColor(color));
        }
        if self.color(p).is_stone() {
            return Err(GameError::AlreadyOccupied {
                row: p.row,
                column: p.column,
            });
        }

        let analysis = self.analyze(p, color);
        if analysis.is_suicide() {
            return Err(GameError::Suicide);
        }

        // Enemy groups that survive lose `p` as a liberty.
        let mut surviving: Vec<GroupId> = Vec::with_capacity(4);
        for n in self.neighbors_of(p) {
            let place = self.place_ref(n);
            if let Some(id) = place.group {
                if place.color != color && !analysis.dying.contains(&id) {
                    push_unique(&mut surviving, id);
                }
            }
        }

        let ko_candidate = match analysis.dying.as_slice() {
            [only]
                if analysis.liberties == 0 && analysis.friends.is_empty() =>
            {
                self.groups
                    .get(*only)
                    .filter(|g| g.len() == 1)
                    .map(|g| g.members()[0])
            }
            _ => None,
        };

        self.set_color(p, color);
        let id = match analysis.friends.split_first() {
            None => self.groups.insert(Group::new(p, analysis.liberties)),
            Some((&target, rest)) => {
                for &other in rest {
                    self.merge_groups(target, other);
                }
                if let Some(group) = self.groups.get_mut(target) {
                    group.push(p);
                    group.set_liberties(analysis.liberties);
                }
                target
            }
        };
        self.place_mut(p).group = Some(id);

        for enemy in surviving {
            if let Some(group) = self.groups.get_mut(enemy) {
                group.remove_liberty();
            }
        }
        for &dead in &analysis.dying {
            self.kill_group(dead);
        }
        self.ko_point = ko_candidate;

        debug!(
            row = p.row,
            column = p.column,
            %color,
            captured_groups = analysis.dying.len(),
            "stone placed"
        );
        Ok(())
    }
}
