//! Groups of connected same-colored stones and the arena that holds them.
//!
//! Places refer to their group through a [`GroupId`] handle. A handle carries
//! the generation of its arena slot, so once a group is captured or absorbed
//! every handle to it stops resolving, even if the slot is reused later.

use tracing::debug;

use crate::board::Board;
use crate::color::{Color, Point};

/// Handle to a group living in a board's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId {
    index: usize,
    generation: u32,
}

/// A maximal connected set of same-colored stones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    members: Vec<Point>,
    liberties: usize,
}

impl Group {
    pub(crate) fn new(stone: Point, liberties: usize) -> Self {
        Self {
            members: vec![stone],
            liberties,
        }
    }

    pub fn members(&self) -> &[Point] {
        &self.members
    }

    pub fn liberties(&self) -> usize {
        self.liberties
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append all stones of `other`. Liberties are left to the caller, which
    /// already knows the merged count.
    pub(crate) fn merge(&mut self, other: Group) {
        self.members.extend(other.members);
    }

    pub(crate) fn push(&mut self, stone: Point) {
        self.members.push(stone);
    }

    pub(crate) fn set_liberties(&mut self, liberties: usize) {
        self.liberties = liberties;
    }

    pub(crate) fn add_liberty(&mut self) {
        self.liberties += 1;
    }

    pub(crate) fn remove_liberty(&mut self) {
        debug_assert!(self.liberties > 0, "group has no liberty to lose");
        self.liberties = self.liberties.saturating_sub(1);
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    group: Option<Group>,
}

/// Slot storage for groups with free-list reuse.
#[derive(Clone, Debug, Default)]
pub(crate) struct GroupArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl GroupArena {
    pub(crate) fn insert(&mut self, group: Group) -> GroupId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.group = Some(group);
            return GroupId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            group: Some(group),
        });
        GroupId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: GroupId) -> Option<&Group> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.group.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.group.as_mut())
    }

    /// Take the group out of the arena and invalidate every handle to it.
    pub(crate) fn remove(&mut self, id: GroupId) -> Option<Group> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let group = slot.group.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(group)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.group.as_ref().map(|group| {
                (
                    GroupId {
                        index,
                        generation: slot.generation,
                    },
                    group,
                )
            })
        })
    }
}

impl Board {
    /// Fold `other` into `target`, re-pointing every absorbed stone at
    /// `target`. The absorbed handle is dead afterwards.
    pub(crate) fn merge_groups(&mut self, target: GroupId, other: GroupId) {
        if target == other {
            return;
        }
        let Some(absorbed) = self.groups.remove(other) else {
            return;
        };
        for &stone in absorbed.members() {
            self.place_mut(stone).group = Some(target);
        }
        if let Some(group) = self.groups.get_mut(target) {
            group.merge(absorbed);
        }
    }

    /// Remove a captured group from the board.
    ///
    /// Each captured stone gives one liberty back to every distinct enemy
    /// group touching it. Then the stones are cleared and the handle dies.
    pub(crate) fn kill_group(&mut self, id: GroupId) {
        let Some(group) = self.groups.remove(id) else {
            return;
        };
        debug!(stones = group.len(), "group captured");

        for &stone in group.members() {
            let color = self.color(stone);
            let mut freed: Vec<GroupId> = Vec::with_capacity(4);
            for n in self.neighbors_of(stone) {
                let place = self.place_ref(n);
                if place.color.is_stone() && place.color != color {
                    if let Some(gid) = place.group {
                        if !freed.contains(&gid) {
                            freed.push(gid);
                        }
                    }
                }
            }
            for gid in freed {
                if let Some(enemy) = self.groups.get_mut(gid) {
                    enemy.add_liberty();
                }
            }
        }

        for &stone in group.members() {
            let place = self.place_mut(stone);
            place.color = Color::Empty;
            place.group = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_reuses_slots_with_new_generation() {
        let mut arena = GroupArena::default();
        let a = arena.insert(Group::new(Point::new(0, 0), 2));
        assert!(arena.remove(a).is_some());
        let b = arena.insert(Group::new(Point::new(1, 1), 4));
        assert_ne!(a, b, "reused slot must get a fresh handle");
        assert!(arena.get(a).is_none(), "stale handle must not resolve");
        assert_eq!(arena.get(b).map(Group::liberties), Some(4));
    }

    #[test]
    fn test_remove_twice() {
        let mut arena = GroupArena::default();
        let a = arena.insert(Group::new(Point::new(0, 0), 2));
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
    }

    #[test]
    fn test_remove_liberty() {
        let mut group = Group::new(Point::new(0, 0), 2);
        group.remove_liberty();
        assert_eq!(group.liberties(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no liberty to lose")]
    fn test_remove_liberty_below_zero_is_caught() {
        let mut group = Group::new(Point::new(0, 0), 0);
        group.remove_liberty();
    }

    #[test]
    fn test_merge_groups_repoints_members() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(0, 0, Color::Black).unwrap();
        board.place_stone(0, 2, Color::Black).unwrap();
        // (0, 1) joins both single stones
        board.place_stone(0, 1, Color::Black).unwrap();

        let group = board.group_at(Point::new(0, 0)).unwrap();
        assert_eq!(group.len(), 3);
        assert_eq!(group.liberties(), 3);
        assert_eq!(board.groups().count(), 1);
        let id = board.intersection_at(0, 0).unwrap().group();
        for column in 0..3 {
            assert_eq!(board.intersection_at(0, column).unwrap().group(), id);
        }
    }

    #[test]
    fn test_kill_group_returns_liberties() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(0, 0, Color::White).unwrap();
        board.place_stone(0, 1, Color::Black).unwrap();
        // White (0,0) has one liberty left at (1,0); Black takes it
        board.place_stone(1, 0, Color::Black).unwrap();

        assert_eq!(board.intersection_at(0, 0).unwrap().color(), Color::Empty);
        assert!(board.intersection_at(0, 0).unwrap().group().is_none());
        // both black stones got (0,0) back as a liberty
        assert_eq!(board.group_at(Point::new(0, 1)).unwrap().liberties(), 3);
        assert_eq!(board.group_at(Point::new(1, 0)).unwrap().liberties(), 3);
    }
}
