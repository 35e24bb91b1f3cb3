//! Animated items registered with a surface.
//!
//! The surface hands every player an [`AnimateId`]. That id names the
//! player's element scope (`item-{id}`), which is how all elements a player
//! drew can be removed at once.

use crate::SvgForm;
use crate::error::FormError;
use kurbo::Size;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Identity assigned to a player when it is added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimateId(pub u64);

impl AnimateId {
    /// The class and id prefix for elements drawn while scoped to this item.
    pub fn scope_id(self) -> String {
        format!("item-{}", self.0)
    }
}

impl fmt::Display for AnimateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that draws itself once per frame.
pub trait Player {
    /// Called when the surface bound changes, and once on registration if
    /// the surface already has a bound.
    fn resize(&mut self, _bound: Size) {}

    /// Draw one frame. The form is already scoped to this player.
    fn animate(&mut self, form: &mut SvgForm<'_>, time: f64, ftime: f64) -> Result<(), FormError>;
}

/// Players keyed by id, iterated in registration order.
#[derive(Default)]
pub(crate) struct PlayerRegistry {
    players: BTreeMap<AnimateId, Box<dyn Player>>,
    next: u64,
    in_frame: bool,
    removed_in_frame: HashSet<AnimateId>,
    cleared_in_frame: bool,
    /// Last bound seen during a frame, for the players taken out by it.
    pending_bound: Option<Size>,
}

impl PlayerRegistry {
    pub(crate) fn add(&mut self, player: Box<dyn Player>) -> AnimateId {
        let id = AnimateId(self.next);
        self.next += 1;
        self.players.insert(id, player);
        id
    }

    pub(crate) fn remove(&mut self, id: AnimateId) -> bool {
        if self.in_frame {
            self.removed_in_frame.insert(id);
        }
        self.players.remove(&id).is_some()
    }

    pub(crate) fn clear(&mut self) {
        if self.in_frame {
            self.cleared_in_frame = true;
        }
        self.players.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.players.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: AnimateId) -> bool {
        self.players.contains_key(&id)
    }

    pub(crate) fn resize_all(&mut self, bound: Size) {
        if self.in_frame {
            self.pending_bound = Some(bound);
        }
        for player in self.players.values_mut() {
            player.resize(bound);
        }
    }

    /// Move the players out for the duration of a frame.
    pub(crate) fn begin_frame(&mut self) -> BTreeMap<AnimateId, Box<dyn Player>> {
        self.in_frame = true;
        self.removed_in_frame.clear();
        self.cleared_in_frame = false;
        self.pending_bound = None;
        std::mem::take(&mut self.players)
    }

    /// Put the frame's players back. Players removed or cleared during the
    /// frame stay gone, players added during the frame are kept, and a
    /// resize during the frame reaches the returning players.
    pub(crate) fn end_frame(&mut self, players: BTreeMap<AnimateId, Box<dyn Player>>) {
        self.in_frame = false;
        let bound = self.pending_bound.take();
        if !std::mem::take(&mut self.cleared_in_frame) {
            for (id, mut player) in players {
                if self.removed_in_frame.contains(&id) {
                    continue;
                }
                if let Some(bound) = bound {
                    player.resize(bound);
                }
                self.players.insert(id, player);
            }
        }
        self.removed_in_frame.clear();
    }
}

impl fmt::Debug for PlayerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerRegistry")
            .field("ids", &self.players.keys().collect::<Vec<_>>())
            .field("next", &self.next)
            .field("in_frame", &self.in_frame)
            .finish()
    }
}
