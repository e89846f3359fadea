use crate::connection::Connection;
use crate::types::{ConnectionId, Player};
use std::collections::HashMap;

/// Players in turn order plus the index of whoever holds the bomb.
///
/// `order` and `players` always hold the same set of ids. While the roster
/// is non-empty `current < order.len()`.
#[derive(Debug, Default)]
pub struct Roster {
    order: Vec<Connection>,
    players: HashMap<ConnectionId, Player>,
    current: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.players.contains_key(id)
    }

    /// Append a player at the end of the rotation. Returns false if the
    /// connection is already seated.
    pub fn push(&mut self, conn: Connection, player: Player) -> bool {
        if self.contains(conn.id()) {
            return false;
        }
        self.players.insert(conn.id().clone(), player);
        self.order.push(conn);
        true
    }

    /// Remove a player, keeping the turn pointer on the same logical
    /// successor. Returns the index the player was seated at.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<(usize, Connection, Player)> {
        let idx = self.order.iter().position(|c| c.id() == id)?;
        let conn = self.order.remove(idx);
        let player = self.players.remove(id)?;

        if idx < self.current {
            self.current -= 1;
        } else if !self.order.is_empty() {
            self.current %= self.order.len();
        } else {
            self.current = 0;
        }

        self.check_invariants();
        Some((idx, conn, player))
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset_turn(&mut self) {
        self.current = 0;
    }

    pub fn advance(&mut self) {
        if !self.order.is_empty() {
            self.current = (self.current + 1) % self.order.len();
        }
    }

    /// Connection whose turn it is
    pub fn active(&self) -> Option<&Connection> {
        if self.order.is_empty() {
            return None;
        }
        self.order.get(self.current % self.order.len())
    }

    pub fn is_active(&self, id: &ConnectionId) -> bool {
        self.active().is_some_and(|c| c.id() == id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.order.iter()
    }

    /// Players in turn order
    pub fn iter(&self) -> impl Iterator<Item = (&Connection, &Player)> {
        self.order
            .iter()
            .filter_map(|c| self.players.get(c.id()).map(|p| (c, p)))
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|(_, p)| p.name.clone()).collect()
    }

    fn check_invariants(&self) {
        debug_assert_eq!(self.order.len(), self.players.len());
        debug_assert!(self.order.is_empty() || self.current < self.order.len());
    }
}
