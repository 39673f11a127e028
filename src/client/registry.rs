//! Client registry
//!
//! Tracks the sessions of connected clients.

use crate::client::Session;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Registry for tracking active clients
pub struct ClientRegistry {
    clients: HashMap<SocketAddr, Session>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    pub fn insert(&mut self, addr: SocketAddr, session: Session) {
        self.clients.insert(addr, session);
    }

    pub fn remove(&mut self, addr: &SocketAddr) -> Option<Session> {
        self.clients.remove(addr)
    }

    pub fn get(&self, addr: &SocketAddr) -> Option<&Session> {
        self.clients.get(addr)
    }

    pub fn get_mut(&mut self, addr: &SocketAddr) -> Option<&mut Session> {
        self.clients.get_mut(addr)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
