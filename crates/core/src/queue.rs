//! Command queue - the single point where input and timer events meet.
//!
//! Whoever produces commands (key handler, gravity clock, a script) pushes
//! them here; the game loop consumes them strictly one at a time in arrival
//! order. Ticks that arrive while the game is paused are dropped by the game
//! loop when consumed, never reordered.

use std::collections::VecDeque;

use crate::types::Command;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Queue `count` gravity ticks.
    pub fn push_ticks(&mut self, count: u32) {
        self.pending
            .extend(std::iter::repeat(Command::Tick).take(count as usize));
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> + '_ {
        self.pending.iter()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

impl FromIterator<Command> for CommandQueue {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}
