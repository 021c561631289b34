use crate::GameState;

/// A settled state that undo can return to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(GameState);

impl Snapshot {
    pub fn state(&self) -> &GameState {
        &self.0
    }
}

/// The undo stack. The bottom entry is the initial deal and is never popped.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new(initial: &GameState) -> Self {
        Self {
            snapshots: vec![Snapshot(initial.clone())],
        }
    }

    /// Pushes a fully settled state.
    pub fn record(&mut self, state: &GameState) {
        self.snapshots.push(Snapshot(state.clone()));
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() >= 2
    }

    /// The state the game is in.
    pub fn current(&self) -> &Snapshot {
        // Never empty, see new() and undo().
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Discards the current snapshot and returns the one before it, which
    /// stays on the stack. Returns `None` at the initial deal.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots.pop();
        Some(self.current())
    }
}
