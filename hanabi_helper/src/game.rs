use tracing::debug;

use crate::{
    Card, Clue, Color, ColorSet, GameConfig, GameState, GameView, History, IllegalAction, Number,
    NumberSet, PendingAction, Tile, TileId, Update, PRIMARY_PLAYER,
};

/// A game in progress: the live state, its undo history and the action
/// waiting for input, if any.
///
/// Every mutating method runs to a settled state (propagation included)
/// before returning, and either commits completely or returns an error and
/// changes nothing. Each settled change is recorded for [`undo()`](Self::undo).
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    history: History,
    pending: Option<PendingAction>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(config);
        debug!(?config, pool = state.pool().len(), "New game");
        Self {
            history: History::new(&state),
            state,
            pending: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.state.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tile(&self, id: TileId) -> Result<&Tile, IllegalAction> {
        self.state.tile(id)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn view(&self) -> GameView {
        GameView::new(&self.state, self.can_undo(), self.pending.clone())
    }

    /// A current tile that no card left in the pool can fill.
    pub fn is_dead_end(&self, id: TileId) -> Result<bool, IllegalAction> {
        self.state.is_dead_end(id)
    }

    /// Copies of `card` not played or discarded yet.
    pub fn remaining(&self, card: Card) -> usize {
        self.state.remaining(card)
    }

    pub fn used(&self, card: Card) -> u8 {
        self.state.used().get(card)
    }

    /// The numbers and colors every one of `tiles` could still be. These are
    /// the only values that can be assigned to all of them at once.
    pub fn common_candidates(
        &self,
        tiles: &[TileId],
    ) -> Result<(NumberSet, ColorSet), IllegalAction> {
        let mut numbers = NumberSet::all();
        let mut colors = self.config().colors();
        for &id in tiles {
            let tile = self.state.tile(id)?;
            numbers &= tile.numbers();
            colors &= tile.colors();
        }
        Ok((numbers, colors))
    }

    pub fn assign_number(
        &mut self,
        tiles: &[TileId],
        number: Number,
    ) -> Result<Update, IllegalAction> {
        self.settle(|state| {
            for &id in tiles {
                state.assign_number(id, number)?;
            }
            Ok(())
        })
    }

    pub fn assign_color(
        &mut self,
        tiles: &[TileId],
        color: Color,
    ) -> Result<Update, IllegalAction> {
        self.settle(|state| {
            for &id in tiles {
                state.assign_color(id, color)?;
            }
            Ok(())
        })
    }

    /// Applies a clue with an explicit split into matching and non-matching tiles.
    pub fn apply_hint(
        &mut self,
        targets: &[TileId],
        non_targets: &[TileId],
        clue: Clue,
    ) -> Result<Update, IllegalAction> {
        self.settle(|state| state.apply_clue(targets, non_targets, clue))
    }

    /// Applies a clue about `target_slots` of `player`; the rest of their
    /// current hand is told it does not match.
    pub fn hint(
        &mut self,
        player: usize,
        target_slots: &[usize],
        clue: Clue,
    ) -> Result<Update, IllegalAction> {
        let targets: Vec<TileId> = target_slots
            .iter()
            .map(|&slot| TileId { player, slot })
            .collect();
        let non_targets = self.state.hint_non_targets(player, target_slots)?;
        self.apply_hint(&targets, &non_targets, clue)
    }

    /// Plays or discards a resolved tile.
    pub fn mark_used(&mut self, id: TileId) -> Result<Update, IllegalAction> {
        self.settle(|state| state.mark_used(id).map(|_| ()))
    }

    /// Returns to the previous settled state. Does nothing at the initial deal.
    pub fn undo(&mut self) -> Update {
        self.pending = None;
        let Some(snapshot) = self.history.undo() else {
            return Update::default();
        };
        let restored = snapshot.state().clone();
        let update = Update::between(&self.state, &restored);
        self.state = restored;
        debug!(history = self.history.len(), "Undo");
        update
    }

    /// Starts playing or discarding a tile of the primary player.
    ///
    /// A resolved tile is used right away. Otherwise the game waits for its
    /// number and color, pre-filled where the tile already knows them.
    pub fn begin_use(&mut self, id: TileId) -> Result<Option<Update>, IllegalAction> {
        let tile = *self.open_tile(id)?;
        if tile.resolved_card().is_some() {
            return self.mark_used(id).map(Some);
        }
        self.advance(PendingAction::Use {
            tile: id,
            clue: known_values(&tile),
        })
    }

    /// Starts a hint about some tiles of one player. It settles with the first
    /// number or color chosen.
    pub fn begin_hint(&mut self, player: usize, targets: Vec<usize>) -> Result<(), IllegalAction> {
        if targets.is_empty() {
            return Err(IllegalAction::NoTargets);
        }
        for &slot in &targets {
            self.open_tile(TileId { player, slot })?;
        }
        self.pending = Some(PendingAction::Hint {
            player,
            targets,
            clue: Clue::default(),
        });
        Ok(())
    }

    /// Starts reading another player's tile. A tile that is already resolved
    /// is used instead.
    pub fn begin_full_reveal(&mut self, id: TileId) -> Result<Option<Update>, IllegalAction> {
        if id.player == PRIMARY_PLAYER {
            return Err(IllegalAction::RevealOnPrimaryPlayer { tile: id });
        }
        let tile = *self.open_tile(id)?;
        if tile.resolved_card().is_some() {
            return self.mark_used(id).map(Some);
        }
        self.advance(PendingAction::FullReveal {
            tile: id,
            clue: known_values(&tile),
        })
    }

    /// Answers the pending action with a number. Returns the update if this
    /// settled the action.
    pub fn choose_number(&mut self, number: Number) -> Result<Option<Update>, IllegalAction> {
        let mut action = self.pending.clone().ok_or(IllegalAction::NoPendingAction)?;
        for id in action.tiles() {
            if !self.state.tile(id)?.numbers().contains(number) {
                return Err(IllegalAction::NumberNotCandidate { tile: id, number });
            }
        }
        action.clue_mut().number = Some(number);
        self.advance(action)
    }

    /// Answers the pending action with a color. Returns the update if this
    /// settled the action.
    pub fn choose_color(&mut self, color: Color) -> Result<Option<Update>, IllegalAction> {
        let mut action = self.pending.clone().ok_or(IllegalAction::NoPendingAction)?;
        for id in action.tiles() {
            if !self.state.tile(id)?.colors().contains(color) {
                return Err(IllegalAction::ColorNotCandidate { tile: id, color });
            }
        }
        action.clue_mut().color = Some(color);
        self.advance(action)
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn open_tile(&self, id: TileId) -> Result<&Tile, IllegalAction> {
        let tile = self.state.tile(id)?;
        if tile.is_used() {
            return Err(IllegalAction::TileAlreadyUsed { tile: id });
        }
        Ok(tile)
    }

    /// Settles `action` if it has everything it needs, else parks it.
    fn advance(&mut self, action: PendingAction) -> Result<Option<Update>, IllegalAction> {
        if !action.is_ready() {
            self.pending = Some(action);
            return Ok(None);
        }
        let update = match action {
            PendingAction::Hint {
                player,
                targets,
                clue,
            } => self.hint(player, &targets, clue)?,
            PendingAction::Use { tile, clue } => self.settle(|state| {
                assign_clue(state, tile, clue)?;
                state.propagate()?;
                state.mark_used(tile).map(|_| ())
            })?,
            PendingAction::FullReveal { tile, clue } => {
                self.settle(|state| assign_clue(state, tile, clue))?
            }
        };
        Ok(Some(update))
    }

    /// Runs `action` on a copy of the state, propagates, and commits.
    fn settle<F>(&mut self, action: F) -> Result<Update, IllegalAction>
    where
        F: FnOnce(&mut GameState) -> Result<(), IllegalAction>,
    {
        let mut next = self.state.clone();
        action(&mut next)?;
        next.propagate()?;
        self.pending = None;
        let update = Update::between(&self.state, &next);
        if !update.is_empty() {
            self.history.record(&next);
            self.state = next;
            debug!(
                tiles = update.changed_tiles.len(),
                pool = self.state.pool().len(),
                "Action settled"
            );
        }
        Ok(update)
    }
}

/// Values the tile is already certain of.
fn known_values(tile: &Tile) -> Clue {
    Clue {
        number: tile.numbers().single(),
        color: tile.colors().single(),
    }
}

fn assign_clue(state: &mut GameState, id: TileId, clue: Clue) -> Result<(), IllegalAction> {
    if let Some(number) = clue.number {
        state.assign_number(id, number)?;
    }
    if let Some(color) = clue.color {
        state.assign_color(id, color)?;
    }
    Ok(())
}
