use std::collections::BTreeMap;

use anyhow::{ensure, Context};
use hanabi_helper::{Card, Clue, Game, GameConfig, GameState, Pool, TileId, Update, PRIMARY_PLAYER};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// What happened in one simulated game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub actions: usize,
    pub hints: usize,
    pub uses: usize,
    pub undos: usize,
    /// Tiles dealt over the whole game, replacements included.
    pub tiles_dealt: usize,
    /// Current tiles whose card the helper figured out by the end.
    pub resolved_at_end: usize,
}

/// The real cards: what is left in the deck and what each dealt tile is.
#[derive(Clone, Debug)]
struct Table {
    deck: Vec<Card>,
    truth: BTreeMap<TileId, Card>,
}

impl Table {
    fn card(&self, id: TileId) -> anyhow::Result<Card> {
        self.truth
            .get(&id)
            .copied()
            .with_context(|| format!("Tile {} was never dealt", id))
    }

    /// Deals a real card to every tile the helper knows about but the table
    /// does not.
    fn deal_missing(&mut self, state: &GameState) -> anyhow::Result<()> {
        for (id, _) in state.tiles() {
            if self.truth.contains_key(&id) {
                continue;
            }
            let card = self
                .deck
                .pop()
                .with_context(|| format!("Tile {} was dealt from an empty deck", id))?;
            trace!(tile = %id, %card, "Dealt");
            self.truth.insert(id, card);
        }
        Ok(())
    }
}

struct Simulation {
    game: Game,
    table: Table,
    /// One table per entry of the game's history, so undo rolls both back.
    tables: Vec<Table>,
    report: SimulationReport,
}

impl Simulation {
    fn new(config: GameConfig, rng: &mut StdRng) -> anyhow::Result<Self> {
        let game = Game::new(config);
        let mut deck: Vec<Card> = Pool::build(config.colors()).iter().copied().collect();
        deck.shuffle(rng);
        let mut table = Table {
            deck,
            truth: BTreeMap::new(),
        };
        table.deal_missing(game.state())?;
        let simulation = Self {
            game,
            tables: vec![table.clone()],
            table,
            report: SimulationReport::default(),
        };
        simulation.verify()?;
        Ok(simulation)
    }

    /// Checks the helper's deductions against the real cards.
    fn verify(&self) -> anyhow::Result<()> {
        let state = self.game.state();
        for (id, tile) in state.tiles() {
            let card = self.table.card(id)?;
            ensure!(tile.could_be(card), "Tile {} lost its real card {}", id, card);
            if let Some(resolved) = tile.resolved_card() {
                ensure!(resolved == card, "Tile {} resolved to {} but is {}", id, resolved, card);
            }
            ensure!(!state.is_dead_end(id)?, "Tile {} became a dead end", id);
        }
        ensure!(
            state.pool().len() == self.table.deck.len() + state.unbound_count(),
            "Pool has {} cards, but {} are undealt and {} tiles are unbound",
            state.pool().len(),
            self.table.deck.len(),
            state.unbound_count()
        );
        Ok(())
    }

    /// Brings the table up to date after a settled action.
    fn settled(&mut self, update: Update) -> anyhow::Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        self.table.deal_missing(self.game.state())?;
        self.tables.push(self.table.clone());
        self.verify()
    }

    fn undo(&mut self) -> anyhow::Result<()> {
        self.report.undos += 1;
        if self.game.can_undo() {
            self.tables.pop();
        }
        self.game.undo();
        self.table = self.tables.last().cloned().context("No table left to undo to")?;
        self.verify()
    }

    /// A truthful hint about a random tile's number or color.
    fn give_hint(&mut self, rng: &mut StdRng) -> anyhow::Result<()> {
        let player = rng.gen_range(0..self.game.config().player_count());
        let slots: Vec<usize> = self.game.state().players()[player].current_slots().collect();
        let Some(&slot) = slots.choose(rng) else {
            return Ok(());
        };
        let card = self.table.card(TileId { player, slot })?;
        let clue = if rng.gen_bool(0.5) {
            Clue::number(card.number)
        } else {
            Clue::color(card.color)
        };
        let mut targets = Vec::new();
        for &slot in &slots {
            let other = self.table.card(TileId { player, slot })?;
            if clue.number.map_or(true, |n| n == other.number)
                && clue.color.map_or(true, |c| c == other.color)
            {
                targets.push(slot);
            }
        }
        self.report.hints += 1;
        trace!(player, ?targets, ?clue, "Hint");
        let update = self.game.hint(player, &targets, clue)?;
        self.settled(update)
    }

    /// Plays a tile the way a UI would: the primary player names the card
    /// they used, other players' cards are read off the table first.
    fn use_tile(&mut self, id: TileId) -> anyhow::Result<()> {
        let card = self.table.card(id)?;
        self.report.uses += 1;
        trace!(tile = %id, %card, "Use");
        let mut settled = if id.player == PRIMARY_PLAYER {
            self.game.begin_use(id)?
        } else {
            self.game.begin_full_reveal(id)?
        };
        if settled.is_none() {
            let clue = self.game.pending().map(|p| p.clue()).unwrap_or_default();
            if clue.number.is_none() {
                settled = self.game.choose_number(card.number)?;
            }
            if settled.is_none() && clue.color.is_none() {
                settled = self.game.choose_color(card.color)?;
            }
        }
        let update = settled.with_context(|| format!("Using tile {} did not settle", id))?;
        self.settled(update)?;
        if !self.game.tile(id)?.is_used() {
            let update = self.game.mark_used(id)?;
            self.settled(update)?;
        }
        Ok(())
    }
}

/// Plays one game with random truthful hints, uses and undos, checking after
/// every step that the helper never contradicts the real cards.
///
/// Stops when every tile is used or after `max_actions`.
pub fn simulate_game(
    config: GameConfig,
    rng: &mut StdRng,
    max_actions: usize,
) -> anyhow::Result<SimulationReport> {
    let mut sim = Simulation::new(config, rng)?;
    while sim.report.actions < max_actions {
        let current: Vec<TileId> = sim.game.state().current_tiles().map(|(id, _)| id).collect();
        let Some(&id) = current.choose(rng) else {
            break;
        };
        sim.report.actions += 1;
        match rng.gen_range(0..10) {
            0..=5 => sim.give_hint(rng)?,
            6..=8 => sim.use_tile(id)?,
            _ => sim.undo()?,
        }
    }
    let state = sim.game.state();
    sim.report.tiles_dealt = state.tiles().count();
    sim.report.resolved_at_end = state.bound_count();
    debug!(
        actions = sim.report.actions,
        used = state.used().total(),
        pool = state.pool().len(),
        "Game finished"
    );
    Ok(sim.report)
}
