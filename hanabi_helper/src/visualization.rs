use crate::{Card, GameState, NumberSet, Tile, PRIMARY_PLAYER};

fn visualize_tile(tile: &Tile) -> String {
    let mut result = match tile.resolved_card() {
        Some(card) => card.to_string(),
        None => {
            let numbers: String = tile.numbers().into_iter().map(|n| n.to_string()).collect();
            let colors: String = tile.colors().into_iter().map(|c| c.letter()).collect();
            format!("{}|{}", numbers, colors)
        }
    };
    if tile.is_used() {
        result += " (used)";
    }
    result
}

/// Renders hands, candidates and the used tally as plain text.
///
/// Resolved tiles show their card (`3r`), others their candidate numbers and
/// color letters (`1245|rygbw`). Used tiles are marked, dead ends get a `!`.
pub fn visualize_game(state: &GameState) -> String {
    let mut result = String::new();
    for (player, p) in state.players().iter().enumerate() {
        if player == PRIMARY_PLAYER {
            result += "you\n";
        } else {
            result += &format!("player {}\n", player);
        }
        for (slot, tile) in p.tiles().iter().enumerate() {
            let id = crate::TileId { player, slot };
            let dead_end = if state.is_dead_end(id).unwrap_or(false) { " !" } else { "" };
            result += &format!("  {:>2}: {}{}\n", slot, visualize_tile(tile), dead_end);
        }
    }
    result += &format!("pool: {} cards\n", state.pool().len());
    result += "used:";
    for color in state.config().colors() {
        result += &format!("\n  {:<8}", color.name());
        for number in NumberSet::all() {
            let card = Card { number, color };
            result += &format!(" {}:{}/{}", number, state.used().get(card), number.copies());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorRule, GameConfig, Number, TileId};

    #[test]
    fn renders_hands_and_tally() {
        let mut state = GameState::new(GameConfig::new(2, ColorRule::Standard).unwrap());
        let id = TileId { player: 1, slot: 0 };
        state.assign_number(id, Number::One).unwrap();
        state.assign_color(id, crate::Color::Red).unwrap();
        state.propagate().unwrap();
        state.mark_used(id).unwrap();

        let text = visualize_game(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "you");
        assert_eq!(lines[1], "   0: 12345|rygbw");
        assert_eq!(lines[6], "player 1");
        assert_eq!(lines[7], "   0: 1r (used)");
        assert_eq!(lines[12], "   5: 12345|rygbw");
        assert_eq!(lines[13], "pool: 49 cards");
        assert!(text.contains("red      1:1/3 2:0/2"));
    }
}
