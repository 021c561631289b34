use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use hanabi_helper::GameConfig;

/// Reads a game config such as `{"player_count": 3, "color_rule": "rainbow"}`.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Could not open config file '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use hanabi_helper::ColorRule;

    use super::*;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_valid_config() {
        let contents = r#"{"player_count": 3, "color_rule": "rainbow"}"#;
        let path = write_config("rainbow_config", contents);
        let config = load_game_config(&path).unwrap();
        assert_eq!(config.player_count(), 3);
        assert_eq!(config.color_rule(), ColorRule::Rainbow);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_out_of_range_player_count() {
        let path = write_config("bad_config", r#"{"player_count": 6}"#);
        let err = load_game_config(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        std::fs::remove_file(path).unwrap();
    }
}
