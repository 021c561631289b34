use std::io::{BufRead, Write};

use anyhow::Context;
use hanabi_helper::{visualize_game, Clue, Game, GameConfig, Request, Response, Update};
use tracing::{debug, trace};

use crate::recording::Recorder;

/// The helper as seen by a UI: at most one game, driven by [`Request`]s.
///
/// Starting a new game replaces the old one, there is no other shared state.
#[derive(Default)]
pub struct Session {
    game: Option<Game>,
}

impl Session {
    pub fn new() -> Self {
        Self { game: None }
    }

    /// A session that already has a game dealt.
    pub fn with_game(config: GameConfig) -> Self {
        Self {
            game: Some(Game::new(config)),
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Answers one request. Returns `None` for [`Request::Bye`].
    ///
    /// Rejected requests become [`Response::Error`] and leave the game as it was.
    pub fn handle(&mut self, req: Request) -> Option<Response> {
        match self.dispatch(req) {
            Ok(response) => response,
            Err(err) => {
                debug!(%err, "Request rejected");
                Some(Response::Error {
                    message: err.to_string(),
                })
            }
        }
    }

    /// Parses and answers one line of the protocol. Malformed JSON is
    /// answered with an error as well.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        match serde_json::from_str::<Request>(line) {
            Ok(req) => self.handle(req),
            Err(err) => Some(Response::Error {
                message: format!("Malformed request: {}", err),
            }),
        }
    }

    fn game_mut(&mut self) -> anyhow::Result<&mut Game> {
        self.game
            .as_mut()
            .context("No game in progress, send new_game first")
    }

    fn dispatch(&mut self, req: Request) -> anyhow::Result<Option<Response>> {
        let response = match req {
            Request::NewGame {
                player_count,
                color_rule,
            } => {
                let game = Game::new(GameConfig::new(player_count, color_rule)?);
                let view = game.view();
                self.game = Some(game);
                Response::View(view)
            }
            Request::AssignNumber { tiles, number } => {
                Response::Update(self.game_mut()?.assign_number(&tiles, number)?)
            }
            Request::AssignColor { tiles, color } => {
                Response::Update(self.game_mut()?.assign_color(&tiles, color)?)
            }
            Request::Hint {
                player,
                targets,
                number,
                color,
            } => Response::Update(self.game_mut()?.hint(player, &targets, Clue { number, color })?),
            Request::MarkUsed { tile } => Response::Update(self.game_mut()?.mark_used(tile)?),
            Request::BeginUse { tile } => {
                let game = self.game_mut()?;
                let settled = game.begin_use(tile)?;
                settled_or_pending(game, settled)
            }
            Request::BeginHint { player, targets } => {
                let game = self.game_mut()?;
                game.begin_hint(player, targets)?;
                settled_or_pending(game, None)
            }
            Request::BeginFullReveal { tile } => {
                let game = self.game_mut()?;
                let settled = game.begin_full_reveal(tile)?;
                settled_or_pending(game, settled)
            }
            Request::ChooseNumber { number } => {
                let game = self.game_mut()?;
                let settled = game.choose_number(number)?;
                settled_or_pending(game, settled)
            }
            Request::ChooseColor { color } => {
                let game = self.game_mut()?;
                let settled = game.choose_color(color)?;
                settled_or_pending(game, settled)
            }
            Request::Cancel => {
                let game = self.game_mut()?;
                game.cancel_pending();
                Response::View(game.view())
            }
            Request::Undo => Response::Update(self.game_mut()?.undo()),
            Request::View => Response::View(self.game_mut()?.view()),
            Request::Render => Response::Text {
                text: visualize_game(self.game_mut()?.state()),
            },
            Request::Bye => return Ok(None),
        };
        Ok(Some(response))
    }
}

fn settled_or_pending(game: &Game, settled: Option<Update>) -> Response {
    match (settled, game.pending()) {
        (Some(update), _) => Response::Update(update),
        (None, Some(pending)) => Response::Pending {
            pending: pending.clone(),
        },
        (None, None) => Response::View(game.view()),
    }
}

/// Serves requests from `reader` until EOF or `bye`, one JSON object per line
/// in each direction.
///
/// The recording is written even when serving fails, and holds every request
/// answered up to that point.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    writer: W,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()> {
    let served = serve_lines(session, reader, writer, recorder);
    let recorded = match recorder {
        Some(recorder) => recorder.write_session_recording().map(|_| ()),
        None => Ok(()),
    };
    served.and(recorded)
}

fn serve_lines<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    mut writer: W,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()> {
    let mut buf = String::new();
    loop {
        buf.clear(); // because read_line() appends to the buffer
        let num_bytes_read = reader.read_line(&mut buf)?;
        if num_bytes_read == 0 {
            // EOF - the UI has gone away.
            return Ok(());
        }
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        trace!(name: "Received request", request = %line);
        let response = session.handle_line(line);
        if let Some(recorder) = recorder {
            recorder.store_request(line, response.as_ref())?;
        }
        let Some(response) = response else {
            return Ok(());
        };
        let response_json = serde_json::to_string(&response)?;
        trace!(name: "Sending response", response = %response_json);
        writeln!(writer, "{}", response_json)?;
        writer.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use hanabi_helper::{card, ColorRule, TileId};

    use super::*;

    fn send(session: &mut Session, line: &str) -> Response {
        session.handle_line(line).expect("expected a response")
    }

    #[test]
    fn requires_a_game() {
        let mut session = Session::new();
        let Response::Error { message } = send(&mut session, r#"{"type":"view"}"#) else {
            panic!("expected an error");
        };
        assert!(message.contains("new_game"));
    }

    #[test]
    fn malformed_lines_are_answered() {
        let mut session = Session::new();
        assert!(matches!(send(&mut session, "{"), Response::Error { .. }));
        assert!(matches!(
            send(&mut session, r#"{"type":"new_game","player_count":7}"#),
            Response::Error { .. }
        ));
        assert!(session.game().is_none());
    }

    #[test]
    fn hint_round_trip() {
        let mut session = Session::new();
        let new_game = r#"{"type":"new_game","player_count":2}"#;
        let Response::View(view) = send(&mut session, new_game) else {
            panic!("expected a view");
        };
        assert_eq!(view.pool_size, 50);

        send(&mut session, r#"{"type":"hint","player":0,"targets":[0],"number":3}"#);
        let Response::Update(update) =
            send(&mut session, r#"{"type":"hint","player":0,"targets":[0],"color":"red"}"#)
        else {
            panic!("expected an update");
        };
        assert!(update.pool_changed);
        assert_eq!(update.changed_tiles[0].resolved_card, Some(card!("3r")));
    }

    #[test]
    fn pending_use_over_the_protocol() {
        let config = GameConfig::new(3, ColorRule::Rainbow).unwrap();
        let mut session = Session::with_game(config);
        let response = send(&mut session, r#"{"type":"begin_use","tile":{"player":0,"slot":1}}"#);
        assert!(matches!(response, Response::Pending { .. }));
        let response = send(&mut session, r#"{"type":"choose_color","color":"rainbow"}"#);
        assert!(matches!(response, Response::Pending { .. }));
        let response = send(&mut session, r#"{"type":"choose_number","number":5}"#);
        assert!(matches!(response, Response::Update(_)));
        let game = session.game().unwrap();
        assert!(game.tile(TileId { player: 0, slot: 1 }).unwrap().is_used());
        assert_eq!(game.state().used().get(card!("5m")), 1);

        assert!(matches!(
            send(&mut session, r#"{"type":"choose_number","number":5}"#),
            Response::Error { .. }
        ));
    }

    #[test]
    fn run_until_bye() {
        let input = concat!(
            r#"{"type":"new_game","player_count":4,"color_rule":"standard"}"#,
            "\n\n",
            r#"{"type":"undo"}"#,
            "\n",
            r#"{"type":"bye"}"#,
            "\n",
            r#"{"type":"view"}"#,
            "\n",
        );
        let mut output = Vec::new();
        let mut session = Session::new();
        run_session(&mut session, input.as_bytes(), &mut output, &mut None).unwrap();
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"type":"view""#));
        assert!(lines[1].starts_with(r#"{"type":"update""#));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn recording_survives_a_failed_write() {
        let dir = std::env::temp_dir().join(format!("assistant_session_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut recorder = Some(Recorder::new(dir.clone()).unwrap());
        let input = concat!(
            r#"{"type":"new_game","player_count":2}"#,
            "\n",
            r#"{"type":"view"}"#,
            "\n",
        );
        let mut session = Session::new();
        let result = run_session(&mut session, input.as_bytes(), BrokenPipe, &mut recorder);
        assert!(result.is_err());

        let path = dir.join("session_000001.json");
        let file = std::fs::File::open(&path).unwrap();
        let written: serde_json::Value = serde_json::from_reader(file).unwrap();
        assert_eq!(written[0]["request"]["type"], "new_game");
        assert_eq!(written[0]["response"]["type"], "view");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
