//! Go Text Protocol (GTP) front-end.
//!
//! Exposes a [`Game`] over the line-oriented GTP version 2 protocol so the
//! rules engine can sit behind a graphical client or a test harness.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a board of the given size
//! - `clear_board` - Start a new game on the current size
//! - `play <color> <vertex|pass>` - Play a move
//! - `genmove <color>` - Play a random legal move for the given color
//! - `showboard` - Print the board
//! - `illegal_moves` - List the points the player to move may not play
//! - `state` - Print the game snapshot as JSON
//!
//! Vertices use column letters A-Z without I and row numbers counted from
//! the bottom, so on a 9x9 board `A9` is row 0, column 0.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::debug;

use crate::color::{Color, Point};
use crate::constants::{COLUMN_LETTERS, MAX_BOARD_SIZE};
use crate::error::GameResult;
use crate::game::Game;
use crate::playout::play_random_move;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "illegal_moves",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "state",
    "version",
];

/// Parse a vertex such as `D4` on a board of the given size.
pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let column = COLUMN_LETTERS
        .iter()
        .take(size)
        .position(|&c| c as char == letter)?;
    let number: usize = chars.as_str().parse().ok()?;
    if number == 0 || number > size {
        return None;
    }
    Some(Point::new(size - number, column))
}

/// Format a point as a vertex. Inverse of [`parse_vertex`].
pub fn format_vertex(p: Point, size: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[p.column] as char, size - p.row)
}

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    rng: fastrand::Rng,
}

impl GtpEngine {
    /// Create an engine with an empty board of the given size.
    pub fn new(size: usize) -> GameResult<Self> {
        Self::with_seed(size, fastrand::u64(..))
    }

    /// Create an engine whose `genmove` choices are reproducible.
    pub fn with_seed(size: usize, seed: u64) -> GameResult<Self> {
        Ok(Self {
            game: Game::new(size)?,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop on arbitrary streams.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read GTP command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "gtp command");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")
                .context("failed to write GTP response")?;
            output.flush().context("failed to flush GTP response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_BOARD_SIZE).contains(&size) => self.reset(size),
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => self.reset(self.game.size()),

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = Color::parse(color) else {
                    return (false, "invalid color".to_string());
                };

                let result = if vertex.eq_ignore_ascii_case("pass") {
                    self.game.pass_move(color)
                } else {
                    let Some(p) = parse_vertex(vertex, self.game.size()) else {
                        return (false, "invalid vertex".to_string());
                    };
                    self.game.play_move(p.row, p.column, color)
                };
                match result {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, format!("illegal move: {e}")),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| Color::parse(c)) else {
                    return (false, "invalid color".to_string());
                };
                if color != self.game.move_color() {
                    return (false, format!("not {color}'s turn"));
                }
                match play_random_move(&mut self.game, &mut self.rng) {
                    Ok(Some(p)) => (true, format_vertex(p, self.game.size())),
                    Ok(None) => (true, "pass".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "illegal_moves" => {
                let size = self.game.size();
                let vertices: Vec<String> = self
                    .game
                    .illegal_points()
                    .iter()
                    .map(|&p| format_vertex(p, size))
                    .collect();
                (true, vertices.join(" "))
            }

            "state" => match serde_json::to_string(&self.game.state()) {
                Ok(json) => (true, json),
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn reset(&mut self, size: usize) -> (bool, String) {
        match Game::new(size) {
            Ok(game) => {
                self.game = game;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::with_seed(9, 7).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_vertex_roundtrip() {
        assert_eq!(parse_vertex("A9", 9), Some(Point::new(0, 0)));
        assert_eq!(parse_vertex("j1", 9), Some(Point::new(8, 8)));
        assert_eq!(parse_vertex("I5", 9), None);
        assert_eq!(parse_vertex("A10", 9), None);
        assert_eq!(parse_vertex("A0", 9), None);
        assert_eq!(format_vertex(Point::new(4, 7), 9), "H5");
        assert_eq!(parse_vertex("H5", 9), Some(Point::new(4, 7)));
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["name"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();

        let (success, _) = engine.execute("boardsize", &["13"]);
        assert!(success);
        assert_eq!(engine.game().size(), 13);

        let (success, _) = engine.execute("boardsize", &["0"]);
        assert!(!success);
        let (success, _) = engine.execute("boardsize", &["26"]);
        assert!(!success);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(success);
        assert_eq!(engine.game().move_number(), 2);

        let (success, response) = engine.execute("play", &["black", "E5"]);
        assert!(!success);
        assert!(response.contains("turn"), "got '{response}'");

        let (success, _) = engine.execute("play", &["white", "pass"]);
        assert!(success);

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.game().move_number(), 1);
    }

    #[test]
    fn test_genmove() {
        let mut engine = engine();
        let (success, response) = engine.execute("genmove", &["b"]);
        assert!(success);
        assert!(parse_vertex(&response, 9).is_some(), "got '{response}'");
        assert_eq!(engine.game().move_color(), Color::White);

        let (success, _) = engine.execute("genmove", &["b"]);
        assert!(!success);
    }

    /// Ko in the top-left of a 5x5 board, right after Black took it.
    fn ko_engine() -> GtpEngine {
        let mut engine = GtpEngine::with_seed(5, 7).unwrap();
        let moves = [
            ("b", "B5"),
            ("w", "C5"),
            ("b", "A4"),
            ("w", "D4"),
            ("b", "B3"),
            ("w", "C3"),
            ("b", "E1"),
            ("w", "B4"),
            ("b", "C4"),
        ];
        for (color, vertex) in moves {
            let (success, response) = engine.execute("play", &[color, vertex]);
            assert!(success, "{color} {vertex}: {response}");
        }
        engine
    }

    #[test]
    fn test_illegal_moves_lists_ko_retake() {
        let mut engine = ko_engine();
        let (success, response) = engine.execute("illegal_moves", &[]);
        assert!(success);
        let vertices: Vec<&str> = response.split_whitespace().collect();
        assert!(vertices.contains(&"B4"), "got '{response}'");

        let (success, _) = engine.execute("play", &["w", "B4"]);
        assert!(!success);
    }

    #[test]
    fn test_state_is_json() {
        let mut engine = ko_engine();
        let (success, response) = engine.execute("state", &[]);
        assert!(success);

        let json: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(json["moveNumber"], 10);
        assert_eq!(json["moveColor"], "white");
        assert_eq!(json["stones"].as_array().unwrap().len(), 8);
        let illegal = json["illegal"].as_array().unwrap();
        assert!(
            illegal
                .iter()
                .any(|p| p["row"] == 1 && p["column"] == 1),
            "got {response}"
        );
    }

    #[test]
    fn test_serve_writes_responses() {
        let mut engine = engine();
        let input = b"1 boardsize 3\nplay b B2\n# comment\n2 showboard\nquit\nname\n";
        let mut output = Vec::new();
        engine.serve(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("=1 \n\n= \n\n"), "got {text:?}");
        assert!(text.contains("=2 \n. . . \n. X . \n. . . \n"), "got {text:?}");
        // nothing after quit
        assert!(!text.contains(env!("CARGO_PKG_NAME")));
    }
}
