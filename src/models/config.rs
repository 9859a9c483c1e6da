use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub highscore_file: PathBuf,
    pub cors_origin: String,
    // broadcast messages are split into lines of at most this many bytes
    pub line_width: usize,
    pub command_prefix: String,
    // allows "!!nick!cmd" and "@@nick cmd" to act on behalf of other players
    pub debug_game: bool,
    pub verbose_logging: bool,
    pub show_player_roles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            highscore_file: PathBuf::from("highscore.json"),
            cors_origin: "http://localhost:3000".to_string(),
            line_width: 200,
            command_prefix: "!".to_string(),
            debug_game: false,
            verbose_logging: cfg!(debug_assertions),
            show_player_roles: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = env::var("AVALON_BIND_ADDR")
            .ok()
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or(defaults.bind_addr);
        let highscore_file = env::var("AVALON_HIGHSCORE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.highscore_file);
        let cors_origin = env::var("AVALON_CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        let line_width = env::var("AVALON_LINE_WIDTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(defaults.line_width);
        let command_prefix = env::var("AVALON_COMMAND_PREFIX")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.command_prefix);
        let debug_game = env::var("DEBUG_GAME")
            .map(|v| v == "true")
            .unwrap_or(false);
        let verbose_logging = env::var("DEBUG_VERBOSE_LOGGING")
            .map(|v| v == "true")
            .unwrap_or(defaults.verbose_logging);
        let show_player_roles = env::var("DEBUG_SHOW_PLAYER_ROLES")
            .map(|v| v == "true")
            .unwrap_or(false);

        Self {
            bind_addr,
            highscore_file,
            cors_origin,
            line_width,
            command_prefix,
            debug_game,
            verbose_logging,
            show_player_roles,
        }
    }
}
