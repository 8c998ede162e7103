//! Client configuration loaded from the environment and command line.
use std::env;
use std::path::PathBuf;

use avalon_runtime::RuntimeConfig;

/// Everything needed to start one hot-seat game.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub players: Vec<String>,
    /// Explicit role names. `None` deals the standard table.
    pub roles: Option<Vec<String>>,
    pub runtime: RuntimeConfig,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AVALON_PLAYERS` - Comma separated player names
    /// - `AVALON_ROLES` - Comma separated role names (default: standard table)
    /// - `AVALON_SEED` - Seed for the deal and turn order (default: random)
    /// - `AVALON_EVENT_BUFFER` - Event queue size per topic (default: 100)
    /// - `AVALON_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `AVALON_SESSION_ID` - Session identifier for the log directory
    /// - `AVALON_LOG_DIR` - Log root (default: platform cache directory)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(players) = env::var("AVALON_PLAYERS") {
            config.players = split_list(&players);
        }
        config.roles = env::var("AVALON_ROLES")
            .ok()
            .map(|roles| split_list(&roles))
            .filter(|roles| !roles.is_empty());

        config.runtime.seed = read_env::<u64>("AVALON_SEED");
        if let Some(capacity) = read_env::<usize>("AVALON_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("AVALON_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }

        config.session_id = env::var("AVALON_SESSION_ID").ok();
        config.log_dir = env::var("AVALON_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Positional arguments replace the player list from the environment.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let players: Vec<String> = args.into_iter().collect();
        if !players.is_empty() {
            self.players = players;
        }
        self
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_ignore_blanks_and_padding() {
        assert_eq!(
            split_list(" ann, bob,,cat ,"),
            vec!["ann".to_owned(), "bob".to_owned(), "cat".to_owned()]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn arguments_override_players_only_when_given() {
        let config = ClientConfig {
            players: vec!["ann".into()],
            ..ClientConfig::default()
        };

        let kept = config.clone().with_args(Vec::new());
        assert_eq!(kept.players, vec!["ann".to_owned()]);

        let replaced = config.with_args(["bob".to_owned(), "cat".to_owned()]);
        assert_eq!(replaced.players, vec!["bob".to_owned(), "cat".to_owned()]);
    }
}
