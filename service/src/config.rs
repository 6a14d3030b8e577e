use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

/// Default base URL of the dashboard whose pages are being watched.
pub const DEFAULT_PAGE_BASE_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL of the dashboard's server-sent event stream. When unset, the
    /// watcher never starts and the process exits after logging so.
    #[arg(long, env = "IOT_SSE_URL")]
    stream_url: Option<String>,

    /// Base URL of the dashboard, used when re-fetching the watched page.
    #[arg(long, env, default_value = DEFAULT_PAGE_BASE_URL)]
    page_base_url: String,

    /// Path of the page to keep fresh, e.g. / or /materials/42.
    #[arg(long, env, default_value = "/")]
    watch_path: String,

    /// Delay in milliseconds before re-subscribing after a stream failure.
    #[arg(long, env, default_value_t = 5000)]
    pub reconnect_delay_ms: u64,

    /// Session cookie value, for dashboards that require a login.
    #[arg(long, env)]
    session_cookie: Option<String>,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// The event stream endpoint, if one was configured.
    pub fn stream_url(&self) -> Option<String> {
        self.stream_url.clone()
    }

    pub fn page_base_url(&self) -> &str {
        &self.page_base_url
    }

    pub fn watch_path(&self) -> &str {
        &self.watch_path
    }

    pub fn session_cookie(&self) -> Option<String> {
        self.session_cookie.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_the_stream_url_unset() {
        let config = Config::try_parse_from(["inventory-watch"]).unwrap();
        assert_eq!(config.stream_url(), None);
        assert_eq!(config.page_base_url(), DEFAULT_PAGE_BASE_URL);
        assert_eq!(config.watch_path(), "/");
        assert_eq!(config.reconnect_delay_ms, 5000);
        assert_eq!(config.session_cookie(), None);
        assert_eq!(config.log_level_filter, LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "inventory-watch",
            "--stream-url",
            "http://sheet:5000/sse",
            "--watch-path",
            "/materials",
            "--reconnect-delay-ms",
            "250",
            "--log-level-filter",
            "DEBUG",
        ])
        .unwrap();
        assert_eq!(
            config.stream_url().as_deref(),
            Some("http://sheet:5000/sse")
        );
        assert_eq!(config.watch_path(), "/materials");
        assert_eq!(config.reconnect_delay_ms, 250);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }

    #[test]
    fn log_level_rejects_unknown_values() {
        let result = Config::try_parse_from(["inventory-watch", "--log-level-filter", "LOUD"]);
        assert!(result.is_err());
    }
}
