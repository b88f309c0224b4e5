//! Command-line and environment configuration.

use clap::Parser;

use crate::store::TodoStore;

/// Serve the todos API with browsable OpenAPI docs.
#[derive(Parser, Debug, Clone)]
#[command(name = "todos-server", version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "TODOS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL advertised in the OpenAPI document [default: http://localhost:<port>]
    #[arg(long, env = "TODOS_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Start with an empty collection instead of the demo records
    #[arg(long, env = "TODOS_EMPTY")]
    pub empty: bool,

    /// Log filter directive, e.g. `info` or `todos_server=debug,tower_http=debug`
    #[arg(long = "log", env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn public_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }

    /// The store the server starts with.
    pub fn initial_store(&self) -> TodoStore {
        if self.empty {
            TodoStore::new()
        } else {
            TodoStore::seeded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["todos-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_win() {
        let config = parse(&["--host", "0.0.0.0", "--port", "8080", "--log", "debug"]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn public_url_defaults_to_localhost_port() {
        let config = parse(&["--port", "4000"]);
        assert_eq!(config.public_url(), "http://localhost:4000");
        let config = parse(&["--public-url", "https://todos.example/"]);
        assert_eq!(config.public_url(), "https://todos.example");
    }

    #[test]
    fn empty_flag_skips_seed() {
        assert!(parse(&["--empty"]).initial_store().is_empty());
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["todos-server", "--port", "http"]).is_err());
    }
}
