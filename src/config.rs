//! Command-line and environment configuration

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::models::Form;

/// Top-level command line
#[derive(Debug, Parser)]
#[command(name = "forms-api")]
#[command(author = "OpenSASE")]
#[command(version)]
#[command(about = "OpenSASE Forms intake API", long_about = None)]
pub struct Cli {
    /// Log filter directive (tracing EnvFilter syntax)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Mint a session token for local testing
    Token(TokenArgs),
}

/// Options for `serve`
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "FORMS_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// HMAC secret used to verify session tokens
    #[arg(long, env = "FORMS_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// JSON file with forms to preload into the in-memory store
    #[arg(long, env = "FORMS_SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

/// Options for `token`
#[derive(Debug, Clone, Args)]
pub struct TokenArgs {
    /// HMAC secret used to sign the token
    #[arg(long, env = "FORMS_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// User id placed in the token
    #[arg(long)]
    pub user_id: String,

    /// Optional email placed in the token
    #[arg(long)]
    pub email: Option<String>,

    /// Optional display name placed in the token
    #[arg(long)]
    pub name: Option<String>,

    /// Token lifetime in hours
    #[arg(long, default_value_t = 8)]
    pub ttl_hours: u32,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not a JSON array of forms
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

/// Load a JSON array of forms
pub fn load_seed_forms(path: &Path) -> Result<Vec<Form>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let file_name = format!("forms-api-{}-{name}", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from([
            "forms-api",
            "serve",
            "--bind-addr",
            "127.0.0.1:9000",
            "--session-secret",
            "s3cret",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind_addr, "127.0.0.1:9000".parse().unwrap());
                assert_eq!(args.session_secret, "s3cret");
                assert!(args.seed_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_token_args_defaults() {
        let cli = Cli::try_parse_from([
            "forms-api",
            "token",
            "--session-secret",
            "s3cret",
            "--user-id",
            "u1",
        ])
        .unwrap();

        match cli.command {
            Command::Token(args) => {
                assert_eq!(args.user_id, "u1");
                assert_eq!(args.ttl_hours, 8);
                assert!(args.email.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_load_seed_forms() {
        let path = scratch_file(
            "seed.json",
            r#"[{"id": "f1", "title": "Feedback", "is_published": true}, {"id": "f2"}]"#,
        );

        let forms = load_seed_forms(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0], Form::new("f1", "Feedback", true));
        assert!(!forms[1].is_published);
    }

    #[test]
    fn test_load_seed_forms_errors() {
        let missing = std::env::temp_dir().join("forms-api-does-not-exist.json");
        assert!(matches!(load_seed_forms(&missing), Err(ConfigError::Read { .. })));

        let path = scratch_file("broken.json", "{ not json");
        let result = load_seed_forms(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
