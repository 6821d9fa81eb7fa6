//! OpenSASE Forms API server
//!
//! ```bash
//! FORMS_SESSION_SECRET=change-me forms-api serve --seed-file forms.json
//! FORMS_SESSION_SECRET=change-me forms-api token --user-id u1 --email a@x.com
//! ```

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opensase_forms_api::config::{self, Cli, Command, ServeArgs, TokenArgs};
use opensase_forms_api::session::{issue_token, SessionUser};
use opensase_forms_api::{build_router, AppState, InMemoryFormStore, JwtIdentityProvider};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&cli.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Token(args) => token(args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn serve(args: ServeArgs) -> Result<(), BoxError> {
    let store = match &args.seed_file {
        Some(path) => {
            let forms = config::load_seed_forms(path)?;
            tracing::info!(count = forms.len(), path = %path.display(), "loaded seed forms");
            InMemoryFormStore::with_forms(forms)
        }
        None => InMemoryFormStore::new(),
    };

    let state = AppState::new(
        Arc::new(store),
        Arc::new(JwtIdentityProvider::new(args.session_secret.as_bytes())),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind_addr).await?;
    tracing::info!("Forms API listening on {}", args.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn token(args: TokenArgs) -> Result<(), BoxError> {
    let user = SessionUser {
        id: args.user_id,
        email: args.email,
        name: args.name,
    };
    let ttl = chrono::Duration::hours(i64::from(args.ttl_hours));
    let token = issue_token(args.session_secret.as_bytes(), Some(user), ttl)?;
    println!("{}", token);
    Ok(())
}
