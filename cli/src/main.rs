//! `wayfare-cli`: exercise the Wayfare session gate from a terminal.
//!
//! Credentials live in a JSON file keyed exactly like the browser's
//! `localStorage`, so `check` runs the same verification cycle a protected
//! page does.

mod file_store;
mod transport;


use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use guard::{
    CredentialStore, GuardError, KeyedStore, LoginError, LoginRequest, PrincipalKind, ProviderType, RouteAccess,
    RouteGuard, TransportError, complete_login, validate_login_input,
};
use tracing_subscriber::EnvFilter;

use crate::file_store::JsonFileStore;
use crate::transport::ReqwestTransport;

/// Exit status for a guard that ended in a login redirect.
const EXIT_REDIRECT: u8 = 2;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("--subtype only applies to --kind provider")]
    SubtypeWithoutProvider,
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("login request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("login failed: {0}")]
    Login(#[from] LoginError),
    #[error("credential store: {0}")]
    Store(#[from] guard::StoreError),
}

#[derive(Parser, Debug)]
#[command(name = "wayfare-cli", about = "Wayfare session and role gate CLI")]
struct Cli {
    #[arg(long, env = "WAYFARE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "WAYFARE_STORE", default_value = ".wayfare/credentials.json")]
    store: PathBuf,

    #[arg(long, env = "WAYFARE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify the stored credential for a route.
    Check {
        #[arg(long)]
        kind: PrincipalKind,
        /// Required provider subtype, e.g. `hotel`, `tour-guide`, `vehicle`.
        #[arg(long)]
        subtype: Option<ProviderType>,
    },
    Login {
        #[arg(long)]
        kind: PrincipalKind,
        #[arg(long)]
        email: String,
        #[arg(long, env = "WAYFARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout {
        #[arg(long)]
        kind: PrincipalKind,
    },
    /// List which kinds hold a stored credential.
    Status,
}

struct CliContext {
    store: KeyedStore<JsonFileStore>,
    base_url: String,
    timeout: Duration,
}

impl CliContext {
    fn transport(&self) -> Result<ReqwestTransport, CliError> {
        Ok(ReqwestTransport::new(&self.base_url, self.timeout)?)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CheckOutcome {
    Authenticated(String),
    Redirect { to: &'static str, reason: GuardError },
}

impl CheckOutcome {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Authenticated(_) => ExitCode::SUCCESS,
            Self::Redirect { .. } => ExitCode::from(EXIT_REDIRECT),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        store: KeyedStore::new(JsonFileStore::new(cli.store)),
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    match cli.command {
        Command::Check { kind, subtype } => {
            let outcome = run_check(&ctx, route_access(kind, subtype)?).await?;
            match &outcome {
                CheckOutcome::Authenticated(name) => println!("authenticated {name}"),
                CheckOutcome::Redirect { to, reason } => println!("redirect {to} ({reason})"),
            }
            Ok(outcome.exit_code())
        }
        Command::Login { kind, email, password } => {
            let name = run_login(&ctx, kind, &email, &password).await?;
            println!("logged in as {name}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout { kind } => {
            ctx.store.clear(kind)?;
            println!("logged out {kind}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            for line in status_lines(&ctx.store) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn route_access(kind: PrincipalKind, subtype: Option<ProviderType>) -> Result<RouteAccess, CliError> {
    match (kind, subtype) {
        (PrincipalKind::Provider, subtype) => Ok(RouteAccess { kind, subtype }),
        (_, Some(_)) => Err(CliError::SubtypeWithoutProvider),
        (_, None) => Ok(RouteAccess { kind, subtype: None }),
    }
}

async fn run_check(ctx: &CliContext, access: RouteAccess) -> Result<CheckOutcome, CliError> {
    let guard = RouteGuard::new(&ctx.store, ctx.transport()?, access);
    Ok(match guard.check().await {
        Ok(principal) => CheckOutcome::Authenticated(principal.label().to_owned()),
        Err(reason) => CheckOutcome::Redirect { to: access.spec().login_route, reason },
    })
}

async fn run_login(ctx: &CliContext, kind: PrincipalKind, email: &str, password: &str) -> Result<String, CliError> {
    let (email, password) = validate_login_input(email, password).map_err(CliError::InvalidInput)?;
    let request = LoginRequest { email: &email, password: &password };
    let reply = ctx.transport()?.post_login(kind.spec().login_endpoint, &request).await?;
    let principal = complete_login(&ctx.store, kind, &reply)?;
    Ok(principal.label().to_owned())
}

fn status_lines<S: CredentialStore>(store: &S) -> Vec<String> {
    PrincipalKind::ALL
        .into_iter()
        .map(|kind| match (store.get(kind), store.cached_principal(kind)) {
            (Some(_), Some(principal)) => format!("{kind}: signed in ({})", principal.label()),
            (Some(_), None) => format!("{kind}: signed in"),
            (None, _) => format!("{kind}: signed out"),
        })
        .collect()
}
