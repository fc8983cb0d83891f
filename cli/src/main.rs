//! Command-line front-end for the Orbi delivery backend.
//!
//! Plays the role of the original pages: login/registration, the protected
//! session gate, the route list, the route-detail timeline, and stop
//! submission for optimization. Credentials travel as flags or env vars,
//! mirroring the browser's cookie pair.

use std::fs;
use std::io::{self, Read};

use clap::{Args, Parser, Subcommand};
use orbi_client::net::api::{ApiClient, BearerToken, SessionCookie};
use orbi_client::net::error::ApiError;
use orbi_client::net::types::{
    LoginRequest, RegisterRequest, RouteResponse, StatusTone, Stop,
};
use orbi_client::state::auth::{GuardOutcome, run_session_guard};
use orbi_client::state::draft::{DraftError, DraftRoute};
use orbi_client::state::routes::{RouteDetailOutcome, RoutesState, settle_route_detail};
use orbi_client::state::session::{
    FormError, login_failure_message, register_failure_message, validate_login, validate_register,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session cookie; pass --session or set ORBI_SESSION")]
    MissingSession,
    #[error("missing bearer token; pass --token or set ORBI_TOKEN")]
    MissingToken,
    #[error("session invalid; log in again")]
    SessionInvalid,
    #[error("{0}")]
    Form(#[from] FormError),
    #[error("{0}")]
    Draft(#[from] DraftError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Message(String),
    #[error("could not read {path}: {source}")]
    Input { path: String, source: io::Error },
    #[error("invalid stops JSON: {0}")]
    InvalidStops(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "orbi", about = "Orbi delivery route client")]
struct Cli {
    #[arg(long, env = "ORBI_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Session cookie as the full `name=value` pair from login.
    #[arg(long, env = "ORBI_SESSION")]
    session: Option<String>,

    /// Bearer token for the optimize endpoint (the `token` cookie value).
    #[arg(long, env = "ORBI_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the credentials as shell exports.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },
    /// Check whether the session cookie is still valid.
    Validate,
    Route(RouteCommand),
}

#[derive(Args, Debug)]
struct RouteCommand {
    #[command(subcommand)]
    command: RouteSubcommand,
}

#[derive(Subcommand, Debug)]
enum RouteSubcommand {
    /// List saved routes.
    List,
    /// Show one route as a delivery timeline.
    Show { id: i64 },
    /// Submit a stop batch for optimization and print the reordered result.
    Optimize {
        /// JSON array of stops; a file path, or - for stdin.
        #[arg(long, default_value = "-")]
        input: String,
    },
}

struct CliContext {
    api: ApiClient,
    session: Option<SessionCookie>,
    token: Option<BearerToken>,
}

impl CliContext {
    fn session(&self) -> Result<&SessionCookie, CliError> {
        self.session.as_ref().ok_or(CliError::MissingSession)
    }

    fn token(&self) -> Result<&BearerToken, CliError> {
        self.token.as_ref().ok_or(CliError::MissingToken)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let ctx = CliContext {
        api: ApiClient::new(cli.base_url)?,
        session: cli.session.map(SessionCookie::new),
        token: cli.token.map(BearerToken::new),
    };

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, email, password).await,
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            phone_number,
        } => {
            let request = RegisterRequest {
                name,
                email,
                password,
                confirm_password,
                phone_number,
            };
            run_register(&ctx, &request).await
        }
        Command::Validate => run_validate(&ctx).await,
        Command::Route(route) => match route.command {
            RouteSubcommand::List => run_route_list(&ctx).await,
            RouteSubcommand::Show { id } => run_route_show(&ctx, id).await,
            RouteSubcommand::Optimize { input } => run_route_optimize(&ctx, &input).await,
        },
    }
}

async fn run_login(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let request = LoginRequest { email, password };
    validate_login(&request)?;

    let credentials = ctx
        .api
        .login(&request)
        .await
        .map_err(|e| CliError::Message(login_failure_message(&e).to_owned()))?;

    match &credentials.session {
        Some(session) => println!("export ORBI_SESSION='{}'", session.as_header_value()),
        None => eprintln!("warning: backend set no session cookie"),
    }
    match &credentials.token {
        Some(token) => println!("export ORBI_TOKEN='{}'", token.expose()),
        None => eprintln!("warning: backend set no token cookie"),
    }
    Ok(())
}

async fn run_register(ctx: &CliContext, request: &RegisterRequest) -> Result<(), CliError> {
    validate_register(request)?;
    ctx.api
        .register(request)
        .await
        .map_err(|e| CliError::Message(register_failure_message(&e)))?;
    println!("registered; log in with `orbi login`");
    Ok(())
}

async fn run_validate(ctx: &CliContext) -> Result<(), CliError> {
    match run_session_guard(&ctx.api, ctx.session.as_ref()).await {
        GuardOutcome::Render => {
            println!("session ok");
            Ok(())
        }
        GuardOutcome::RedirectToLogin => Err(CliError::SessionInvalid),
    }
}

async fn run_route_list(ctx: &CliContext) -> Result<(), CliError> {
    let session = ctx.session()?;
    if run_session_guard(&ctx.api, Some(session)).await == GuardOutcome::RedirectToLogin {
        return Err(CliError::SessionInvalid);
    }

    let mut state = RoutesState::default();
    state.begin_load();
    state.settle(ctx.api.fetch_routes(session).await);
    if let Some(message) = state.error {
        return Err(CliError::Message(message));
    }

    if state.routes.is_empty() {
        println!("no saved routes");
        return Ok(());
    }
    for route in &state.routes {
        print_route_line(route);
    }
    Ok(())
}

async fn run_route_show(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let session = ctx.session()?;
    match settle_route_detail(ctx.api.fetch_route(session, id).await) {
        RouteDetailOutcome::Loaded(route) => {
            print_route_timeline(&route);
            Ok(())
        }
        RouteDetailOutcome::RedirectToLogin => Err(CliError::SessionInvalid),
        RouteDetailOutcome::Failed(message) => Err(CliError::Message(message)),
    }
}

async fn run_route_optimize(ctx: &CliContext, input: &str) -> Result<(), CliError> {
    let token = ctx.token()?;
    let stops = read_stops(input)?;

    let mut draft = DraftRoute::new();
    for stop in stops {
        draft.add_stop(stop)?;
    }

    let snapshot = draft.begin_optimize(Some(token))?;
    match ctx.api.optimize_route(token, &snapshot).await {
        Ok(reordered) => {
            draft.complete_optimize(reordered);
            println!("{}", serde_json::to_string_pretty(draft.stops())?);
            Ok(())
        }
        Err(error) => {
            draft.fail_optimize();
            if error.is_unauthorized() {
                Err(CliError::Message(
                    "unauthorized: the optimizer rejected the token; log in again".to_owned(),
                ))
            } else {
                Err(CliError::Api(error))
            }
        }
    }
}

fn read_stops(input: &str) -> Result<Vec<Stop>, CliError> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Input { path: "stdin".to_owned(), source })?;
        buffer
    } else {
        fs::read_to_string(input).map_err(|source| CliError::Input {
            path: input.to_owned(),
            source,
        })?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn print_route_line(route: &RouteResponse) {
    let driver = route.driver_name.as_deref().unwrap_or("unassigned");
    println!(
        "#{:<4} {:<20} {} deliveries",
        route.id,
        driver,
        route.deliveries.len()
    );
}

fn print_route_timeline(route: &RouteResponse) {
    let driver = route.driver_name.as_deref().unwrap_or("unassigned");
    println!("route #{} / driver {driver}", route.id);
    for delivery in &route.deliveries {
        println!(
            "  {:>3}. [{:<10}|{}] {} — {}",
            delivery.order,
            delivery.status.as_str(),
            tone_label(delivery.status.tone()),
            delivery.recipient_name,
            delivery.dropoff_address
        );
        if !delivery.package_details.is_empty() {
            println!("       package: {}", delivery.package_details);
        }
    }
}

fn tone_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Success => "success",
        StatusTone::Danger => "danger",
        StatusTone::Info => "info",
        StatusTone::Warning => "warning",
        StatusTone::Neutral => "neutral",
    }
}
