use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Result, eyre};
use rxlog_app::config::{self, AppConfig};
use rxlog_app::screens::intervention_form::{self, InterventionForm};
use rxlog_app::screens::{Screen, admin, pharmacist, profile};
use rxlog_app::{AppContext, AppError, Notice, Route, landing_route};
use rxlog_auth::cognito::CognitoAuth;
use rxlog_auth::{Session, SessionStore};
use rxlog_core::models::{Category, Outcome, RiskLevel, Role, User};
use rxlog_storage::S3Store;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

type Context = AppContext<CognitoAuth, S3Store>;

#[derive(Parser)]
#[command(name = "rxlog", version, about = "Clinical intervention log")]
struct Cli {
    /// Config file [default: <config dir>/rxlog/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the config file
    Configure {
        #[arg(long)]
        region: String,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        user_pool_client_id: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RXLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RXLOG_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: String,
    },
    Logout,
    /// Show the signed-in user and their landing screen
    Whoami,
    Dashboard,
    Analytics,
    /// List your interventions, newest first
    Interventions,
    /// Log a new intervention
    Log {
        #[arg(long)]
        problem: String,
        #[arg(long, value_parser = parse_label::<RiskLevel>, default_value = "Low")]
        risk: RiskLevel,
        #[arg(long, value_parser = parse_label::<Outcome>, default_value = "Pending")]
        outcome: Outcome,
        /// Medication id; repeatable. Defaults to the first medication.
        #[arg(long = "medication")]
        medications: Vec<String>,
    },
    /// Update your display name
    Profile {
        #[arg(long)]
        full_name: String,
    },
    #[command(subcommand)]
    Admin(AdminCommand),
    #[command(subcommand)]
    Medication(MedicationCommand),
}

#[derive(Subcommand)]
enum AdminCommand {
    Dashboard,
    Interventions,
    Users,
    Leaderboard,
    SetRole {
        user_id: String,
        #[arg(value_parser = parse_role)]
        role: Role,
    },
}

#[derive(Subcommand)]
enum MedicationCommand {
    Add { name: String },
}

fn parse_label<K: Category>(label: &str) -> Result<K, String> {
    K::from_label(label).ok_or_else(|| {
        let labels: Vec<&str> = K::ALL.iter().map(|k| k.label()).collect();
        format!("expected one of: {}", labels.join(", "))
    })
}

fn parse_role(label: &str) -> Result<Role, String> {
    Role::from_label(label).ok_or_else(|| "expected Pharmacist or Administrator".to_string())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout is reserved for command output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(notice: Notice) -> Result<()> {
    if notice.is_error() {
        return Err(eyre!("{notice}"));
    }
    eprintln!("{notice}");
    Ok(())
}

async fn connect(config: &AppConfig, sessions: SessionStore) -> Context {
    let s3 = rxlog_storage::client::build_client_with_region(&config.region).await;
    let cognito = rxlog_auth::client::build_client_with_region(&config.region).await;
    AppContext::new(
        CognitoAuth::new(cognito, config.user_pool_client_id.clone()),
        S3Store::new(s3, config.bucket.clone()),
        sessions,
    )
}

async fn signed_in(ctx: &Context) -> Result<Session> {
    ctx.restore()
        .await
        .ok_or_else(|| eyre!("not signed in; run `rxlog login`"))
}

async fn show<T: Serialize>(
    name: &'static str,
    fetch: impl Future<Output = std::result::Result<T, AppError>>,
) -> Result<()> {
    let mut screen = Screen::new(name);
    screen.load(fetch).await;
    let snapshot = screen
        .snapshot()
        .ok_or_else(|| eyre!("could not load {name}"))?;
    print_json(snapshot)
}

#[derive(Serialize)]
struct SignedInView<'a> {
    user: &'a User,
    landing: Route,
}

fn print_signed_in(session: &Session) -> Result<()> {
    print_json(&SignedInView {
        user: &session.user,
        landing: landing_route(Some(session)),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    let command = match cli.command {
        Command::Configure {
            region,
            bucket,
            user_pool_client_id,
        } => {
            let config = AppConfig {
                config_version: config::CURRENT_VERSION,
                region,
                bucket,
                user_pool_client_id,
            };
            return config::save_config(&config_path, &config);
        }
        command => command,
    };

    let config = config::load_config(&config_path)?;
    let sessions = SessionStore::new(config_path.with_file_name("session.json"));
    let ctx = connect(&config, sessions).await;

    run(&ctx, command).await
}

async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Configure { .. } => Err(eyre!("configure runs without a session")),
        Command::Login { email, password } => {
            let session = ctx.sign_in(&email, &password).await.map_err(|n| eyre!("{n}"))?;
            print_signed_in(&session)
        }
        Command::Signup {
            email,
            password,
            full_name,
        } => {
            let session = ctx
                .sign_up(&email, &password, &full_name)
                .await
                .map_err(|n| eyre!("{n}"))?;
            print_signed_in(&session)
        }
        Command::Logout => match ctx.restore().await {
            Some(session) => report(ctx.sign_out(session).await),
            None => {
                eprintln!("not signed in");
                Ok(())
            }
        },
        Command::Whoami => {
            let session = signed_in(ctx).await?;
            print_signed_in(&session)
        }
        Command::Dashboard => {
            let session = signed_in(ctx).await?;
            show("dashboard", pharmacist::dashboard(&ctx.backend, &session)).await
        }
        Command::Analytics => {
            let session = signed_in(ctx).await?;
            show("analytics", pharmacist::analytics(&ctx.backend, &session)).await
        }
        Command::Interventions => {
            let session = signed_in(ctx).await?;
            show("interventions", pharmacist::interventions(&ctx.backend, &session)).await
        }
        Command::Log {
            problem,
            risk,
            outcome,
            medications,
        } => {
            let session = signed_in(ctx).await?;
            let mut form = if medications.is_empty() {
                let mut picker = Screen::new("medications");
                picker.load(intervention_form::medications(&ctx.backend)).await;
                let listed = picker.snapshot().map(Vec::as_slice).unwrap_or_default();
                InterventionForm::with_medications(listed)
            } else {
                InterventionForm {
                    medication_ids: medications,
                    ..InterventionForm::default()
                }
            };
            form.problem = problem;
            form.risk = risk;
            form.outcome = outcome;

            let (notice, id) = form.submit(&ctx.backend, &session).await;
            if let Some(id) = id {
                print_json(&serde_json::json!({ "id": id }))?;
            }
            report(notice)
        }
        Command::Profile { full_name } => {
            let mut session = signed_in(ctx).await?;
            report(profile::update_profile(ctx, &mut session, &full_name).await)?;
            print_json(&session.user)
        }
        Command::Admin(command) => {
            let session = signed_in(ctx).await?;
            let admin = admin::authorize(&session)?;
            match command {
                AdminCommand::Dashboard => {
                    show("admin dashboard", admin::dashboard(&ctx.backend, &admin)).await
                }
                AdminCommand::Interventions => {
                    show("all interventions", admin::interventions(&ctx.backend, &admin)).await
                }
                AdminCommand::Users => show("users", admin::users(&ctx.backend, &admin)).await,
                AdminCommand::Leaderboard => {
                    show("leaderboard", admin::leaderboard(&ctx.backend, &admin)).await
                }
                AdminCommand::SetRole { user_id, role } => {
                    let mut users = Screen::new("users");
                    let notice =
                        admin::set_role(&ctx.backend, &admin, &mut users, &user_id, role).await;
                    report(notice)?;
                    match users.snapshot() {
                        Some(users) => print_json(users),
                        None => Ok(()),
                    }
                }
            }
        }
        Command::Medication(MedicationCommand::Add { name }) => {
            let session = signed_in(ctx).await?;
            let admin = admin::authorize(&session)?;
            let (notice, id) = admin::add_medication(&ctx.backend, &admin, &name).await;
            if let Some(id) = id {
                print_json(&serde_json::json!({ "id": id, "name": name.trim() }))?;
            }
            report(notice)
        }
    }
}
