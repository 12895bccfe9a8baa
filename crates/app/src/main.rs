use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lingo_core::Clock;
use lingo_core::catalog::Catalog;
use lingo_core::model::{User, UserId};
use services::{AuthService, DashboardService, LessonLoopService, ProgressService};
use storage::fallback::FallbackProgressStore;
use storage::kv::KvProgressStore;
use storage::repository::{ProgressRepository, Storage};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUser { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    auth: Arc<AuthService>,
    dashboard: Arc<DashboardService>,
    lesson_loop: Arc<LessonLoopService>,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    fn lesson_loop(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lesson_loop)
    }
}

struct Args {
    db_url: String,
    data_dir: PathBuf,
    user_email: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--data-dir <path>] [--user <email>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:codelingo.sqlite3");
    eprintln!("  --data-dir .codelingo");
    eprintln!("  --user demo@codelingo.dev");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LINGO_DB_URL, LINGO_DATA_DIR, LINGO_USER");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LINGO_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://codelingo.sqlite3".into(), normalize_sqlite_url);
        let mut data_dir = std::env::var("LINGO_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from(".codelingo"), PathBuf::from);
        let mut user_email = std::env::var("LINGO_USER")
            .ok()
            .unwrap_or_else(|| "demo@codelingo.dev".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    data_dir = PathBuf::from(value);
                }
                "--user" => {
                    let value = require_value(args, "--user")?;
                    if !value.contains('@') {
                        return Err(ArgsError::InvalidUser { raw: value });
                    }
                    user_email = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            data_dir,
            user_email,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// The SQLite store mirrored into the JSON fallback, or the fallback alone
/// when SQLite cannot be opened at all.
async fn open_progress_store(
    db_url: &str,
    data_dir: &std::path::Path,
) -> Result<Arc<dyn ProgressRepository>, Box<dyn std::error::Error>> {
    let kv: Arc<dyn ProgressRepository> = Arc::new(KvProgressStore::open(data_dir)?);

    if let Err(err) = prepare_sqlite_file(db_url) {
        tracing::warn!(error = %err, "sqlite file setup failed, using local fallback only");
        return Ok(kv);
    }

    match Storage::sqlite(db_url).await {
        Ok(storage) => Ok(Arc::new(FallbackProgressStore::new(
            Arc::clone(&storage.progress),
            kv,
        ))),
        Err(err) => {
            tracing::warn!(error = %err, "sqlite unavailable, using local fallback only");
            Ok(kv)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let progress_repo = open_progress_store(&parsed.db_url, &parsed.data_dir).await?;

    let clock = Clock::default_clock();
    let catalog = Arc::new(Catalog::builtin());

    let profile = User::new(
        UserId::new(format!("user-{}", parsed.user_email)),
        parsed.user_email.clone(),
        None,
    )?;
    let auth = Arc::new(AuthService::new(profile));
    // No stored session lookup yet, so the app starts signed out.
    auth.resolve(None);

    let progress = ProgressService::new(Arc::clone(&progress_repo), clock);
    let lesson_loop = Arc::new(LessonLoopService::new(Arc::clone(&catalog), progress));
    let dashboard = Arc::new(DashboardService::new(catalog, progress_repo, clock));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        auth,
        dashboard,
        lesson_loop,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("CodeLingo")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
