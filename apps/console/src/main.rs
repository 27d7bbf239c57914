use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_console::config::Config;
use resume_console::dashboard::Dashboard;
use resume_console::history::Settled;
use resume_console::models::ResumeId;
use resume_console::render::render_detail;
use resume_console::render::text::{DetailText, HistoryTable};
use resume_console::upload::validation::CandidateFile;

const USAGE: &str = "usage: resume-console [list | upload <path> [--type <media-type>] | show <id>]";

enum Command {
    List,
    Upload {
        path: PathBuf,
        media_type: Option<String>,
    },
    Show(ResumeId),
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let command = match args.next().as_deref() {
            None | Some("list") => Command::List,
            Some("upload") => {
                let path = args.next().context("upload needs a file path")?;
                let media_type = match args.next().as_deref() {
                    None => None,
                    Some("--type") => Some(args.next().context("--type needs a value")?),
                    Some(other) => bail!("unexpected argument '{other}'"),
                };
                Command::Upload {
                    path: PathBuf::from(path),
                    media_type,
                }
            }
            Some("show") => {
                let raw = args.next().context("show needs a resume id")?;
                let id = raw
                    .parse()
                    .with_context(|| format!("resume id must be a number, got '{raw}'"))?;
                Command::Show(id)
            }
            Some(other) => bail!("unknown command '{other}'"),
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{extra}'");
        }
        Ok(command)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is the view
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    info!(api = %config.api_base_url, "Starting resume console v{}", env!("CARGO_PKG_VERSION"));

    let dashboard = Dashboard::from_config(&config)?;
    dashboard.mount().await;

    match command {
        Command::List => {
            if dashboard.errors.current().is_none() {
                print!("{}", HistoryTable(&dashboard.history.resumes()));
            }
        }
        Command::Upload { path, media_type } => {
            let candidate = CandidateFile::from_path(&path, media_type.as_deref())
                .await
                .with_context(|| format!("cannot open {}", path.display()))?;
            dashboard.upload.select(candidate)?;

            if let Some(rejection) = dashboard.upload.validation_error() {
                println!("{rejection}");
                return Ok(ExitCode::FAILURE);
            }
            if let Ok(detail) = dashboard.upload.submit().await {
                print!("{}", DetailText(&render_detail(&detail)));
            }
        }
        Command::Show(id) => {
            if let Ok(Settled::Applied(detail)) = dashboard.detail.fetch_detail(id).await {
                print!("{}", DetailText(&render_detail(&detail)));
            }
        }
    }

    match dashboard.errors.current() {
        Some(notice) => {
            eprintln!("Error: {}", notice.message);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
