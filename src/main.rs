//! LegalEase CLI
//!
//! Terminal front end for the analysis service:
//! - Analyze a file, pasted text or URL
//! - Show the dashboard for the last analysis
//! - Ask follow-up questions about it

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use legalease::config::{generate_default_config, Config, LoggingConfig};
use legalease::orchestrator::{initialize, Page, PageController, Surface};
use legalease::render::{html_document, transcript_view, DashboardState, TextOptions, View};
use legalease::session::{FileSessionStore, SessionStore};
use legalease::transport::{AnalysisBackend, HttpBackend, HttpBackendConfig};
use legalease::{AnalysisRequest, ChatLoop, Error, ValidationError};

#[derive(Parser)]
#[command(name = "legalease")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plain-English analysis of legal documents")]
#[command(long_about = "LegalEase sends a contract, lease or terms page to an analysis service.\nIt shows a summary, risk flags and key clauses, and answers questions about the document.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./legalease.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis service URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Directory holding the last analysis
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document and show its dashboard
    Analyze {
        #[command(flatten)]
        source: Source,
    },

    /// Show the dashboard for the last analysis
    Dashboard {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Print the body of every key clause
        #[arg(long)]
        expand: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask questions about the last analyzed document
    Ask {
        /// Questions, sent together
        #[arg(required = true)]
        questions: Vec<String>,
    },

    /// Interactive question loop
    Chat,

    /// Forget the last analysis
    Clear,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where the document comes from
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Upload a file (PDF or plain text)
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Paste text (at least 100 characters)
    #[arg(long)]
    pub text: Option<String>,
    /// Paste text read from a file
    #[arg(long)]
    pub text_file: Option<PathBuf>,
    /// Analyze the page at a URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Surface backed by stdout/stderr
#[derive(Default)]
struct TerminalSurface {
    options: TextOptions,
    navigation: Option<Page>,
}

impl Surface for TerminalSurface {
    fn show(&mut self, view: &View) {
        println!("{}\n", view.to_text(self.options));
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {}", message);
    }

    fn navigate(&mut self, page: Page) {
        tracing::debug!(href = page.href(), "Navigating");
        self.navigation = Some(page);
    }

    fn reload(&mut self) {
        tracing::debug!("Reloading page");
        self.navigation = None;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }
    if let Some(dir) = &cli.session_dir {
        config.session.dir = dir.to_string_lossy().to_string();
    }

    init_tracing(&config.logging);

    tracing::debug!(
        backend = %config.backend.base_url,
        session_dir = %config.session.dir,
        "LegalEase v{}",
        env!("CARGO_PKG_VERSION")
    );

    let backend: Arc<dyn AnalysisBackend> =
        Arc::new(HttpBackend::new(HttpBackendConfig::from(config.backend.clone()))?);
    let session_dir = PathBuf::from(&config.session.dir);

    match cli.command {
        Commands::Analyze { source } => {
            let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&session_dir));
            let PageController::Landing(entry) = initialize(Page::Landing, backend.clone(), store)
            else {
                anyhow::bail!("landing page did not yield an entry controller");
            };

            let mut surface = TerminalSurface::default();
            let submitted = match source {
                Source { file: Some(path), .. } => {
                    let request = AnalysisRequest::from_path(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    entry.submit(request, &mut surface).await
                }
                Source { text: Some(text), .. } => entry.submit_text(&text, &mut surface).await,
                Source { text_file: Some(path), .. } => {
                    let text = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    entry.submit_text(&text, &mut surface).await
                }
                Source { url: Some(url), .. } => entry.submit_url(&url, &mut surface).await,
                _ => anyhow::bail!("one of --file, --text, --text-file or --url is required"),
            };

            if let Err(e) = submitted {
                // the alert has already been shown
                tracing::debug!(error = %e, "Submission did not complete");
                std::process::exit(1);
            }

            if surface.navigation == Some(Page::Dashboard) {
                // A fresh store, as a newly loaded page would have
                let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&session_dir));
                if let PageController::Dashboard(dashboard) =
                    initialize(Page::Dashboard, backend, store)
                {
                    let state = dashboard.initialize(&mut DashboardPrinter)?;
                    println!("{}", state.view().to_text(TextOptions::default()));
                }
            }
        }

        Commands::Dashboard {
            format,
            expand,
            output,
        } => {
            let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&session_dir));
            let PageController::Dashboard(dashboard) =
                initialize(Page::Dashboard, backend, store)
            else {
                anyhow::bail!("dashboard page did not yield a dashboard controller");
            };

            let state = dashboard.initialize(&mut DashboardPrinter)?;

            let title = match dashboard.session() {
                Ok(session) => format!("LegalEase - {}", session.document_name),
                Err(_) => "LegalEase".to_string(),
            };
            let view = state.view();
            let rendered = match format {
                OutputFormat::Text => view.to_text(TextOptions { expand }),
                OutputFormat::Html => html_document(&title, &view),
            };

            write_output(output, &rendered)?;

            if matches!(state, DashboardState::ErrorMissingData(_)) {
                std::process::exit(1);
            }
        }

        Commands::Ask { questions } => {
            let store = FileSessionStore::new(&session_dir);
            let chat = chat_or_exit(backend, &store);

            if questions.iter().all(|q| q.trim().is_empty()) {
                return Err(Error::Validation(ValidationError::EmptyQuestion).into());
            }

            // Every question is in flight at once
            let results =
                futures_util::future::join_all(questions.iter().map(|q| chat.ask(q))).await;

            println!("{}", transcript_view(&chat.turns().await).to_text(TextOptions::default()));

            let mut failed = 0;
            for (question, result) in questions.iter().zip(results) {
                if let Err(e) = result {
                    failed += 1;
                    eprintln!("! No answer for \"{}\": {}", question.trim(), e);
                }
            }
            if failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Chat => {
            let store = FileSessionStore::new(&session_dir);
            let chat = chat_or_exit(backend, &store);

            println!("Ask a question about your document. Ctrl-D to quit.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                print!("> ");
                std::io::stdout().flush()?;

                let Some(line) = lines.next_line().await? else {
                    break;
                };

                match chat.ask(&line).await {
                    Ok(Some(answer)) => println!("Assistant: {}\n", answer),
                    Ok(None) => {}
                    Err(e) => eprintln!("! No answer: {}\n", e),
                }
            }
            println!();
        }

        Commands::Clear => {
            let store = FileSessionStore::new(&session_dir);
            store.clear()?;
            println!("Session cleared");
        }

        Commands::Config { output } => {
            write_output(output, &generate_default_config())?;
        }
    }

    Ok(())
}

/// Surface for the dashboard page; the caller prints the final state
#[derive(Default)]
struct DashboardPrinter;

impl Surface for DashboardPrinter {
    fn show(&mut self, _view: &View) {}

    fn alert(&mut self, message: &str) {
        eprintln!("! {}", message);
    }

    fn navigate(&mut self, _page: Page) {}

    fn reload(&mut self) {}
}

fn chat_or_exit(backend: Arc<dyn AnalysisBackend>, store: &FileSessionStore) -> ChatLoop {
    match ChatLoop::from_session(backend, store) {
        Ok(chat) => chat,
        Err(e) => {
            eprintln!("{}. Run `legalease analyze` first.", e);
            std::process::exit(1);
        }
    }
}

fn write_output(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("legalease={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
