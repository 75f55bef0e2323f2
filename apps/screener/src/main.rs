use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::render::render;
use screener::validation::CandidateFile;
use screener::{Config, HttpTransport, Orchestrator, RequestState};

#[derive(Parser, Debug)]
#[command(name = "screener")]
#[command(version, about = "Screen a PDF résumé against a position with the analysis service")]
struct Cli {
    /// Analysis service origin (overrides API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a résumé and print the verdict
    Analyze(AnalyzeArgs),
    /// Check that the analysis service is up
    Health,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Position title
    #[arg(short, long)]
    title: String,

    /// Position description
    #[arg(short, long, default_value = "", conflicts_with = "description_file")]
    description: String,

    /// Read the position description from a file
    #[arg(long)]
    description_file: Option<PathBuf>,

    /// Résumé PDF
    #[arg(short, long)]
    file: PathBuf,

    /// Declared media type of the résumé (guessed from the path otherwise)
    #[arg(long)]
    media_type: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.api_base)?;

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let transport = HttpTransport::new(&config).context("Failed to build HTTP client")?;
    info!("Using analysis service at {}", config.api_base);

    match cli.command {
        Command::Analyze(args) => analyze(&transport, args).await,
        Command::Health => health(&transport).await,
    }
}

async fn analyze(transport: &HttpTransport, args: AnalyzeArgs) -> Result<()> {
    let description = match &args.description_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read description from {}", path.display()))?,
        None => args.description,
    };

    let candidate = CandidateFile::from_path(&args.file, args.media_type)
        .await
        .with_context(|| format!("Failed to read résumé {}", args.file.display()))?;

    let mut orchestrator = Orchestrator::new();
    let form = orchestrator.form_mut();
    form.set_title(args.title);
    form.set_description(description);
    form.select_file(Some(candidate))
        .with_context(|| format!("Cannot submit {}", args.file.display()))?;

    if !orchestrator.can_submit() {
        bail!("Position title is required");
    }

    match orchestrator.submit(transport).await {
        RequestState::Succeeded(result) => {
            let report = render(result);
            match args.format {
                OutputFormat::Text => print!("{report}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            Ok(())
        }
        RequestState::Failed(message) => bail!("Analysis failed: {message}"),
        other => bail!("Submission did not settle (state: {})", other.name()),
    }
}

async fn health(transport: &HttpTransport) -> Result<()> {
    let status = transport
        .health()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Health check failed")?;

    let model = status.model.as_deref().unwrap_or("unknown");
    if status.ok {
        println!("ok (model: {model})");
        Ok(())
    } else {
        bail!("Analysis service reports not ok (model: {model})")
    }
}
