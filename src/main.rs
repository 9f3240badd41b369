use clap::{Args, Parser, Subcommand};
use starkvideo::{
    config::Config,
    models::{
        generation::{example_prompt, VideoStyle, EXAMPLE_PROMPTS},
        preferences::Theme,
    },
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "starkvideo", about = "Generate short videos from a text prompt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a generation request
    Generate(GenerateArgs),
    /// Show recent generation attempts
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// List the built-in example prompts
    Examples,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Video description
    #[arg(long, conflicts_with = "example")]
    prompt: Option<String>,
    /// Use a built-in example prompt (see `examples`)
    #[arg(long)]
    example: Option<usize>,
    /// realistic, anime, cinematic, 3d-animation, artistic or cartoon
    #[arg(long)]
    style: Option<String>,
    /// Length in seconds
    #[arg(long)]
    length: Option<u32>,
    /// Aspect ratio, e.g. 16:9
    #[arg(long)]
    ratio: Option<String>,
}

#[derive(Debug, Subcommand)]
enum PrefsAction {
    Show,
    Set {
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        length: Option<u32>,
        #[arg(long)]
        ratio: Option<String>,
        /// light or dark
        #[arg(long)]
        theme: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,starkvideo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    tracing::debug!(
        "Loaded configuration - Endpoint: {}, data dir: {}",
        config.generation.endpoint_url,
        config.storage.data_dir.display()
    );

    let state = AppState::new(config)?;

    match cli.command {
        Command::Generate(args) => generate(&state, args).await,
        Command::History { limit } => history(&state, limit).await,
        Command::Prefs { action } => prefs(&state, action).await,
        Command::Examples => {
            for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
                println!("{}. {}", i + 1, prompt);
            }
            Ok(())
        }
    }
}

async fn generate(state: &AppState, args: GenerateArgs) -> anyhow::Result<()> {
    let prompt = match (args.prompt, args.example) {
        (Some(prompt), _) => prompt,
        (None, Some(index)) => example_prompt(index)
            .ok_or_else(|| {
                anyhow::anyhow!("No example #{}, pick 1-{}", index, EXAMPLE_PROMPTS.len())
            })?
            .to_string(),
        (None, None) => String::new(),
    };

    let preferences = state.controller.preferences().await;
    let request = preferences.request_for(
        prompt,
        args.style.as_deref().map(|s| VideoStyle::from_tag_or_default(Some(s))),
        args.length,
        args.ratio,
    );

    let job = state.controller.submit(request).await?;
    tracing::debug!(job_id = %job.job_id, status = ?job.status, "Submission finished");
    Ok(())
}

async fn history(state: &AppState, limit: usize) -> anyhow::Result<()> {
    let entries = state.controller.history().await?;
    if entries.is_empty() {
        println!("No videos generated yet");
        return Ok(());
    }

    for entry in entries.iter().take(limit) {
        let job = entry.job_id.as_deref().unwrap_or("-");
        println!(
            "{}  {:<12} {:>3}s  {:<10} {}",
            entry.timestamp.date(),
            entry.style.display_name(),
            entry.length_seconds,
            job,
            entry.prompt
        );
    }
    println!("{} of {} entries", entries.len().min(limit), entries.len());
    Ok(())
}

async fn prefs(state: &AppState, action: PrefsAction) -> anyhow::Result<()> {
    let mut preferences = state.controller.preferences().await;

    if let PrefsAction::Set {
        style,
        length,
        ratio,
        theme,
    } = action
    {
        if let Some(style) = style {
            let parsed = VideoStyle::from_tag(&style)
                .ok_or_else(|| anyhow::anyhow!("Unknown style: {}", style))?;
            preferences.video_style = Some(parsed);
        }
        if let Some(length) = length {
            anyhow::ensure!(length > 0, "Length must be at least one second");
            preferences.video_length = Some(length);
        }
        if let Some(ratio) = ratio {
            preferences.aspect_ratio = Some(ratio);
        }
        if let Some(theme) = theme {
            preferences.theme =
                Theme::from_str(&theme).ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", theme))?;
        }
        state.controller.save_preferences(&preferences).await?;
        println!("Preferences saved");
    }

    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}
