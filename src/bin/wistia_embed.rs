//! wistia-embed: resolve embed options and render embeds from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use wistia_embed::config::Config;
use wistia_embed::{
    OptionsBuilder, RawOverrides, ServerContext, VideoCatalog, VideoField, VideoProvider,
    VideoRecord,
};

/// wistia-embed CLI
#[derive(Parser)]
#[command(name = "wistia-embed")]
#[command(version = wistia_embed::PKG_VERSION)]
#[command(about = "Schema-driven embed options and markup for hosted video")]
struct Args {
    /// Config file (default: ~/.wistia-embed/config.toml, then /etc/wistia-embed/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Treat the page as served over HTTPS
    #[arg(long, global = true)]
    secure: bool,

    /// Host of the page the embed is rendered into
    #[arg(long, global = true, default_value = "localhost")]
    host: String,

    /// Request path of the page, for resolving relative URLs
    #[arg(long, global = true, default_value = "/")]
    uri: String,

    /// Parameter schema file (overrides `schema_path` from the config)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve options offline and print them as JSON
    Options {
        /// Template parameters as key=value
        params: Vec<String>,
        /// Video name, used for the analytics label
        #[arg(long)]
        name: Option<String>,
    },

    /// Render the embed markup for a video
    Embed {
        video_id: String,
        /// Template parameters as key=value
        params: Vec<String>,
    },

    /// Print one field of a video (name, description, duration, ...)
    Field {
        video_id: String,
        modifier: String,
        /// Template parameters as key=value (e.g. striptags=yes)
        params: Vec<String>,
    },

    /// Print the thumbnail URL of a video
    Thumbnail {
        video_id: String,
        /// Template parameters as key=value (videoWidth, videoHeight)
        params: Vec<String>,
    },

    /// Print the asset URL of a video
    AssetUrl {
        video_id: String,
        /// Template parameters as key=value (format)
        params: Vec<String>,
    },

    /// List projects visible to the API key
    Projects,

    /// List the videos of the configured projects, grouped for a picker
    Videos {
        /// Project ids (default: `projects` from the config file)
        #[arg(short, long)]
        project: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if args.schema.is_some() {
        config.schema_path = args.schema;
    }
    let context = ServerContext::new(&args.host)
        .secure(args.secure)
        .request_uri(&args.uri);
    let schema = config.schema()?;

    match args.command {
        // Offline: no API key needed
        Command::Options { params, name } => {
            let overrides = RawOverrides::from_pairs(&params)?;
            let video = name.map(|n| VideoRecord::new(0, "", n));
            let options = OptionsBuilder::new(&schema)
                .context(context)
                .build(&overrides, video.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        command => {
            let provider = config.provider()?;
            let field = VideoField::new(Arc::clone(&provider))
                .schema(schema)
                .context(context);
            run_online(command, &config, provider, &field).await?;
        }
    }

    Ok(())
}

async fn run_online(
    command: Command,
    config: &Config,
    provider: Arc<dyn VideoProvider>,
    field: &VideoField<dyn VideoProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Embed { video_id, params } => {
            let overrides = RawOverrides::from_pairs(&params)?;
            println!("{}", field.embed(&video_id, &overrides).await?);
        }

        Command::Field {
            video_id,
            modifier,
            params,
        } => {
            let overrides = RawOverrides::from_pairs(&params)?;
            println!("{}", field.modifier(&video_id, &modifier, &overrides).await?);
        }

        Command::Thumbnail { video_id, params } => {
            let overrides = RawOverrides::from_pairs(&params)?;
            println!("{}", field.thumbnail(&video_id, &overrides).await?);
        }

        Command::AssetUrl { video_id, params } => {
            let overrides = RawOverrides::from_pairs(&params)?;
            println!("{}", field.asset_url(&video_id, &overrides).await?);
        }

        Command::Projects => {
            let projects = provider.list_projects().await?;
            if projects.is_empty() {
                println!("no projects available");
            }
            for project in projects {
                println!("{}\t{}", project.id, project.name);
            }
        }

        Command::Videos { project } => {
            let project_ids = if project.is_empty() {
                config.projects.clone()
            } else {
                project
            };
            if project_ids.is_empty() {
                return Err(
                    "no projects selected (pass --project or set `projects` in the config)".into(),
                );
            }
            let catalog = VideoCatalog::build(provider.as_ref(), &project_ids).await?;
            if catalog.is_empty() {
                println!("no videos in the selected projects");
            }
            for entry in catalog.picker_entries().into_iter().skip(1) {
                let group = entry.group.as_deref().unwrap_or("");
                println!("{group}\t{}\t{}", entry.value, entry.label);
            }
        }

        Command::Options { .. } => {
            return Err("`options` runs offline".into());
        }
    }

    Ok(())
}
