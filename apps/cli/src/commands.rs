//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing::info;

use warmpath_collector::{CollectOptions, Collector, PersonNormalizer, SnapshotSource};
use warmpath_extract::{infer_degree, parse_card_text};
use warmpath_ranking::build_paths;
use warmpath_shared::{
    AppConfig, CallSite, ConnectionDegree, PersonRecord, UrlKind, WarmIntroTargetContext,
    init_config, load_config, load_config_from,
};
use warmpath_urls::{PeopleSearchQuery, assert_same_site, canonicalize, people_search_url};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// warmpath: canonical people records and ranked warm-intro paths.
#[derive(Parser)]
#[command(
    name = "warmpath",
    version,
    about = "Extract canonical people records from network pages and rank warm-intro paths.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file to use instead of ~/.warmpath/warmpath.toml.
    #[arg(long, global = true, env = "WARMPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Identifier kinds accepted by `canonicalize`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum KindArg {
    Profile,
    Post,
    Company,
    Link,
}

impl From<KindArg> for UrlKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Profile => UrlKind::Profile,
            KindArg::Post => UrlKind::Post,
            KindArg::Company => UrlKind::Company,
            KindArg::Link => UrlKind::Generic,
        }
    }
}

/// Call sites whose stability threshold a replay should use.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum CallSiteArg {
    Search,
    Connections,
    Mutuals,
    Engagement,
}

impl From<CallSiteArg> for CallSite {
    fn from(site: CallSiteArg) -> Self {
        match site {
            CallSiteArg::Search => CallSite::Search,
            CallSiteArg::Connections => CallSite::Connections,
            CallSiteArg::Mutuals => CallSite::Mutuals,
            CallSiteArg::Engagement => CallSite::Engagement,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the canonical URL for a profile, post, company, or link.
    Canonicalize {
        /// Identifier kind.
        kind: KindArg,

        /// Vanity name, slug, activity id, urn, or URL.
        value: String,
    },

    /// Check that a URL is on the configured site before navigating to it.
    CheckUrl {
        /// URL to check.
        url: String,
    },

    /// Build a people-search URL.
    SearchUrl {
        /// Search keywords (repeatable; joined with spaces).
        #[arg(short, long, required = true, num_args = 1..)]
        keywords: Vec<String>,

        /// Location appended to the keywords.
        #[arg(short, long)]
        location: Option<String>,

        /// Degree filters, e.g. `--network 1,2`.
        #[arg(short, long, value_delimiter = ',')]
        network: Vec<u8>,

        /// Result page.
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Parse one card's text into name, headline, location, and degree.
    ParseCard {
        /// File holding the card text (reads stdin if omitted).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Replay saved results pages through the collector, one page per round.
    Replay {
        /// HTML snapshots, in round order.
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Stop once this many distinct people are collected.
        #[arg(long, default_value = "100")]
        limit: usize,

        /// Call site whose stability threshold applies.
        #[arg(long, default_value = "connections")]
        call_site: CallSiteArg,
    },

    /// Rank warm-intro paths from a JSON file `{ source, target, mutuals }`.
    Rank {
        /// Input file, or `-` for stdin.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

/// Input document for `rank`.
#[derive(Debug, Deserialize)]
struct RankInput {
    /// Profile URL of the person asking for the intro.
    source: String,
    target: WarmIntroTargetContext,
    mutuals: Vec<PersonRecord>,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is for results.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "warmpath=info",
        1 => "warmpath=debug",
        _ => "warmpath=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        };
    }

    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Canonicalize { kind, value } => cmd_canonicalize(&config, kind, &value),
        Command::CheckUrl { url } => cmd_check_url(&config, &url),
        Command::SearchUrl {
            keywords,
            location,
            network,
            page,
        } => cmd_search_url(&config, keywords, location, &network, page),
        Command::ParseCard { file } => cmd_parse_card(file.as_deref()).await,
        Command::Replay {
            pages,
            limit,
            call_site,
        } => cmd_replay(&config, pages, limit, call_site.into()).await,
        Command::Rank { input } => cmd_rank(&input).await,
        Command::Config { .. } => Ok(()),
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_canonicalize(config: &AppConfig, kind: KindArg, value: &str) -> Result<()> {
    let canonical = canonicalize(&config.site, kind.into(), value)?;
    if canonical.is_empty() {
        return Err(eyre!("{value:?} does not resolve to a same-site URL"));
    }
    println!("{canonical}");
    Ok(())
}

fn cmd_check_url(config: &AppConfig, url: &str) -> Result<()> {
    let url = assert_same_site(&config.site, url)?;
    println!("{url}");
    Ok(())
}

fn cmd_search_url(
    config: &AppConfig,
    keywords: Vec<String>,
    location: Option<String>,
    network: &[u8],
    page: Option<u32>,
) -> Result<()> {
    let network = network
        .iter()
        .map(|n| match ConnectionDegree::from_ordinal(*n) {
            ConnectionDegree::Unknown => Err(eyre!("network filter must be 1, 2 or 3, got {n}")),
            degree => Ok(degree),
        })
        .collect::<Result<Vec<_>>>()?;

    let query = PeopleSearchQuery {
        keywords: keywords.join(" "),
        location,
        network,
        page,
    };
    let url = people_search_url(&config.site, &query)?;
    println!("{url}");
    Ok(())
}

async fn cmd_parse_card(file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => read_stdin().await?,
    };

    let card = parse_card_text(&raw);
    let output = serde_json::json!({
        "name": card.name,
        "headline": card.headline,
        "location": card.location,
        "connectionDegree": infer_degree(&raw),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_replay(
    config: &AppConfig,
    pages: Vec<PathBuf>,
    limit: usize,
    call_site: CallSite,
) -> Result<()> {
    let options = CollectOptions::for_call_site(&config.collection, call_site, limit);
    let mut source = SnapshotSource::from_files(pages);
    info!(
        snapshots = source.len(),
        ?call_site,
        stable_rounds = options.stable_rounds,
        "replaying snapshots"
    );

    let collector = Collector::new(PersonNormalizer::new(config.site.clone()), options);
    let collection = collector.collect(&mut source).await;

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

async fn cmd_rank(input: &Path) -> Result<()> {
    let raw = if input == Path::new("-") {
        read_stdin().await?
    } else {
        tokio::fs::read_to_string(input)
            .await
            .wrap_err_with(|| format!("failed to read {}", input.display()))?
    };

    let request = parse_rank_input(&raw)?;
    let paths = build_paths(&request.source, &request.target, &request.mutuals);
    info!(
        target = %request.target.profile_url,
        mutuals = request.mutuals.len(),
        "ranked warm-intro paths"
    );
    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(())
}

fn parse_rank_input(raw: &str) -> Result<RankInput> {
    serde_json::from_str(raw).wrap_err("rank input must be JSON { source, target, mutuals }")
}

async fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .wrap_err("failed to read stdin")?;
    Ok(buf)
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
