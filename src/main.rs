// setup-ds: CI setup step that installs the ds CLI into the running job,
// optionally writes its config file, and optionally installs plugins.
//
// Inputs arrive either as flags or as the INPUT_* environment variables a
// runner sets for a step. The whole sequence runs exactly once; the first
// fatal error becomes a single message and a non-zero exit. Failed plugin
// installs are warnings and never fail the run.

mod config_file;
mod errors;
mod github;
mod installer;
mod logger;
mod outputs;
mod platform;
mod plugins;
mod runner;
mod schema;
mod tool_cache;
mod utils;
mod version;

use clap::Parser;
use colored::Colorize;
use github::{GitHubReleases, HttpFetcher};
use runner::ProcessRunner;
use std::env;
use tool_cache::ToolCache;

#[derive(Parser)]
#[command(name = "setup-ds")]
#[command(about = "Install the ds CLI, write its config, install plugins", long_about = None)]
struct Cli {
    /// Version tag to install, or 'latest' for the newest release.
    #[arg(long, env = "INPUT_VERSION", default_value = "latest")]
    version: String,

    /// Comma-separated plugin names to install after ds itself.
    #[arg(long, env = "INPUT_PLUGINS", default_value = "")]
    plugins: String,

    /// Plugin registry override, passed to every `ds plugin install`.
    #[arg(long, env = "INPUT_REGISTRY", default_value = "")]
    registry: String,

    /// API token for the release index; falls back to GITHUB_TOKEN.
    #[arg(long, env = "INPUT_TOKEN")]
    token: Option<String>,

    /// Literal config file content, treated as sensitive.
    #[arg(long, env = "INPUT_CONFIG", default_value = "", hide_env_values = true)]
    config: String,

    /// Where to write the config file; supports '~'.
    #[arg(long = "config-path", env = "INPUT_CONFIG_PATH", default_value = "")]
    config_path: String,

    /// Turn debugging information on.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug || env::var("RUNNER_DEBUG").as_deref() == Ok("1");
    logger::init(debug);

    if let Err(err) = run(cli) {
        log_error!("setup-ds failed: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // The config content may carry credentials; register it with the log
    // masker before anything else can echo it.
    if !cli.config.trim().is_empty() {
        outputs::mask(&cli.config);
    }

    let token = cli
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| env::var("GITHUB_TOKEN").ok());

    let index = GitHubReleases::new(token.clone());
    let resolved_version = version::resolve(&cli.version, &index)?;

    let cache = ToolCache::from_env();
    let fetcher = HttpFetcher::new(token);
    let result = installer::install(&resolved_version, &cache, &fetcher)?;

    outputs::set_output("version", &result.resolved_version)?;
    outputs::set_output("path", &result.install_path.display().to_string())?;
    outputs::set_output("cache-hit", if result.cache_hit { "true" } else { "false" })?;
    outputs::add_path(&result.install_path)?;

    // Config: write when content was given; with only a path override,
    // resolve and report where a config would go without writing anything.
    let config_path_output = if !cli.config.trim().is_empty() {
        let target = config_file::resolve_target(Some(&cli.config_path))?;
        config_file::write(&target, &cli.config)?;
        target.resolved_path.display().to_string()
    } else if !cli.config_path.trim().is_empty() {
        let target = config_file::resolve_target(Some(&cli.config_path))?;
        log_info!(
            "[Config] No content supplied; config would go to {}",
            target.resolved_path.display().to_string().cyan()
        );
        target.resolved_path.display().to_string()
    } else {
        String::new()
    };
    outputs::set_output("config-path", &config_path_output)?;

    let process_runner = ProcessRunner;
    installer::self_check(&result, &process_runner)?;

    plugins::install_all(
        &cli.plugins,
        &result
            .install_path
            .join(&platform::current()?.binary_name),
        &cli.registry,
        &process_runner,
    );

    log_info!(
        "setup-ds finished: ds {} ready at {}",
        result.resolved_version.bold(),
        result.install_path.display().to_string().green()
    );
    Ok(())
}
