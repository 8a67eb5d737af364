//! Tilth launcher.
//!
//! Builds an environment from flags or a JSON config, resolves an agent
//! by name, runs one episode and prints ASCII frames followed by a JSON
//! summary.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tilth::agents::AgentRegistry;
use tilth::driver::run_episode;
use tilth::engine::{Environment, EnvironmentConfig};
use tilth::render::render_frame;
use tilth::space::Layout;
use tilth::types::GrowthThresholds;

#[derive(Parser, Debug)]
#[command(name = "tilth-run")]
#[command(version)]
#[command(about = "Run a Tilth planting episode with a named agent")]
struct Cli {
    /// Field width [default: 8] (ignored with --layout)
    #[arg(long)]
    width: Option<u32>,

    /// Field height [default: 6] (ignored with --layout)
    #[arg(long)]
    height: Option<u32>,

    /// Turn limit; 0 removes the limit and then requires --budget
    #[arg(long)]
    turns: Option<u64>,

    /// Stop after this many steps even without a turn limit
    #[arg(long)]
    budget: Option<u64>,

    /// Turns a tile stays Seed before Growing
    #[arg(long)]
    seed_turns: Option<u32>,

    /// Turns a tile stays Growing before Ready
    #[arg(long)]
    growing_turns: Option<u32>,

    /// End the episode once every farmable tile is Ready
    #[arg(long)]
    stop_when_grown: bool,

    /// Agent name from the registry
    #[arg(long, default_value = "reachability")]
    agent: String,

    /// Seed passed to the agent factory
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON environment config; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// ASCII map (`.` soil, `#`/`T` obstacle, `B` base, `S` start)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Suppress per-turn frames
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<EnvironmentConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EnvironmentConfig::planting(cli.width.unwrap_or(8), cli.height.unwrap_or(6)),
    };
    if cli.config.is_some() {
        if let Some(width) = cli.width {
            config.width = width;
        }
        if let Some(height) = cli.height {
            config.height = height;
        }
    }

    if let Some(path) = &cli.layout {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        let layout = Layout::from_ascii(&text);
        let (width, height) = layout
            .dimensions()
            .context("layout file has no dimensions")?;
        config.width = width;
        config.height = height;
        config.layout = layout;
        config.base = None;
        config.start = None;
    }

    if let Some(turns) = cli.turns {
        config.max_turns = (turns > 0).then_some(turns);
    }
    if cli.seed_turns.is_some() || cli.growing_turns.is_some() {
        config.thresholds = GrowthThresholds::new(
            cli.seed_turns
                .unwrap_or(config.thresholds.seed_to_growing_turns),
            cli.growing_turns
                .unwrap_or(config.thresholds.growing_to_ready_turns),
        );
    }
    config.stop_when_fully_grown |= cli.stop_when_grown;

    if config.max_turns.is_none() && cli.budget.is_none() {
        bail!("no turn limit: pass --turns N with N > 0, or --budget N");
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let registry = AgentRegistry::with_builtins();
    let mut agent = registry.create(&cli.agent, cli.seed)?;
    let mut env = Environment::new(config).context("invalid environment config")?;
    info!(agent = %cli.agent, width = env.field().width(), height = env.field().height(), "starting episode");

    if !cli.quiet {
        println!("{}", render_frame(&env));
    }
    let report = run_episode(&mut env, agent.as_mut(), cli.budget, |env, _| {
        if !cli.quiet {
            println!("{}", render_frame(env));
        }
    })?;

    println!("{}", serde_json::to_string_pretty(&report.summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilth-run").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_planting_layout() {
        let config = build_config(&cli(&[])).unwrap();
        assert_eq!(config, EnvironmentConfig::planting(8, 6));
    }

    #[test]
    fn unlimited_turns_need_a_budget() {
        let err = build_config(&cli(&["--turns", "0", "--stop-when-grown"])).unwrap_err();
        assert!(err.to_string().contains("--budget"));

        let config = build_config(&cli(&["--turns", "0", "--budget", "40"])).unwrap();
        assert_eq!(config.max_turns, None);
    }

    #[test]
    fn size_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("tilth-run-{}.json", std::process::id()));
        fs::write(&path, r#"{ "width": 5, "height": 4, "layout": { "kind": "open" } }"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let config = build_config(&cli(&["--config", &path_arg, "--width", "9"])).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!((config.width, config.height), (9, 4));
        assert_eq!(config.layout, Layout::Open);
    }
}
