use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use triple_triad::{
    load_cards_from_json, Agent, CardsDb, FirstAvailableAgent, Game, GameConfig, HumanAgent,
    LogDisplay, RandomAgent, Rules, SearchAgent, SearchLimits, TextDisplay,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentKind {
    Human,
    First,
    Random,
    Search,
}

#[derive(Debug, Parser)]
#[command(name = "play", about = "Play a Triple Triad game between computer agents")]
struct Args {
    /// JSON game configuration; command-line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rules toggles as comma-separated list: elemental,same,same_wall,plus,sudden_death (or 'none'/'all')
    #[arg(long)]
    rules: Option<String>,

    /// Seed for dealing, elements and turn order (deterministic)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    hand_size: Option<usize>,

    /// One agent per player, comma-separated
    #[arg(long, value_enum, value_delimiter = ',', default_value = "search,first")]
    agents: Vec<AgentKind>,

    /// Wall-clock budget per search decision in milliseconds
    #[arg(long)]
    search_ms: Option<u64>,

    /// Cap on sudden-death rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Cards JSON path (defaults to the built-in catalog)
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Print only the final result
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(r) = &args.rules {
        cfg.rules = Rules::parse(r).map_err(|e| format!("Rules parse error: {e}"))?;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(n) = args.hand_size {
        cfg.hand_size = n;
    }
    if args.max_rounds.is_some() {
        cfg.max_rounds = args.max_rounds;
    }
    cfg.players = args.agents.len();
    cfg.validate()?;
    Ok(cfg)
}

fn build_agents(args: &Args, seed: u64) -> Vec<Box<dyn Agent>> {
    let limits = SearchLimits {
        time_ms: args.search_ms,
        ..SearchLimits::default()
    };
    args.agents
        .iter()
        .enumerate()
        .map(|(i, kind)| -> Box<dyn Agent> {
            match kind {
                AgentKind::Human => Box::new(HumanAgent::new(std::io::stdin().lock(), std::io::stdout())),
                AgentKind::First => Box::new(FirstAvailableAgent),
                AgentKind::Random => Box::new(RandomAgent::new(seed.wrapping_add(i as u64))),
                AgentKind::Search => Box::new(SearchAgent::with_limits(i, limits)),
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = build_config(&args)?;
    let seed = cfg.seed.unwrap_or_else(triple_triad::rng::fresh_seed);
    cfg.seed = Some(seed);

    let catalog = match &args.cards {
        Some(path) => load_cards_from_json(path).map_err(|e| format!("Cards load error: {e}"))?,
        None => CardsDb::builtin()?,
    };

    let agents = build_agents(&args, seed);
    let game = Game::new(&cfg, &catalog, agents)?;
    let mut game = if args.quiet {
        game.with_display(Box::new(LogDisplay))
    } else {
        game.with_display(Box::new(TextDisplay::new(std::io::stdout())))
    };

    let outcome = game.run()?;
    let scores: Vec<String> = outcome.scores.iter().map(i32::to_string).collect();
    match outcome.winner {
        Some(w) => println!(
            "[play] seed={seed} rules={} rounds={} scores={} winner=Player {}",
            cfg.rules,
            outcome.rounds,
            scores.join("-"),
            w + 1
        ),
        None => println!(
            "[play] seed={seed} rules={} rounds={} scores={} draw",
            cfg.rules,
            outcome.rounds,
            scores.join("-")
        ),
    }
    Ok(())
}
