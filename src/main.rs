use anyhow::{Context, Result};
use coup_resolver::{Action, Challenge, CounterAction, CounterKind, Game, GameConfig, Resolver, TracingSink};

// replays three rounds between two players, pass a JSON config path to change the table
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            GameConfig::from_json(&json)?
        }
        None => GameConfig::default(),
    };

    let mut game = Game::new(["Elder", "Highlander"], &config)?;
    let mut resolver = Resolver::with_sink(TracingSink);

    let elder = 0;
    let high = 1;

    resolver.declare(Action::steal(elder, high));
    resolver.declare(CounterAction::new(CounterKind::BlockSteal, high));
    resolver.declare(Challenge::new(elder, high));
    resolver.resolve_as_success(&mut game)?;

    println!("--------------------");

    resolver.declare(Action::tax(high));
    resolver.declare(Challenge::new(elder, high));
    resolver.resolve_as_failure(&mut game)?;

    println!("--------------------");

    resolver.declare(Action::assassinate(high, elder));
    resolver.declare(CounterAction::new(CounterKind::BlockAssassination, elder));
    resolver.declare(Challenge::new(high, elder));
    resolver.resolve_as_success(&mut game)?;

    println!("{:?}", game);

    if let Some(winner) = game.winner() {
        println!("game over, winner is {}", game.player(winner)?.name());
    }

    Ok(())
}
