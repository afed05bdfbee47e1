use clap::{Args, Parser, Subcommand};
use gol_sim::{presets, Engine, Grid, LifecycleState, StopReason};
use num_format::{Locale, ToFormattedString};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run a preset or a random soup until it stabilizes, cycles or hits the generation limit
    Run(RunArgs),
    /// List the available presets
    List,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Name of the preset to load; see the `list` subcommand for the catalog
    #[arg(short, long, conflicts_with = "random")]
    preset: Option<String>,

    /// Fill the grid with a random soup instead of a preset
    #[arg(short, long)]
    random: bool,

    /// Live-cell density of the random soup, in [0, 1]
    #[arg(long, default_value_t = 0.35)]
    density: f64,

    /// Seed for the random soup; seeds from the OS if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Grid width
    #[arg(long, default_value_t = 48)]
    width: usize,

    /// Grid height
    #[arg(long, default_value_t = 32)]
    height: usize,

    /// Milliseconds between generations
    #[arg(short, long, default_value_t = 20)]
    interval_ms: u64,

    /// Stop after this many generations even without a terminal condition
    #[arg(short, long, default_value_t = 10_000)]
    gens: usize,
}

async fn run(args: RunArgs) {
    let mut engine = Engine::headless(args.width, args.height);

    if args.random {
        let soup = Grid::random(args.width, args.height, args.density, args.seed);
        for (row, col) in soup.live_cells() {
            engine.toggle_cell(row, col);
        }
    } else if let Some(name) = &args.preset {
        if let Err(err) = engine.load_preset(name) {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    } else {
        eprintln!("Either --preset or --random is required");
        std::process::exit(1);
    }

    println!(
        "Starting with {} live cells on a {}x{} torus",
        engine.grid().population().to_formatted_string(&Locale::en),
        args.width,
        args.height
    );

    engine.start();
    let timer = std::time::Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms));
    let mut gens = 0;
    while engine.state() == LifecycleState::Started && gens < args.gens {
        ticker.tick().await;
        if engine.tick().is_some() {
            gens += 1;
        }
    }
    engine.stop();

    println!(
        "Simulated {} generations in {:.1} secs",
        gens.to_formatted_string(&Locale::en),
        timer.elapsed().as_secs_f64()
    );
    match engine.stop_reason() {
        Some(StopReason::Stable) => println!("Terminal condition: stable population"),
        Some(StopReason::Cycle { period }) => {
            println!("Terminal condition: cycle of period {}", period)
        }
        None => println!("Generation limit reached"),
    }
    println!(
        "Final population: {}",
        engine.grid().population().to_formatted_string(&Locale::en)
    );
}

#[tokio::main]
async fn main() {
    let args = CLIParser::parse();

    match args.action {
        Action::Run(run_args) => run(run_args).await,
        Action::List => {
            for name in presets::names() {
                println!("{}", name);
            }
        }
    }
}
