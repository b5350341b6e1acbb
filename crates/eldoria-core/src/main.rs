//! Eldoria command line runner
//!
//! Seeds a world, runs it for a number of ticks and reports what happened.

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use eldoria_core::{EventLogger, SimConfig, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "eldoria")]
#[command(about = "Treasure hunters and knights on a wrap-around grid")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Random seed for reproducibility (entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Tick limit; 0 runs until no treasure or no active hunter is left
    #[arg(long, default_value_t = 100)]
    max_steps: u64,

    /// Tuning file (defaults to tuning.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the grid after every tick
    #[arg(long)]
    show_grid: bool,

    /// Write every event to this JSONL file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Print final statistics as JSON
    #[arg(long)]
    json: bool,

    /// Wait for Enter before every tick; `q` or end of input stops the run
    #[arg(long)]
    interactive: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(),
    };

    println!("Eldoria Treasure Hunt");
    println!("=====================");
    println!("Grid: {}x{}", args.width, args.height);
    match args.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: (entropy)"),
    }
    println!();

    let mut sim = Simulation::from_config(args.width, args.height, config, args.seed)?;
    let initial = sim.initial_population();
    println!(
        "Seeded {} hideouts, {} hunters, {} treasures, {} knights",
        initial.hideouts, initial.hunters, initial.treasures, initial.knights
    );
    println!();
    print!("{}", sim.display());
    println!();

    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    while sim.is_running() && (args.max_steps == 0 || sim.steps() < args.max_steps) {
        if args.interactive && !wait_for_step(&mut input, &mut std::io::stdout())? {
            println!("Stopped at step {}", sim.steps());
            break;
        }
        sim.step();
        logger.log_batch(sim.tick_events())?;

        let stats = sim.stats();
        println!(
            "Step {:>4}: hunters {} ({} active), knights {}, treasures {}, collected {}",
            stats.steps,
            stats.hunters,
            stats.active_hunters,
            stats.knights,
            stats.treasures,
            stats.collected_treasures
        );
        if args.show_grid {
            print!("{}", sim.display());
            println!();
        }
    }
    logger.flush()?;

    let stats = sim.stats();
    println!();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Simulation finished after {} steps", stats.steps);
        println!("  Hunters:             {} ({} active)", stats.hunters, stats.active_hunters);
        println!("  Knights:             {}", stats.knights);
        println!("  Hideouts:            {}", stats.hideouts);
        println!("  Treasures on grid:   {}", stats.treasures);
        println!("  Treasures collected: {}", stats.collected_treasures);
        if args.events.is_some() {
            println!("  Events logged:       {}", logger.event_count());
        }
    }
    Ok(())
}

/// Prompt for the next tick. Returns false when the user quits or input ends.
fn wait_for_step(input: &mut impl BufRead, prompt: &mut impl Write) -> std::io::Result<bool> {
    write!(prompt, "[Enter] next step, [q] quit: ")?;
    prompt.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(!line.trim().eq_ignore_ascii_case("q"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_enter_advances_and_q_quits() {
        let mut input = Cursor::new("\n\nq\n");
        let mut prompt = Vec::new();

        assert!(wait_for_step(&mut input, &mut prompt).unwrap());
        assert!(wait_for_step(&mut input, &mut prompt).unwrap());
        assert!(!wait_for_step(&mut input, &mut prompt).unwrap());
        assert!(String::from_utf8(prompt).unwrap().starts_with("[Enter] next step"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut input = Cursor::new("");
        assert!(!wait_for_step(&mut input, &mut std::io::sink()).unwrap());
    }

    #[test]
    fn test_interactive_flag_parses() {
        let args = Args::parse_from(["eldoria", "--interactive", "--seed", "3", "--max-steps", "0"]);
        assert!(args.interactive);
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.max_steps, 0);
        assert!(!Args::parse_from(["eldoria"]).interactive);
    }
}
