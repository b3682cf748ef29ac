use alife::{
    random::{default_rng, rng_from_seed},
    serde_traits::Serialize as _,
    Population, Rules, Simulation, TickStats, Variant,
};
use clap::Parser;
use core::error::Error;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "alife", version, about = "Cooperators, defectors and partial cooperators sharing energy")]
struct Cli {
    /// Number of ticks to simulate
    #[arg(allow_negative_numbers = true)]
    ticks: i64,

    /// Initial number of cooperators
    #[arg(allow_negative_numbers = true)]
    cooperators: i64,

    /// Initial number of defectors
    #[arg(allow_negative_numbers = true)]
    defectors: i64,

    /// Initial number of partial cooperators
    #[arg(allow_negative_numbers = true)]
    partials: i64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the default rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn validate(cli: &Cli) -> Result<(usize, [(Variant, usize); 3]), String> {
    if cli.ticks < 1 || cli.cooperators < 0 || cli.defectors < 0 || cli.partials < 0 {
        return Err("Number of iterations must be 1 or greater.\n\
                    Number of Cooperators, Defectors, and Partial Cooperators must be 0 or greater."
            .into());
    }

    let as_usize = |n: i64| usize::try_from(n).map_err(|e| e.to_string());
    let composition = [
        (Variant::Cooperator, as_usize(cli.cooperators)?),
        (Variant::Defector, as_usize(cli.defectors)?),
        (Variant::PartialCooperator, as_usize(cli.partials)?),
    ];
    if composition.iter().all(|(_, n)| *n == 0) {
        return Err("Simulation must have at least one organism.".into());
    }

    Ok((as_usize(cli.ticks)?, composition))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let (ticks, composition) = validate(&cli)?;
    let rules = match &cli.rules {
        Some(path) => Rules::load(path)?,
        None => Rules::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => rng_from_seed(seed),
        None => default_rng(),
    };

    let population = Population::with_rules(composition, rules, &mut rng)?;

    info!(ticks, size = population.len(), seed = ?cli.seed, "starting simulation");
    let mut simulation = Simulation::new(population);
    let summary = simulation.run_with(ticks, &mut rng, |stats: &TickStats| {
        if stats.tick % 1000 == 0 {
            debug!(tick = stats.tick, mean = stats.cooperation_mean, "progress");
        }
    });

    if cli.json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{summary}");
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
