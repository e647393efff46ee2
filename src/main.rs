use anyhow::{Context, Result};
use genetrade::config::ConfigManager;
use genetrade::engines::generation::{Agent, GeneticAlgorithm, LoggingProgressCallback, ScoredAgent};
use genetrade::engines::parameters::ParameterSet;
use std::env;
use std::io::{self, Write};

/// Gene count used when the config defines no parameters
const DEMO_GENE_COUNT: usize = 10;

/// Demo objective: reward the first half of the genes, penalize the second half
fn balance_fitness(agent: &Agent) -> f64 {
    let values = agent.values();
    let (lhs, rhs) = values.split_at(values.len() / 2);
    lhs.iter().sum::<f64>() - rhs.iter().sum::<f64>()
}

fn report(best: &ScoredAgent, generation: usize, parameters: &ParameterSet) -> Result<()> {
    println!("High score: {}\nAgent: {}", best.score, best.agent);

    let mut decoded = serde_json::Map::new();
    if !parameters.is_empty() {
        let mut tuned = parameters.clone();
        tuned.update_from_agent(&best.agent)?;
        print!("{}", tuned);
        for entry in tuned.iter() {
            decoded.insert(entry.name.clone(), serde_json::to_value(entry.value())?);
        }
    }

    let summary = serde_json::json!({
        "generation": generation,
        "score": best.score,
        "agent": best.agent,
        "parameters": decoded,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// Iteration count from the command line, falling back to the configured count when absent
fn parse_iterations(arg: Option<&str>, default: usize) -> Result<usize> {
    match arg {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid iteration count: {:?}", raw)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Usage: genetrade [CONFIG] [ITERATIONS]
    let args: Vec<String> = env::args().collect();

    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?;
    }
    let config = manager.get();

    let mut iterations = parse_iterations(args.get(2).map(String::as_str), config.evolution.iterations)?;

    let parameters = ParameterSet::from_config(&config.parameters)?;
    let gene_count = if parameters.is_empty() {
        DEMO_GENE_COUNT
    } else {
        parameters.len()
    };

    let mut engine = GeneticAlgorithm::from_config(balance_fitness, gene_count, &config.evolution)?;
    if !parameters.is_empty() {
        engine.inject(parameters.to_agent())?;
    }

    log::info!(
        "Evolving {} agents with {} genes (mutation chance {:.3})",
        engine.population().len(),
        gene_count,
        engine.mutation_chance()
    );

    let mut callback = LoggingProgressCallback;
    loop {
        let best = if config.evolution.parallel_evaluation {
            engine.run_parallel_with_callback(iterations, &mut callback)?
        } else {
            engine.run_with_callback(iterations, &mut callback)?
        };

        if let Some(best) = best {
            report(&best, engine.generation(), &parameters)?;
        }

        print!("iterations?: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim().parse::<usize>() {
            Ok(n) => iterations = n,
            Err(_) => break,
        }
    }

    Ok(())
}
