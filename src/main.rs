use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;
use u_tsp::{
    ga::GaConfig,
    island::{solve, SearchConfig},
    tsp::load_problem,
};

fn cli() -> Command {
    Command::new("u-tsp")
        .about("Searches for a short tour through a TSPLIB EUC_2D instance")
        .arg_required_else_help(true)
        .arg(arg!(<TSP_FILE> "TSPLIB problem file").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            arg!(-e --elitism [BOOL] "Carry the fittest tour into the next generation")
                .default_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            arg!(-s --"selection-size" [SIZE] "Number of tours drawn per tournament")
                .default_value("4")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-m --"mutation-rate" [PERCENT] "Per-position swap probability in percent")
                .default_value("2")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            arg!(-i --"nearest-neighbor" "Seed each population with the nearest-neighbor tour")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-p --"population-size" [SIZE] "Tours per population")
                .default_value("20")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-n --workers [WORKERS] "Number of worker threads")
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-t --timeout [SECONDS] "Deadline in seconds, 0 for none")
                .default_value("0")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(-l --"lower-bound" [LENGTH] "Stop once a tour this short is found, 0 for none")
                .default_value("0")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(arg!(--"no-verify" "Skip verification of the final tour").action(ArgAction::SetTrue))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_thread_ids(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = cli().get_matches();
    let path = matches
        .get_one::<PathBuf>("TSP_FILE")
        .ok_or_else(|| anyhow!("missing TSP_FILE"))?;
    let config = search_config(&matches)?;

    let points =
        load_problem(path).with_context(|| format!("cannot load {}", path.display()))?;
    let result = solve(&points, &config)?;

    if !matches.get_flag("no-verify") {
        result
            .best
            .verify(&points)
            .context("final tour failed verification")?;
    }
    println!("{}", result.best);
    println!("{result}");
    Ok(())
}

fn search_config(matches: &ArgMatches) -> Result<SearchConfig> {
    let get_usize = |name: &str| -> Result<usize> {
        matches
            .get_one::<usize>(name)
            .copied()
            .ok_or_else(|| anyhow!("missing --{name}"))
    };

    let mut ga = GaConfig::default()
        .with_elitism(matches.get_one::<bool>("elitism").copied().unwrap_or(true))
        .with_selection_size(get_usize("selection-size")?)
        .with_mutation_rate(matches.get_one::<u32>("mutation-rate").copied().unwrap_or(2))
        .with_nearest_neighbor_seed(matches.get_flag("nearest-neighbor"))
        .with_population_size(get_usize("population-size")?);
    if let Some(seed) = matches.get_one::<u64>("seed") {
        ga = ga.with_seed(*seed);
    }

    let mut config = SearchConfig::default()
        .with_ga(ga)
        .with_num_workers(get_usize("workers")?);

    let timeout = matches.get_one::<f64>("timeout").copied().unwrap_or(0.0);
    if timeout > 0.0 {
        let deadline = Duration::try_from_secs_f64(timeout)
            .map_err(|e| anyhow!("invalid --timeout {timeout}: {e}"))?;
        config = config.with_deadline(deadline);
    } else if timeout < 0.0 {
        return Err(anyhow!("--timeout must not be negative"));
    }
    match matches.get_one::<u64>("lower-bound").copied() {
        Some(0) | None => {}
        Some(bound) => config = config.with_goal(bound),
    }

    config.validate()?;
    Ok(config)
}
