//! Command execution logic for the Sentira CLI.

use std::fs;
use std::time::Duration;

use log::info;

use crate::cli::args::{Command, GridArgs, RunArgs, SentiraArgs};
use crate::cli::output::print_report;
use crate::corpus::loader::CorpusLoader;
use crate::corpus::source::JsonlSource;
use crate::error::Result;
use crate::evaluate::{self, SearchReport};
use crate::search::{GridSearch, ParameterGrid, SearchConfig};

/// Execute the parsed command.
pub fn execute_command(args: SentiraArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => execute_run(&args, run_args),
        Command::Grid(grid_args) => execute_grid(&args, grid_args),
    }
}

fn execute_run(args: &SentiraArgs, run_args: &RunArgs) -> Result<()> {
    let source = JsonlSource::open(&run_args.corpus, run_args.page_size)?;
    let mut loader = CorpusLoader::new(Box::new(source));
    if let Some(secs) = run_args.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }

    let dataset = loader.load()?;
    let (train, eval) = dataset.split(run_args.eval_fraction, run_args.seed)?;
    info!(
        "split {} record(s) into {} train / {} eval",
        dataset.len(),
        train.len(),
        eval.len()
    );

    let grid = match &run_args.grid_file {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<ParameterGrid>(&raw)?
        }
        None => ParameterGrid::default(),
    };

    let search = GridSearch::new(grid).with_config(SearchConfig {
        folds: run_args.folds,
        seed: run_args.seed,
        parallelism: run_args.parallelism,
    });
    let outcome = search.run(&train)?;

    let evaluation = evaluate::evaluate(&outcome.pipeline, &train, &eval)?;
    let report = SearchReport {
        best_config: outcome.best_config,
        best_mean_score: outcome.best_score,
        combinations: outcome.records.len(),
        fold_fits: outcome.fold_fits,
        evaluation,
    };

    print_report(args, &report)
}

fn execute_grid(args: &SentiraArgs, _grid_args: &GridArgs) -> Result<()> {
    let grid = ParameterGrid::default();
    let json = if args.pretty {
        serde_json::to_string_pretty(&grid)?
    } else {
        serde_json::to_string(&grid)?
    };
    println!("{json}");
    Ok(())
}
