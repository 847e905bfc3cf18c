//! Tournament command implementation.

#![allow(clippy::cast_precision_loss)]

use super::output::{
    JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text,
};
use super::{CliError, MatchSetup, TournamentFormat, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use robobattle::arena::run_match;
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the catalog or config cannot be loaded.
pub(crate) fn execute(
    setup: &MatchSetup,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let (catalog, config) = setup.load()?;
    let loadout = setup.loadout();

    if let Some(num_threads) = threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            tracing::warn!(error = %e, "thread pool already initialized");
        }
    }

    let base_seed = resolve_seed(seed);
    tracing::info!(games, base_seed, "starting tournament");

    let pb = progress.then(|| {
        let pb = ProgressBar::new(games);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} battles ({per_sec})",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let start = Instant::now();

    // Each thread folds into its own stats; merged once at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local, i| {
            let result = run_match(base_seed.wrapping_add(i), &loadout, &catalog, &config);
            local.add_result(&result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &loadout));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} battles/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        TournamentFormat::Json => {
            let json =
                serde_json::to_string_pretty(&JsonTournamentResult::from_stats(&stats, loadout))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &loadout));
        }
    }

    Ok(())
}
