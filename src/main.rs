// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line runner: enumerate polycube generations up to a target
//! voxel count, optionally persisting each generation to a cache
//! directory and skipping generations already computed there.

use polycube_search::cache;
use polycube_search::pipeline::{GenerationPipeline, LogProgress};
use polycube_search::{Grid, StorePreference};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Options {
    max_n: usize,
    chiral: bool,
    cache_dir: Option<PathBuf>,
    force: bool,
    preference: StorePreference,
}

const USAGE: &str = "usage: polycubes [--max-n N] [--chiral] [--cache DIR] [--force] \
                     [--store auto|paged64k|paged16m|striped]";

fn parse_options() -> Result<Options, String> {
    let mut options = Options {
        max_n: 8,
        chiral: false,
        cache_dir: None,
        force: false,
        preference: StorePreference::Auto,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-n" => {
                let value = args.next().ok_or("--max-n needs a value")?;
                options.max_n = value.parse().map_err(|_| format!("bad --max-n {value:?}"))?;
            }
            "--chiral" => options.chiral = true,
            "--cache" => {
                let value = args.next().ok_or("--cache needs a directory")?;
                options.cache_dir = Some(PathBuf::from(value));
            }
            "--force" => options.force = true,
            "--store" => {
                options.preference = match args.next().as_deref() {
                    Some("auto") => StorePreference::Auto,
                    Some("paged64k") => StorePreference::Paged64k,
                    Some("paged16m") => StorePreference::Paged16m,
                    Some("striped") => StorePreference::Striped,
                    other => return Err(format!("bad --store {other:?}")),
                };
            }
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    if options.max_n == 0 {
        return Err("--max-n must be at least 1".into());
    }
    Ok(options)
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = GenerationPipeline::new(options.preference)
        .with_progress(Arc::new(LogProgress::new(100_000)));

    let mut shapes = vec![Grid::unit()];
    info!(n = 1, free = 1, "generation ready");

    for n in 2..=options.max_n {
        if let Some(dir) = &options.cache_dir {
            if !options.force {
                if let Some(cached) = cache::read_generation(dir, n)? {
                    info!(n, free = cached.len(), "generation loaded from cache");
                    shapes = cached;
                    continue;
                }
            }
        }

        let started = Instant::now();
        let store = pipeline.extend(&shapes)?;
        let elapsed = started.elapsed();
        info!(n, free = store.distinct(), ?elapsed, "generation computed");

        if let Some(dir) = &options.cache_dir {
            cache::write_generation(dir, n, &store, elapsed)?;
        }
        shapes = store.grids()?;
        shapes.sort();
    }

    if options.chiral {
        let started = Instant::now();
        let reduced = pipeline.chiral_reduce(&shapes)?;
        info!(
            n = options.max_n,
            chiral = reduced.distinct(),
            elapsed = ?started.elapsed(),
            "chiral reduction complete"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let options = match parse_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(error = %err, "enumeration failed");
            ExitCode::FAILURE
        }
    }
}
