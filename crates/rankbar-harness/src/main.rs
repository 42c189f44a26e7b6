#![forbid(unsafe_code)]

//! Rankbar Harness Reference Application
//!
//! Builds a chart from a JSON dataset (or a synthetic one), replays a
//! scripted list of pointer inputs against it and writes the final scene as
//! SVG.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=rankbar=debug cargo run -p rankbar-harness
//! ```
//!
//! # Environment
//!
//! - `RANKBAR_HARNESS_DATA`: dataset file, a record array or an options object
//! - `RANKBAR_HARNESS_ROWS`: synthetic row count when no dataset is given (1000)
//! - `RANKBAR_HARNESS_SEED`: synthetic dataset seed (42)
//! - `RANKBAR_HARNESS_SIZE`: chart size as `WIDTHxHEIGHT` (700x560)
//! - `RANKBAR_HARNESS_THEME`: `hdesign-light` or `hdesign-dark`
//! - `RANKBAR_HARNESS_SORT`: `asc` or `desc`
//! - `RANKBAR_HARNESS_CACHE_MARGIN`: bounded cache margin (unbounded if unset)
//! - `RANKBAR_HARNESS_SCRIPT`: input script file, see `rankbar_harness::script`
//! - `RANKBAR_HARNESS_OUT`: SVG output path (stdout if unset)

use std::io::{self, Write};

use rankbar::{CachePolicy, ChartOptionsPatch, HorizontalChart, SortOrder, ThemeName};
use rankbar_harness::{dataset, script};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let (width, height) = env_string("RANKBAR_HARNESS_SIZE")
        .and_then(|raw| parse_size(&raw))
        .unwrap_or((700.0, 560.0));

    let mut patch = match env_string("RANKBAR_HARNESS_DATA") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            dataset::parse(&json).map_err(|err| invalid(format!("{path}: {err}")))?
        }
        None => {
            let rows = env_u64("RANKBAR_HARNESS_ROWS").unwrap_or(1000) as usize;
            let seed = env_u64("RANKBAR_HARNESS_SEED").unwrap_or(42);
            ChartOptionsPatch::new().data(dataset::synthetic(rows, seed))
        }
    };
    if let Some(theme) = env_string("RANKBAR_HARNESS_THEME") {
        patch = patch.theme(ThemeName::parse(&theme));
    }
    if let Some(sort) = env_string("RANKBAR_HARNESS_SORT") {
        match SortOrder::parse(&sort) {
            Some(order) => patch = patch.sort(Some(order)),
            None => warn!(%sort, "unknown sort order ignored"),
        }
    }
    if let Some(margin) = env_u64("RANKBAR_HARNESS_CACHE_MARGIN") {
        patch = patch.cache_policy(CachePolicy::Bounded {
            margin: margin as usize,
        });
    }

    let mut chart = HorizontalChart::init(width, height).map_err(|err| invalid(err.to_string()))?;
    chart.set_simple_options(patch);
    chart.on_render_ready(|chart| {
        if let Some(ctl) = chart.controller() {
            info!(
                rows = ctl.list().row_count(),
                max_scroll_y = ctl.max_scroll_y(),
                visible_count = ctl.list().visible_count(),
                "render ready"
            );
        }
    });
    chart.render().map_err(|err| invalid(err.to_string()))?;

    if let Some(path) = env_string("RANKBAR_HARNESS_SCRIPT") {
        let source = std::fs::read_to_string(&path)?;
        let steps = script::parse(&source, (width / 2.0, height / 2.0))
            .map_err(|err| invalid(format!("{path}: {err}")))?;
        let results = script::replay(&mut chart, &steps);
        let handled = results.iter().filter(|r| r.is_handled()).count();
        info!(steps = steps.len(), handled, "script replayed");
    }

    if let Some(ctl) = chart.controller() {
        info!(
            scroll_y = ctl.scroll_y(),
            start = ctl.list().visible_range().start,
            end = ctl.list().visible_range().end,
            cached = ctl.list().cached_len(),
            nodes = chart.scene().node_count(),
            "final state"
        );
    }

    let svg = chart.to_svg();
    match env_string("RANKBAR_HARNESS_OUT") {
        Some(path) => std::fs::write(path, svg)?,
        None => io::stdout().lock().write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn parse_size(raw: &str) -> Option<(f64, f64)> {
    let (w, h) = raw.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
