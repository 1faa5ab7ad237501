//! CLI tool for messboard - builds a page's charts from JSON feeds and
//! prints what would be mounted
//!
//! Usage:
//!   messboard_cli overview <attendance.json> <consumption.json> <wastage.json>
//!   messboard_cli analysis <attendance.json> <consumption.json> <prediction.json>
//!   messboard_cli dashboard <attendance.json> <consumption.json> <prediction.json>
//!   messboard_cli waste <food_waste.json> <todays_waste.json>
//!
//! Options:
//!   -c <config.json>   Dashboard configuration
//!   -o <out.json>      Write JSON to a file instead of stdout
//!   -v                 Debug logging on stderr

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use messboard::config::DashboardConfig;
use messboard::error::DashboardError;
use messboard::host::{layout_matrix, MemoryHost, DEFAULT_MATRIX_SIZE};
use messboard::pages::data::parse_embedded;
use messboard::pages::{analysis, dashboard, overview, waste, PageReport};
use messboard::Chart;

const USAGE: &str = "Usage: messboard_cli <overview|analysis|dashboard|waste> <feed.json>... [-c config.json] [-o out.json] [-v]";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => fail(&format!("Error reading {path}: {e}")),
    }
}

/// Embedded feeds are lenient: unreadable JSON becomes an empty feed.
fn feed<T: DeserializeOwned + Default>(path: Option<&String>) -> T {
    let text = path.map(|p| read(p));
    parse_embedded(text.as_deref())
}

/// Fetched feeds surface decode errors the way a failed request would.
fn response<T: DeserializeOwned>(path: Option<&String>) -> Result<T, DashboardError> {
    let path = path.ok_or_else(|| DashboardError::Fetch("no file given".to_string()))?;
    Ok(serde_json::from_str(&read(path))?)
}

fn chart_json(chart: &Chart) -> Value {
    match chart {
        Chart::Native(config) => serde_json::to_value(config).unwrap_or(Value::Null),
        Chart::Matrix(spec) => {
            let (width, height) = DEFAULT_MATRIX_SIZE;
            let layout = match layout_matrix(chart, width, height) {
                Ok(Some(layout)) => layout,
                Ok(None) => return Value::Null,
                Err(e) => return json!({ "error": e.to_string() }),
            };
            let cells: Vec<Value> = layout
                .elements
                .iter()
                .filter_map(|element| {
                    let cell = spec.cells.get(element.data_index)?;
                    Some(json!({
                        "row": cell.row,
                        "column": cell.column,
                        "value": cell.value,
                        "geometry": element.geometry,
                        "backgroundColor": element.style.background_color,
                        "tooltip": spec.tooltip.format(cell),
                    }))
                })
                .collect();
            json!({
                "type": chart.kind(),
                "title": spec.title,
                "xLabels": spec.x_labels,
                "yLabels": spec.y_labels,
                "area": layout.area,
                "cells": cells,
            })
        }
    }
}

fn main() {
    let mut args = env::args().skip(1);
    let mut positional = Vec::new();
    let mut config = DashboardConfig::default();
    let mut output_path = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" => match args.next() {
                Some(path) => config = DashboardConfig::from_json(&read(&path)),
                None => fail(USAGE),
            },
            "-o" => output_path = Some(args.next().unwrap_or_else(|| fail(USAGE))),
            "-v" => verbose = true,
            _ => positional.push(arg),
        }
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        config.level()
    };
    messboard::logging::init(level);

    let Some((page, feeds)) = positional.split_first() else {
        fail(USAGE);
    };

    let mut host = MemoryHost::accepting_all();
    let report: PageReport = match page.as_str() {
        "overview" => overview::init_page(
            &mut host,
            &feed(feeds.first()),
            &feed(feeds.get(1)),
            &feed(feeds.get(2)),
            &config,
        ),
        "analysis" => analysis::init_page(
            &mut host,
            &feed(feeds.first()),
            &feed(feeds.get(1)),
            &feed(feeds.get(2)),
            &config,
        ),
        "dashboard" => dashboard::init_page(
            &mut host,
            &feed(feeds.first()),
            &feed(feeds.get(1)),
            &feed(feeds.get(2)),
            &config,
        ),
        "waste" => vec![
            (
                "food_waste",
                waste::apply_food_waste(&mut host, response(feeds.first())),
            ),
            (
                "todays_waste",
                waste::apply_todays_waste(&mut host, response(feeds.get(1))),
            ),
        ],
        other => fail(&format!("Unknown page '{other}'\n{USAGE}")),
    };

    let charts: Map<String, Value> = host
        .charts()
        .iter()
        .map(|(id, chart)| (id.clone(), chart_json(chart)))
        .collect();
    let outcomes: Map<String, Value> = report
        .iter()
        .map(|(name, outcome)| ((*name).to_string(), Value::String(outcome.to_string())))
        .collect();
    let document = json!({
        "page": page,
        "outcomes": outcomes,
        "charts": charts,
        "messages": host.messages(),
    });

    let json = match serde_json::to_string_pretty(&document) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
