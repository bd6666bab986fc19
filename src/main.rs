// Copyright 2026 Hammdist Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod cli;
mod config;
mod output;

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use rusqlite::Batch;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::params;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;
use serde_json::json;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::config::Config;
use crate::output::JsonResponse;
use crate::output::StatsOut;
use crate::output::print_json;
use crate::output::sql_to_json;
use crate::output::sql_to_text;

const REFERENCE: [(i64, i64, i64); 6] = [
    (0, 0, 0),
    (1, 0, 1),
    (5, 3, 2),
    (0, -1, 64),
    (i64::MIN, 0, 1),
    (i64::MIN, i64::MAX, 64),
];

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Dist(args) => handle_result(cmd_dist(args.a, args.b, args.json), args.json),
        Commands::Query(args) => {
            handle_result(cmd_query(&config, &args.sql, args.db, args.json), args.json)
        }
        Commands::Doctor { json } => handle_result(cmd_doctor(&config, json), json),
    }
}

fn handle_result(result: Result<()>, json: bool) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let resp = JsonResponse::error("error", &format!("{err:#}"));
                print_json(&resp)?;
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn cmd_dist(a: i64, b: i64, json: bool) -> Result<()> {
    let d = hammdist::distance(a, b);
    if json {
        let resp = JsonResponse::ok().with_results(vec![json!({
            "a": a,
            "b": b,
            "distance": d,
        })]);
        print_json(&resp)?;
    } else {
        println!("{d}");
    }
    Ok(())
}

struct QueryTable {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    trailing: bool,
}

fn open_connection(path: Option<&Path>, config: &Config) -> Result<Connection> {
    let conn = match path {
        Some(path) => Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .with_context(|| format!("open {}", path.display()))?,
        None => Connection::open_in_memory().context("open in-memory database")?,
    };
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .context("set busy timeout")?;
    hammdist::register_with(&conn, config.register_options()).context("register hammdist")?;
    Ok(conn)
}

fn run_sql(conn: &Connection, sql: &str) -> Result<QueryTable> {
    let mut batch = Batch::new(conn, sql);
    let mut stmt = batch
        .next()
        .context("prepare statement")?
        .ok_or_else(|| anyhow::anyhow!("no SQL statement given"))?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let width = columns.len();
    let mut rows = Vec::new();
    let mut cursor = stmt.query([]).context("run statement")?;
    while let Some(row) = cursor.next().context("step statement")? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(row.get::<_, SqlValue>(idx)?);
        }
        rows.push(values);
    }
    drop(cursor);
    // Later statements are never run; a prepare failure still means there was one.
    let trailing = !matches!(batch.next(), Ok(None));
    Ok(QueryTable {
        columns,
        rows,
        trailing,
    })
}

fn cmd_query(config: &Config, sql: &str, db: Option<PathBuf>, json: bool) -> Result<()> {
    let db_path = db.or_else(|| config.db_path.clone());
    let mut warnings = Vec::new();
    if db_path.is_none() {
        warnings.push("no database given; using an in-memory database".to_string());
    }
    let conn = open_connection(db_path.as_deref(), config)?;

    let started = Instant::now();
    let table = run_sql(&conn, sql)?;
    let took_ms = started.elapsed().as_millis() as i64;
    if table.trailing {
        warnings.push("only the first statement was run; the rest was ignored".to_string());
    }

    if json {
        let results = table
            .rows
            .iter()
            .map(|row| Value::Array(row.iter().map(sql_to_json).collect()))
            .collect();
        let resp = JsonResponse::ok()
            .with_query(sql, db_path.map(|path| path.display().to_string()))
            .with_columns(table.columns)
            .with_results(results)
            .with_stats(StatsOut {
                took_ms,
                rows: table.rows.len() as i64,
            })
            .with_warnings(warnings);
        print_json(&resp)?;
    } else {
        for warn in warnings {
            eprintln!("warning: {warn}");
        }
        if !table.columns.is_empty() {
            println!("{}", table.columns.join("\t"));
        }
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(sql_to_text).collect();
            println!("{}", cells.join("\t"));
        }
    }

    Ok(())
}

fn cmd_doctor(config: &Config, json: bool) -> Result<()> {
    let conn = open_connection(None, config)?;
    let mut failures = Vec::new();
    for (a, b, expected) in REFERENCE {
        let got: i64 = conn
            .query_row("SELECT hammdist(?1, ?2)", params![a, b], |row| row.get(0))
            .with_context(|| format!("evaluate hammdist({a}, {b})"))?;
        if got != expected {
            failures.push(format!("hammdist({a}, {b}) = {got}, expected {expected}"));
        }
    }
    if !failures.is_empty() {
        anyhow::bail!("self-check failed: {}", failures.join("; "));
    }

    let kernel = hammdist::popcount::kernel();
    let opts = config.register_options();
    if json {
        let resp = JsonResponse::ok().with_diagnostics(json!({
            "kernel": kernel.as_str(),
            "sqlite_version": rusqlite::version(),
            "function": hammdist::FUNCTION_NAME,
            "arity": hammdist::FUNCTION_ARITY,
            "deterministic": opts.deterministic,
            "innocuous": opts.innocuous,
            "checks": REFERENCE.len(),
        }));
        print_json(&resp)?;
    } else {
        println!("Popcount: {}", kernel.as_str());
        println!("SQLite: {}", rusqlite::version());
        println!(
            "Function: {}/{} (deterministic: {}, innocuous: {})",
            hammdist::FUNCTION_NAME,
            hammdist::FUNCTION_ARITY,
            opts.deterministic,
            opts.innocuous
        );
        println!("Checks: {} passed", REFERENCE.len());
    }

    Ok(())
}
