//! # Checkout CLI
//!
//! Prices one checkout request record.
//!
//! ## Usage
//! ```bash
//! # Read the request from stdin
//! echo '{"user_id":"u1","items":[{"price":100,"qty":2}],"coupon":"SAVE10"}' | checkout
//!
//! # Read the request from a file, pretty-print the result
//! checkout --input request.json --pretty
//! ```
//!
//! ## Exit Codes
//! - `0`: priced; the result record is on stdout
//! - `1`: the input could not be read or parsed (message on stderr)
//! - `2`: the request was rejected; `{"error", "message"}` is on stdout

mod config;

use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use checkout_core::{process_checkout, CheckoutError};

use crate::config::CliConfig;

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    /// Request file; `None` or `-` means stdin.
    input: Option<String>,
    pretty: bool,
    help: bool,
}

impl Args {
    fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => match args.next() {
                    Some(path) => parsed.input = Some(path),
                    None => bail!("{arg} requires a path"),
                },
                "--pretty" | "-p" => parsed.pretty = true,
                "--help" | "-h" => parsed.help = true,
                other => bail!("unexpected argument: {other}"),
            }
        }

        Ok(parsed)
    }
}

fn print_help() {
    println!("Checkout pricing calculator");
    println!();
    println!("Usage: checkout [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --input <PATH>   Request JSON file (default: stdin, or '-')");
    println!("  -p, --pretty         Pretty-print the result");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment:");
    println!("  CHECKOUT_LOG              tracing filter (default: warn)");
    println!("  CHECKOUT_PRETTY           pretty-print output (default: false)");
    println!("  CHECKOUT_MAX_INPUT_BYTES  request size limit (default: 1048576)");
}

fn init_tracing(filter: &str) {
    // stdout carries the result record, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Exit code for a priced request.
const EXIT_PRICED: u8 = 0;

/// Exit code for a request the pipeline rejected.
const EXIT_REJECTED: u8 = 2;

/// Opens the request source; `None` and `-` both mean stdin.
fn open_input(input: Option<&str>) -> anyhow::Result<Box<dyn Read>> {
    match input {
        None | Some("-") => Ok(Box::new(io::stdin())),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
            Ok(Box::new(file))
        }
    }
}

/// Reads one JSON record, refusing anything over `max_bytes`.
fn read_request<R: Read>(reader: R, max_bytes: u64) -> anyhow::Result<Value> {
    let mut raw = String::new();
    let read = reader
        .take(max_bytes.saturating_add(1))
        .read_to_string(&mut raw)
        .context("failed to read request")?;

    if read as u64 > max_bytes {
        bail!("request exceeds {max_bytes} bytes");
    }

    serde_json::from_str(&raw).context("request is not valid JSON")
}

/// Record printed for a rejected request.
fn error_record(err: &CheckoutError) -> Value {
    json!({
        "error": err.kind(),
        "message": err.reason(),
    })
}

fn render(value: &Value, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Prices one request and writes the outcome record to `out`.
///
/// ## Returns
/// - `EXIT_PRICED` with the result record written
/// - `EXIT_REJECTED` with the `{"error", "message"}` record written
/// - `Err` when the input cannot be read or parsed (nothing written)
fn run<R, W>(input: R, out: &mut W, pretty: bool, max_bytes: u64) -> anyhow::Result<u8>
where
    R: Read,
    W: Write,
{
    let request = read_request(input, max_bytes)?;

    let (record, code) = match process_checkout(&request) {
        Ok(result) => {
            info!(order_id = %result.order_id, total = %result.total, "Order priced");
            (result.to_record(), EXIT_PRICED)
        }
        Err(err) => {
            info!(kind = err.kind(), reason = %err.reason(), "Order rejected");
            (error_record(&err), EXIT_REJECTED)
        }
    };

    writeln!(out, "{}", render(&record, pretty)?)?;
    Ok(code)
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Try 'checkout --help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);
    debug!(?config, "Configuration loaded");

    let outcome = open_input(args.input.as_deref()).and_then(|input| {
        let mut stdout = io::stdout().lock();
        run(
            input,
            &mut stdout,
            args.pretty || config.pretty,
            config.max_input_bytes,
        )
    });

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
