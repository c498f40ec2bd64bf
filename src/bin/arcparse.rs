//! Command line front end for the bundled grammars
//!
//! Usage:
//!   arcparse array '[1,[[2],3,4],5]'
//!   arcparse eval '(+ (* 10 2) (- (/ 50 3) 2))'
//!   arcparse tagged diceroll:2d8
//!   arcparse ipv4 packet.bin
//!   arcparse --json ipv4 --hex '45 00 00 44 ...'

use anyhow::{Context, Result, bail};
use arcparse::error::Location;
use arcparse::grammars::{ArrayGrammar, ExprGrammar, ipv4_header, tagged};
use arcparse::prelude::*;
use arcparse::text::{Base, digits_in, whitespace};
use clap::{Parser as ClapParser, Subcommand};
use serde::Serialize;
use std::fmt::Debug;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(ClapParser, Debug)]
#[command(name = "arcparse")]
#[command(about = "Parse text and binary input with the bundled example grammars")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log parser activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a nested integer array such as [1,[2,3]]
    Array { text: String },

    /// Evaluate an arithmetic S-expression
    Eval { expr: String },

    /// Parse a tagged value such as number:42 or diceroll:2d8
    Tagged { text: String },

    /// Decode an IPv4 header from a file or from hex text
    Ipv4 {
        /// Binary file holding the header
        #[arg(required_unless_present = "hex", conflicts_with = "hex")]
        file: Option<PathBuf>,

        /// Header bytes as hex, whitespace between bytes allowed
        #[arg(long)]
        hex: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "arcparse=trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run `parser` from the start of `input`, ignoring anything after the match
fn parse_prefix<P>(parser: &P, input: &[u8]) -> Result<(P::Output, usize)>
where
    P: Parser<Element = u8, Error = ParseError>,
{
    let state = parser.run(input);
    let position = state.position();

    match state.into_result() {
        Ok(value) => Ok((value, position)),
        Err(error) => bail!("{error} ({})", error.locate(input)),
    }
}

/// Run `parser` and require it to consume the whole input
fn parse_all<P>(parser: &P, input: &[u8]) -> Result<P::Output>
where
    P: Parser<Element = u8, Error = ParseError>,
{
    let (value, position) = parse_prefix(parser, input)?;
    if position != input.len() {
        bail!(
            "unexpected trailing input at {}",
            Location::of(input, position)
        );
    }
    Ok(value)
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let pair = digits_in(Base::Hexadecimal, 2, Some(2))?.map(|pair| u8::from_str_radix(&pair, 16));
    let bytes = separated_by(possibly(whitespace())).of(pair);

    let pairs = parse_all(&bytes, text.trim().as_bytes()).context("invalid hex input")?;
    Ok(pairs.into_iter().collect::<Result<Vec<u8>, _>>()?)
}

fn emit<T: Serialize + Debug>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value:#?}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "starting");

    match cli.command {
        Command::Array { text } => {
            let value = parse_all(&ArrayGrammar::new(), text.as_bytes())?;
            if cli.json {
                emit(&value, true)?;
            } else {
                println!("{value}");
            }
        }
        Command::Eval { expr } => {
            let tree = parse_all(&ExprGrammar::new(), expr.as_bytes())?;
            let result = tree.evaluate()?;
            info!(result, "evaluated expression");
            if cli.json {
                emit(&serde_json::json!({ "expr": tree, "result": result }), true)?;
            } else {
                println!("{result}");
            }
        }
        Command::Tagged { text } => {
            let value = parse_all(&tagged(), text.as_bytes())?;
            emit(&value, cli.json)?;
        }
        Command::Ipv4 { file, hex } => {
            let bytes = match (file, hex) {
                (_, Some(hex)) => decode_hex(&hex)?,
                (Some(path), None) => std::fs::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("either a file or --hex is required"),
            };
            let parser = ipv4_header()?;
            // The payload after the header is not decoded
            let (header, consumed) = parse_prefix(&parser, &bytes)?;
            debug!(consumed, remaining = bytes.len() - consumed, "decoded header");
            emit(&header, cli.json)?;
        }
    }

    Ok(())
}
