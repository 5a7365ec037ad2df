use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use base32check::{b32dec, b32enc, Alphabet, CHECK1, RFC4648, RFC4648_HEX, ZBASE32};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlphabetArg {
    Rfc4648,
    Rfc4648Hex,
    Zbase32,
}

impl AlphabetArg {
    fn table(self) -> &'static dyn Alphabet {
        match self {
            AlphabetArg::Rfc4648 => &RFC4648,
            AlphabetArg::Rfc4648Hex => &RFC4648_HEX,
            AlphabetArg::Zbase32 => &ZBASE32,
        }
    }
}

/// Base32 encode or decode INPUT (or standard input), optionally with a check symbol.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[arg()]
    input: Option<String>,

    #[arg(short, long, conflicts_with_all = ["encode", "validate"])]
    decode: bool,

    #[arg(short, long)]
    encode: bool,

    /// Append a check symbol when encoding (output is then unpadded); verify and strip it when decoding
    #[arg(short, long)]
    check: bool,

    /// Verify that the input ends in its check symbol
    #[arg(long, conflicts_with = "encode")]
    validate: bool,

    #[arg(short, long, value_enum, default_value_t = AlphabetArg::Rfc4648)]
    alphabet: AlphabetArg,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut reader: Box<dyn Read> = match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("no such file: {}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("read error")?;
    debug!(bytes = buf.len(), "read input");
    Ok(buf)
}

/// Input text with ignorable characters removed, as the check symbol covers symbols only.
fn symbols_only(input: Vec<u8>, alphabet: &dyn Alphabet) -> Result<String> {
    let text = String::from_utf8(input).context("input is not valid UTF-8")?;
    Ok(text.chars().filter(|&c| !alphabet.ignore(c)).collect())
}

/// Encoded text; with `check` the padding is dropped and the check symbol appended.
fn encode_input(input: &[u8], alphabet: &dyn Alphabet, check: bool) -> Result<String> {
    let mut encoded = b32enc(input, alphabet)?;
    if check {
        if let Some(pad) = alphabet.pad() {
            encoded.truncate(encoded.trim_end_matches(pad).len());
        }
        let symbol = CHECK1.compute(&encoded, alphabet)?;
        encoded.push(symbol);
    }
    Ok(encoded)
}

/// Decoded bytes; with `check` the trailing check symbol is verified and stripped first.
fn decode_input(input: Vec<u8>, alphabet: &dyn Alphabet, check: bool) -> Result<Vec<u8>> {
    if check {
        let mut text = symbols_only(input, alphabet)?;
        if !CHECK1.validate(&text, alphabet)? {
            bail!("check symbol mismatch");
        }
        text.pop();
        Ok(b32dec(&text, alphabet)?)
    } else {
        let text = String::from_utf8(input).context("input is not valid UTF-8")?;
        Ok(b32dec(&text, alphabet)?)
    }
}

fn validate_input(input: Vec<u8>, alphabet: &dyn Alphabet) -> Result<bool> {
    let text = symbols_only(input, alphabet)?;
    let valid = CHECK1.validate(&text, alphabet)?;
    info!(symbols = text.len(), valid, "validated");
    Ok(valid)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    debug!(encode = args.encode, decode = args.decode, alphabet = ?args.alphabet, "mode");
    let alphabet = args.alphabet.table();
    let input = read_input(args.input.as_deref())?;
    let mut writer = BufWriter::new(io::stdout());

    if args.validate {
        let valid = validate_input(input, alphabet)?;
        writeln!(writer, "{}", if valid { "valid" } else { "invalid" }).context("write error")?;
        writer.flush().context("write error")?;
        return Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    if args.decode {
        let decoded = decode_input(input, alphabet, args.check)?;
        info!(bytes = decoded.len(), "decoded");
        writer.write_all(&decoded).context("write error")?;
    } else {
        let encoded = encode_input(&input, alphabet, args.check)?;
        info!(symbols = encoded.len(), "encoded");
        writeln!(writer, "{}", encoded).context("write error")?;
    }

    writer.flush().context("write error")?;
    Ok(ExitCode::SUCCESS)
}
