use brotli_blocks::{
    compress_to_bare_block, decompress_bare_blocks, extract_raw_meta_block, verify_bare_block,
    BrotliCodec, BrotliConfig, Codec, Result,
};
use std::env;
use std::io::{self, Read, Write};
use std::process;

const USAGE: &str = "Usage: brotli-blocks <MODE> [--quality N] [--window N] [--verify]

Reads stdin and writes stdout.

Modes:
  -c    compress
  -d    decompress
  -cb   compress and emit the bare block
  -db   decompress one bare block
  -s    emit the bare block of an already compressed stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Compress,
    Decompress,
    CompressBare,
    DecompressBare,
    Strip,
}

impl Mode {
    fn parse(flag: &str) -> Option<Self> {
        match flag {
            "-c" => Some(Mode::Compress),
            "-d" => Some(Mode::Decompress),
            "-cb" => Some(Mode::CompressBare),
            "-db" => Some(Mode::DecompressBare),
            "-s" => Some(Mode::Strip),
            _ => None,
        }
    }
}

struct Options {
    mode: Mode,
    config: BrotliConfig,
    verify: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut mode = None;
    let mut config = BrotliConfig::default();
    let mut verify = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--quality" => config = config.with_quality(numeric_value(arg, iter.next())?),
            "--window" => config = config.with_lgwin(numeric_value(arg, iter.next())?),
            "--verify" => verify = true,
            flag => match Mode::parse(flag) {
                Some(parsed) if mode.is_none() => mode = Some(parsed),
                Some(_) => return Err(format!("more than one mode given ({})", flag)),
                None => return Err(format!("unknown argument '{}'", flag)),
            },
        }
    }

    let mode = mode.ok_or_else(|| "no mode given".to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(Options { mode, config, verify })
}

fn numeric_value(flag: &str, value: Option<&String>) -> std::result::Result<u32, String> {
    let value = value.ok_or_else(|| format!("{} flag requires an argument", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, value))
}

fn run(options: &Options, input: &[u8]) -> Result<Vec<u8>> {
    let codec = BrotliCodec::new(options.config)?;
    let bare_mode = matches!(options.mode, Mode::CompressBare | Mode::Strip);
    if bare_mode && !codec.config().splice_safe() {
        eprintln!(
            "WARNING: quality {} bare blocks only decode on their own",
            codec.config().quality
        );
    }

    match options.mode {
        Mode::Compress => codec.compress(input),
        Mode::Decompress => codec.decompress(input),
        Mode::CompressBare => {
            let bare = compress_to_bare_block(&codec, input)?;
            if options.verify {
                verify_bare_block(&codec, &bare, input)?;
            }
            Ok(bare)
        }
        Mode::DecompressBare => decompress_bare_blocks(&codec, &[input]),
        Mode::Strip => {
            let block = extract_raw_meta_block(&codec, input)?;
            if options.verify {
                verify_bare_block(&codec, &block.bare_block, &block.decompressed)?;
            }
            Ok(block.bare_block)
        }
    }
}

fn execute(options: &Options) -> Result<()> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    let output = run(options, &input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("ERROR: {}", message);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = execute(&options) {
        eprintln!("ERROR: Failed to process input");
        eprintln!("  {}", e);
        process::exit(1);
    }
}
