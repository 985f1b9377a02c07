//! notelight - dump markdown highlighting of a note file

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use notelight::{logging, Config, HighlightCache, NoteHighlighter, Result};

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line
#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    rules: Option<PathBuf>,
    words: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return None;
            }
            "--version" | "-V" => {
                println!("notelight {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--config" | "-c" => args.config = iter.next().map(PathBuf::from),
            "--rules" | "-r" => args.rules = iter.next().map(PathBuf::from),
            "--words" | "-w" => args.words = iter.next().map(PathBuf::from),
            _ => args.file = Some(PathBuf::from(arg)),
        }
    }

    Some(args)
}

fn run() -> Result<()> {
    let Some(args) = parse_args() else {
        return Ok(());
    };
    let Some(file) = args.file else {
        print_usage();
        return Ok(());
    };

    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(),
    };
    if args.rules.is_some() {
        config.rules = args.rules;
    }
    if args.words.is_some() {
        config.dictionary = args.words;
    }

    let mut highlighter = NoteHighlighter::from_config(&config)?;
    highlighter.set_typing_paused(true);

    let text = fs::read_to_string(&file)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut cache = HighlightCache::new();
    cache.highlight_all(&highlighter, &lines, None);

    for index in 0..cache.len() {
        let Some(line) = cache.line(index) else {
            continue;
        };
        for span in &line.spans {
            println!("{}:{}+{} {}", index + 1, span.offset, span.length, span.token);
        }
        for word in &line.misspellings {
            println!("{}:{}+{} Misspelled", index + 1, word.offset, word.length);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("notelight {} - markdown note highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: notelight [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config PATH  Read configuration from PATH");
    println!("  -r, --rules PATH   Use the TOML rule table at PATH");
    println!("  -w, --words PATH   Spell-check against the word list at PATH");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Prints one `line:offset+length Token` entry per highlighted span.");
}
