//! Line-oriented driver for the `lexitree` index.
//!
//! Replays whitespace-separated `<op> <word>` records from a file against a
//! single [`WordIndex`]: `+` inserts, `?` searches (printing a `0`/`1` found
//! flag and the word), `-` deletes. Thin glue only; everything interesting
//! happens in the library.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lexitree::{Mode, WordIndex};

/// Replays insert/search/delete records against an ordered word index.
#[derive(Parser, Debug)]
#[command(name = "lexitree", version)]
#[command(about = "Ordered word-frequency index driver")]
struct Cli {
    /// Input file of whitespace-separated `<op> <word>` records, where op is
    /// one of `+` (insert), `?` (search) or `-` (delete)
    input: PathBuf,

    /// Use a plain unbalanced binary search tree instead of a red-black tree
    #[arg(long)]
    bst: bool,

    /// Write a DOT description of the final tree to this path
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Print the final inorder `frequency word` listing to stdout
    #[arg(long)]
    print: bool,
}

/// A record's operation, parsed once at this boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Op {
    Insert,
    Search,
    Delete,
}

impl Op {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Insert),
            "?" => Some(Self::Search),
            "-" => Some(Self::Delete),
            _ => None,
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let text = fs::read_to_string(&cli.input)
        .map_err(|err| format!("cannot read {}: {err}", cli.input.display()))?;

    let mode = if cli.bst { Mode::Bst } else { Mode::Rbt };
    let mut index = WordIndex::with_mode(mode);

    let mut tokens = text.split_whitespace().enumerate();
    while let Some((position, op_token)) = tokens.next() {
        let record = position / 2 + 1;
        let op = Op::parse(op_token)
            .ok_or_else(|| format!("record {record}: unknown operation {op_token:?}"))?;
        let (_, word) = tokens
            .next()
            .ok_or_else(|| format!("record {record}: operation {op_token:?} is missing its word"))?;
        match op {
            Op::Insert => {
                index.insert(word).map_err(|err| format!("record {record}: {err}"))?;
            }
            Op::Search => println!("{} {word}", u8::from(index.contains(word))),
            Op::Delete => {
                index.remove(word);
            }
        }
    }

    if cli.print {
        for (frequency, word) in &index {
            println!("{frequency} {word}");
        }
    }

    if let Some(path) = &cli.dot {
        let mut rendered = String::new();
        index.write_dot(&mut rendered).map_err(|_| String::from("DOT rendering failed"))?;
        fs::write(path, rendered).map_err(|err| format!("cannot write {}: {err}", path.display()))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("lexitree: {message}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
