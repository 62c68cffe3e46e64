//! Command-line driver (spec.md §6, SPEC_FULL.md §5): thin `clap` wrapper
//! around the `bidex` library. Exit code 0 on success, 1 on any error, with
//! `"<context> - <reason>"` written to stderr — matching spec.md §7's
//! user-visible error contract exactly.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use bidex::config::Config;
use bidex::db::Database;
use bidex::error::Result;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bidex", about = "An embedded on-disk bigram inverted-index search engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new database.
    Create {
        #[arg(long = "attr")]
        attrs: Vec<String>,
        path: PathBuf,
    },
    /// Index a document read from standard input.
    Put {
        #[arg(long = "attr", value_parser = parse_attr_value)]
        attrs: Vec<(String, String)>,
        path: PathBuf,
    },
    /// Fetch a document body or attribute value.
    Get {
        #[arg(long = "attr")]
        attr: Option<String>,
        path: PathBuf,
        doc_id: u32,
    },
    /// Evaluate a boolean query and print matching doc ids.
    Search { path: PathBuf, query: String },
    /// Print every indexed term, one per line.
    Words { path: PathBuf },
}

fn parse_attr_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once(':')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Create { attrs, path } => {
            let config = Config::new(path).with_attrs(attrs);
            Database::create(&config)
        }
        Command::Put { attrs, path } => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .map_err(|e| bidex::error::Error::new(bidex::error::ErrorKind::Io, e.to_string()))?;
            let attr_refs: Vec<(&str, &str)> = attrs
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();

            let mut db = Database::open_write(&path)?;
            let doc_id = db.put(&body, &attr_refs)?;
            db.close()?;
            println!("{}", doc_id.0);
            Ok(())
        }
        Command::Get { attr, path, doc_id } => {
            let db = Database::open_read(&path)?;
            let value = db.get(doc_id.into(), attr.as_deref())?;
            println!("{value}");
            Ok(())
        }
        Command::Search { path, query } => {
            let db = Database::open_read(&path)?;
            let mut hits = db.search(&query)?;
            hits.sort();
            for doc_id in hits {
                println!("{}", doc_id.0);
            }
            Ok(())
        }
        Command::Words { path } => {
            let db = Database::open_read(&path)?;
            for term in db.words()? {
                println!("{term}");
            }
            Ok(())
        }
    }
}
