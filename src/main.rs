use anyhow::{Context, Result};
use html::debug::outline;
use html::{HelpEntry, HelpIndex, ParseError, line_col, parse};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs;
use std::io::{self, Read};
use std::process::exit;

fn main() -> Result<()> {
    let matches = clap::Command::new("slowparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parses HTML and reports the first error with its source position")
        .arg(
            clap::Arg::new("file")
                .help("The file to parse (stdin when omitted)")
                .required(false)
                .index(1),
        )
        .arg(
            clap::Arg::new("json")
                .help("Print the parse result as JSON")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("outline")
                .help("Print the parsed tree, one node per line")
                .long("outline")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("at")
                .help("Describe the construct at this byte offset")
                .long("at")
                .value_name("OFFSET")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    let (label, source) = match matches.get_one::<String>("file") {
        Some(path) => {
            let source =
                fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
            (path.clone(), source)
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            ("<stdin>".to_string(), source)
        }
    };

    let result = parse(&source);

    if matches.get_flag("outline") {
        for line in outline(&result.document, &source, true) {
            println!("{line}");
        }
    }
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    if let Some(&offset) = matches.get_one::<usize>("at") {
        let index = HelpIndex::build(&result.document, &source);
        match index.lookup(offset) {
            Some(entry) => println!("{}", describe(entry, &source)),
            None => println!("nothing to describe at offset {offset}"),
        }
    }

    if let Some(error) = &result.error {
        report(&label, &source, error);
        exit(1);
    }
    Ok(())
}

fn describe(entry: &HelpEntry, source: &str) -> String {
    match entry {
        HelpEntry::Tag { name, .. } => format!("<{name}> element"),
        HelpEntry::CssSelector { highlight } => {
            format!("CSS selector `{}`", highlight.slice(source).unwrap_or(""))
        }
        HelpEntry::CssProperty { name, .. } => format!("CSS property `{name}`"),
    }
}

fn report(label: &str, source: &str, error: &ParseError) {
    let (line, col) = line_col(source, error.position());
    eprintln!("{label}:{line}:{col}: {}: {error}", error.kind());

    if let Some(text) = source.lines().nth(line - 1) {
        eprintln!("{line:<5}|{text}");
        eprintln!("     |{}^", " ".repeat(col - 1));
    }

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        eprintln!("did you mean: {}", suggestions.join(", "));
    }
}
