use std::{
    fs::File,
    io::{self, BufReader},
    process::ExitCode,
};

use dfamin::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("dfamin")
        .about("Determinizes and minimizes a finite automaton given in the line format")
        .arg(
            Arg::new("input")
                .help("file containing the automaton, reads from stdin if omitted or `-`")
                .default_value("-"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("epsilon")
                .long("epsilon")
                .value_name("LABEL")
                .help("epsilon label used unless the input contains a `lambda =` line")
                .default_value(dfamin::automaton::DEFAULT_EPSILON),
        )
        .arg(
            Arg::new("initial")
                .long("initial")
                .value_name("STATE")
                .help("initial state used unless the input contains an `initnode =` line")
                .default_value(dfamin::automaton::DEFAULT_INITIAL),
        )
        .arg(
            Arg::new("keep-unreachable")
                .long("keep-unreachable")
                .help("keep states that are unreachable after determinization")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-rename")
                .long("no-rename")
                .help("keep the composite names produced by determinization")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .help("print transition tables instead of one paragraph per state")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("suppress renaming and refinement diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .value_name("SYMBOLS")
                .help("space separated word to check for acceptance, may be repeated")
                .action(ArgAction::Append),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_automaton(matches: &ArgMatches) -> Result<Automaton, Error> {
    let mut options = Options::default();
    if let Some(epsilon) = matches.get_one::<String>("epsilon") {
        options.epsilon = epsilon.clone();
    }
    if let Some(initial) = matches.get_one::<String>("initial") {
        options.initial = initial.clone();
    }

    match matches.get_one::<String>("input").map(String::as_str) {
        None | Some("-") => {
            debug!("reading automaton from stdin");
            Automaton::from_reader(io::stdin().lock(), &options)
        }
        Some(path) => {
            debug!("reading automaton from {path}");
            Automaton::from_reader(BufReader::new(File::open(path)?), &options)
        }
    }
}

fn print(aut: &Automaton, table: bool) {
    if table {
        println!("{}", aut.show());
    } else {
        print!("{aut}");
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let table = matches.get_flag("table");
    let mut sink: Box<dyn Sink> = if matches.get_flag("quiet") {
        Box::new(())
    } else {
        Box::new(WriteSink::new(io::stdout()))
    };

    let nfa = read_automaton(matches)?;
    info!(
        "read automaton with {} states and {} symbols",
        nfa.size(),
        nfa.alphabet().len()
    );

    let start = std::time::Instant::now();
    let mut dfa = nfa.determinize(!matches.get_flag("keep-unreachable"));
    info!(
        "determinization produced {} states in {}µs",
        dfa.size(),
        start.elapsed().as_micros()
    );

    if !matches.get_flag("no-rename") {
        dfa = dfa.rename(&mut *sink).0;
    }
    print(&dfa, table);
    println!("*******************************");

    let start = std::time::Instant::now();
    let min = dfa.minimize(&mut *sink)?;
    info!(
        "minimization produced {} states in {}µs",
        min.size(),
        start.elapsed().as_micros()
    );
    println!("*******************************");
    print(&min, table);

    if let Some(words) = matches.get_many::<String>("word") {
        for word in words {
            let symbols: Vec<&str> = word.split_whitespace().collect();
            let verdict = if min.accepts(&symbols) {
                "accepted"
            } else {
                "rejected"
            };
            println!("\"{word}\": {verdict}");
        }
    }

    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
