use std::io::BufReader;

use ktss::prelude::*;

use anyhow::Context;
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

const DEFAULT_SAMPLE: &str = "abba, aaabba, bbaaa, bba";

fn input_args() -> [Arg; 3] {
    [
        Arg::new("words")
            .short('w')
            .long("words")
            .help("comma separated list of positive sample words")
            .default_value(DEFAULT_SAMPLE)
            .conflicts_with("file"),
        Arg::new("file")
            .short('f')
            .long("file")
            .help("file with one sample word per line, `-` reads from stdin"),
        Arg::new("window")
            .short('k')
            .long("window")
            .help("size of the testing window")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("3"),
    ]
}

fn cli() -> clap::Command {
    Command::new("ktss")
    .about("Infers automata for k-testable languages in the strict sense from positive samples")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .global(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("infer")
        .about("infers the automaton of the sample and prints it")
        .args(input_args())
        .arg(
            Arg::new("format")
            .long("format")
            .value_parser(["table", "dot", "sets"])
            .default_value("table")
        )
        .arg(
            Arg::new("output")
            .short('o')
            .long("output")
            .help("renders the automaton to the given PNG file using graphviz")
        )
    )
    .subcommand(
        Command::new("segments")
        .about("prints the initial segments, final segments and k-factors of the sample")
        .args(input_args())
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

fn read_sample(matches: &ArgMatches) -> anyhow::Result<Sample> {
    match matches.get_one::<String>("file").map(|f| f.as_str()) {
        Some("-") => {
            debug!("reading sample from stdin");
            Ok(Sample::try_from_read(std::io::stdin().lock())?)
        }
        Some(file_name) => {
            debug!("reading sample from {file_name}");
            let file = std::fs::File::open(file_name)
                .with_context(|| format!("unable to open sample file {file_name}"))?;
            Ok(Sample::try_from_read(BufReader::new(file))?)
        }
        None => Ok(Sample::parse_list(
            matches
                .get_one::<String>("words")
                .map(|w| w.as_str())
                .unwrap_or(DEFAULT_SAMPLE),
        )),
    }
}

fn learner(matches: &ArgMatches) -> anyhow::Result<KTssLearner> {
    let k = matches.get_one::<i64>("window").copied().unwrap_or(3);
    Ok(KTssLearner::try_new(k)?)
}

fn infer(matches: &ArgMatches) -> anyhow::Result<()> {
    let sample = read_sample(matches)?;
    info!("read sample {}", sample.show());
    let dfa = learner(matches)?.infer(&sample)?;

    match matches.get_one::<String>("format").map(|f| f.as_str()) {
        Some("dot") => println!("{}", dfa.dot_representation()),
        Some("sets") => println!("{}", dfa.show()),
        _ => println!("{}", dfa.transition_table()),
    }

    if let Some(output) = matches.get_one::<String>("output") {
        render(&dfa, output)?;
    }
    Ok(())
}

#[cfg(feature = "graphviz")]
fn render(dfa: &KTssAutomaton, output: &str) -> anyhow::Result<()> {
    dfa.render_to_file_name(output)
        .with_context(|| format!("rendering to {output} failed"))?;
    info!("rendered automaton to {output}");
    Ok(())
}

#[cfg(not(feature = "graphviz"))]
fn render(_dfa: &KTssAutomaton, _output: &str) -> anyhow::Result<()> {
    anyhow::bail!("rendering requires the `graphviz` feature")
}

fn segments(matches: &ArgMatches) -> anyhow::Result<()> {
    let sample = read_sample(matches)?;
    let (alphabet, segments) = learner(matches)?.segments(&sample);
    println!("alphabet: {}", alphabet.show());
    println!("{}", segments.table());
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match matches.subcommand() {
        Some(("infer", sub_matches)) => infer(sub_matches),
        Some(("segments", sub_matches)) => segments(sub_matches),
        _ => unreachable!(),
    }
}
