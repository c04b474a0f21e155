use clap::{App, Arg};
use dpllsat::brute_force::solve_brute_force;
use dpllsat::formula::dimacs::{DimacsParseError, Instance, Instances};
use dpllsat::report::{Comparison, Summary};
use dpllsat::Solver;
use env_logger::Env;
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
enum DriverError {
    #[error("{path}: {source}")]
    File { path: String, source: io::Error },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            2
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn main_with_err() -> Result<i32, DriverError> {
    let matches = App::new("dpll")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves CNF instances with DPLL, optionally cross-checking a brute-force oracle")
        .arg(
            Arg::with_name("INPUT")
                .help("input file of one or more CNF instances (stdin if omitted)")
                .index(1),
        )
        .arg(
            Arg::with_name("verify")
                .long("verify")
                .help("cross-check every verdict against exhaustive enumeration"),
        )
        .arg(
            Arg::with_name("trace")
                .long("trace")
                .value_name("FILE")
                .takes_value(true)
                .help("write a boxed report for every instance to FILE"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .help("write the summary and per-instance results to FILE"),
        )
        .get_matches();

    let input: Box<dyn BufRead> = match matches.value_of("INPUT") {
        Some(path) => Box::new(BufReader::new(open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut trace = matches.value_of("trace").map(create).transpose()?;
    let verify = matches.is_present("verify");

    let mut summary = Summary::default();
    for (index, instance) in Instances::new(input).enumerate() {
        let index = index + 1;
        let instance = match instance {
            Ok(instance) => instance,
            Err(DimacsParseError::Io(e)) => return Err(e.into()),
            Err(e) => {
                warn!("skipping WFF {}: {}", index, e);
                summary.record_skipped();
                continue;
            }
        };

        let comparison = compare(index, instance, verify);
        println!("{}", comparison.status_line());
        if let Some(trace) = trace.as_mut() {
            comparison.write_trace(trace)?;
        }
        summary.record(&comparison);
    }

    if let Some(trace) = trace.as_mut() {
        trace.flush()?;
    }
    if let Some(path) = matches.value_of("output") {
        let mut output = create(path)?;
        write!(output, "{}", summary)?;
        output.flush()?;
    }

    info!(
        "{} WFFs tested, {} mismatching, {} skipped",
        summary.tested, summary.mismatching, summary.skipped
    );
    Ok(if summary.all_agree() { 0 } else { 1 })
}

fn compare(index: usize, instance: Instance, verify: bool) -> Comparison {
    let start = Instant::now();
    let dpll = Solver::new(&instance.formula).solve();
    let dpll_time = start.elapsed();

    let oracle = if verify {
        // a header that undercounts variables must not hide literals from the oracle
        let num_variables = instance.num_variables.max(instance.formula.max_variable());
        let start = Instant::now();
        match solve_brute_force(&instance.formula, num_variables) {
            Ok(result) => Some((result, start.elapsed())),
            Err(e) => {
                warn!("WFF {} not verified: {}", index, e);
                None
            }
        }
    } else {
        None
    };

    Comparison {
        index,
        formula: instance.formula,
        dpll,
        dpll_time,
        oracle,
    }
}

fn open(path: &str) -> Result<File, DriverError> {
    File::open(path).map_err(|source| DriverError::File {
        path: path.to_string(),
        source,
    })
}

fn create(path: &str) -> Result<BufWriter<File>, DriverError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| DriverError::File {
            path: path.to_string(),
            source,
        })
}
