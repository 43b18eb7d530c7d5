mod result;
mod signal_termination;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dance_solver::report::dance_listing;
use dance_solver::report::json_report;
use dance_solver::report::text_report;
use dance_solver::Dancer;
use dance_solver::Instance;
use dance_solver::SolverOptions;
use log::error;
use log::info;
use log::LevelFilter;
use pumpkin_solver::statistics::configure_statistic_logging;
use result::DanceSolverResult;
use signal_termination::SignalTermination;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to solve, given as a JSON file with the following top-level fields:
    ///  - 'dancers': objects with an 'id', and optionally 'active' and 'name',
    ///  - 'dances': objects with an 'id', a list of 'positions' and optionally a 'name',
    ///  - 'preferences': objects with a 'dancer', 'dance', 'position' and a 'preference' which
    ///    is one of "no", "maybe", "yes" or "favourite".
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The dancers who are available, given by name (or by identifier for dancers without a
    /// name). Can be given multiple times.
    ///
    /// When absent, every dancer of the instance is available.
    #[arg(short = 'd', long = "dancer", verbatim_doc_comment)]
    dancers: Vec<String>,

    /// Print the names of the active dancers of the instance instead of solving it.
    ///
    /// Possible values: bool
    #[arg(long = "list-active-dancers", verbatim_doc_comment)]
    list_active_dancers: bool,

    /// Print every dance with, per position, the dancers willing to dance it and their
    /// preference, instead of solving the instance.
    ///
    /// Possible values: bool
    #[arg(long = "list-dances", verbatim_doc_comment)]
    list_dances: bool,

    /// The time budget for the solver, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The maximum number of decisions the solver may make.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "decision-limit", verbatim_doc_comment)]
    decision_limit: Option<u64>,

    /// Print the outcome as JSON instead of listing the performed dances.
    ///
    /// Possible values: bool
    #[arg(long = "json", verbatim_doc_comment)]
    json: bool,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging(
            "%% dance-stat:",
            Some("%% dance-stat-end"),
            None,
            Some(Box::new(std::io::stderr())),
        );
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // The report itself goes to stdout.
    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> DanceSolverResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    let mut instance = Instance::from_path(&args.instance_path)?;
    if !args.dancers.is_empty() {
        instance = instance.restricted_to(args.dancers.iter().map(String::as_str))?;
    }

    let mut stdout = std::io::stdout().lock();

    if args.list_active_dancers {
        let names = instance
            .active_dancers()
            .map(Dancer::display_name)
            .collect::<Vec<_>>();
        writeln!(stdout, "{}", names.join(", "))?;
        return Ok(());
    }

    if args.list_dances {
        write!(
            stdout,
            "{}",
            dance_listing(&instance.dancers, &instance.dances, &instance.preferences)
        )?;
        return Ok(());
    }

    let options = SolverOptions {
        time_limit: args.time_limit.map(Duration::from_millis),
        decision_budget: args.decision_limit,
        log_statistics: args.log_statistics,
    };

    let outcome = instance
        .solver()
        .with_options(options)
        .get_possible_dances_until(SignalTermination::install()?);
    info!("Status: {}", outcome.solution.status());

    if args.json {
        writeln!(stdout, "{}", json_report(&instance.dances, &outcome)?)?;
    } else {
        write!(
            stdout,
            "{}",
            text_report(&instance.dancers, &instance.dances, &outcome.solution)
        )?;
    }

    Ok(())
}
