use lpvet::batch::{self, BatchConfig, BatchResults};
use lpvet::config::runtime::LogLevel;
use lpvet::config::{build_info, RuntimeConfig};
use lpvet::logging::{self, codes};
use lpvet::pipeline::{self, PipelineOutput};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when any diagnostic was issued
const EXIT_ISSUED: u8 = 1;
/// Exit status for usage and setup errors
const EXIT_USAGE: u8 = 2;

// ============================================================================
// ARGUMENT PARSING
// ============================================================================

/// Options collected from the command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    warn: Option<bool>,
    json: bool,
    threads: Option<usize>,
    sequential: bool,
    config: Option<PathBuf>,
    verbose: bool,
    summary: bool,
    paths: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum CliCommand {
    Help,
    Run(CliOptions),
}

/// Parse a boolean flag value the way Go's `strconv.ParseBool` does
fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(format!(
            "invalid boolean value {:?} for -{}: parse error",
            value, name
        )),
    }
}

fn bool_flag(name: &str, value: Option<&str>) -> Result<bool, String> {
    value.map_or(Ok(true), |v| parse_bool(name, v))
}

/// Parse arguments (without the program name).
///
/// Flags may use one or two dashes. Parsing stops at `--` or at the first
/// argument that is not a flag; everything after that is a path.
fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--" {
            i += 1;
            break;
        }
        if arg.len() < 2 || !arg.starts_with('-') {
            break;
        }

        let flag = arg.strip_prefix("--").unwrap_or(&arg[1..]);
        let (name, inline_value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        match name {
            "help" | "h" => return Ok(CliCommand::Help),
            "warn" => options.warn = Some(bool_flag(name, inline_value)?),
            "json" => options.json = bool_flag(name, inline_value)?,
            "sequential" => options.sequential = bool_flag(name, inline_value)?,
            "verbose" => options.verbose = bool_flag(name, inline_value)?,
            "summary" => options.summary = bool_flag(name, inline_value)?,
            "threads" | "config" => {
                let value = match inline_value {
                    Some(value) => value.to_string(),
                    None => {
                        i += 1;
                        args.get(i)
                            .cloned()
                            .ok_or_else(|| format!("flag needs an argument: -{}", name))?
                    }
                };

                if name == "threads" {
                    let threads = value.parse::<usize>().map_err(|_| {
                        format!("invalid value {:?} for flag -threads: parse error", value)
                    })?;
                    options.threads = Some(threads);
                } else {
                    options.config = Some(PathBuf::from(value));
                }
            }
            _ => return Err(format!("flag provided but not defined: -{}", name)),
        }
        i += 1;
    }

    options.paths = args[i..].to_vec();
    Ok(CliCommand::Run(options))
}

fn print_usage() {
    eprintln!("usage: lpvet [options] f.lp [f.lp...]");
    eprintln!("  -warn");
    eprintln!("    \tissue warnings in addition to errors");
    eprintln!("  -json");
    eprintln!("    \tprint one JSON object per file on stdout");
    eprintln!("  -threads N");
    eprintln!("    \tnumber of worker threads for several files");
    eprintln!("  -sequential");
    eprintln!("    \tcheck files one at a time");
    eprintln!("  -config FILE");
    eprintln!("    \tload settings from a TOML file");
    eprintln!("  -verbose");
    eprintln!("    \tlog internal progress at debug level");
    eprintln!("  -summary");
    eprintln!("    \tprint a processing summary after the run");
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Layer command-line options over file and environment configuration
fn build_config(options: &CliOptions) -> Result<RuntimeConfig, String> {
    let mut config = match &options.config {
        Some(path) => RuntimeConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => RuntimeConfig::default(),
    };

    if let Some(warn) = options.warn {
        config.check.issue_warnings = warn;
    }
    if let Some(threads) = options.threads {
        config.batch.max_threads = threads;
    }
    if options.sequential {
        config.batch.max_threads = 1;
    }
    if options.verbose {
        config.logging.min_log_level = LogLevel::Debug;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_text(results: &BatchResults) {
    for outcome in &results.outcomes {
        match &outcome.result {
            Ok(result) => {
                for diagnostic in &result.report.diagnostics {
                    eprintln!("lpvet: {}", diagnostic);
                }
            }
            Err(error) => eprintln!("lpvet: {}", error),
        }
    }
}

fn print_json(results: &BatchResults) {
    for outcome in &results.outcomes {
        let output = match &outcome.result {
            Ok(result) => PipelineOutput::from_result(result),
            Err(error) => PipelineOutput::from_error(&outcome.path, error),
        };
        match output.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => logging::safe_log_error(
                codes::system::INTERNAL_ERROR,
                &format!("{}: cannot encode result: {}", outcome.path, e),
            ),
        }
    }
}

fn print_summary(results: &BatchResults) {
    eprint!("{}", logging::format_cargo_style_summary());
    eprintln!("lpvet: {}", results.summary());
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(CliCommand::Help) => {
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
        Ok(CliCommand::Run(options)) => options,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if options.paths.is_empty() {
        print_usage();
        return ExitCode::from(EXIT_USAGE);
    }

    let config = match build_config(&options) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("lpvet: {}", message);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // The checker works without the logging system; a failure here only
    // loses internal logs
    if let Err(e) = logging::init_global_logging(config.logging.clone()) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
    }
    lpvet::log_debug!("lpvet starting",
        "version" => build_info::version(),
        "profile" => build_info::profile()
    );
    if let Err(e) = pipeline::validate_pipeline() {
        logging::safe_log_error(codes::system::CONFIGURATION_ERROR, &e);
    }

    let batch_config = BatchConfig::from_runtime_config(&config);
    let results = match batch::process_paths(&options.paths, &batch_config) {
        Ok(results) => results,
        Err(error) => {
            eprintln!("lpvet: [{}] {}", error.error_code(), error);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if options.json {
        print_json(&results);
    } else {
        print_text(&results);
    }

    if options.summary {
        print_summary(&results);
    }

    if results.any_issued() {
        ExitCode::from(EXIT_ISSUED)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_options(list: &[&str]) -> CliOptions {
        match parse_args(&args(list)) {
            Ok(CliCommand::Run(options)) => options,
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn test_warn_spellings() {
        assert_eq!(run_options(&["-warn", "a.lp"]).warn, Some(true));
        assert_eq!(run_options(&["--warn", "a.lp"]).warn, Some(true));
        assert_eq!(run_options(&["-warn=false", "a.lp"]).warn, Some(false));
        assert_eq!(run_options(&["a.lp"]).warn, None);
    }

    #[test]
    fn test_flags_stop_at_first_path() {
        let options = run_options(&["-json", "a.lp", "-warn", "b.lp"]);
        assert!(options.json);
        assert_eq!(options.warn, None);
        assert_eq!(options.paths, vec!["a.lp", "-warn", "b.lp"]);

        let options = run_options(&["--", "-odd.lp"]);
        assert_eq!(options.paths, vec!["-odd.lp"]);

        let options = run_options(&["-", "x.lp"]);
        assert_eq!(options.paths, vec!["-", "x.lp"]);
    }

    #[test]
    fn test_value_flags() {
        let options = run_options(&["--threads", "3", "--config=lpvet.toml", "m.lp"]);
        assert_eq!(options.threads, Some(3));
        assert_eq!(options.config, Some(PathBuf::from("lpvet.toml")));
        assert_eq!(options.paths, vec!["m.lp"]);

        assert_eq!(run_options(&["-threads=2", "m.lp"]).threads, Some(2));
    }

    #[test]
    fn test_usage_errors() {
        assert_matches!(parse_args(&args(&["-bogus", "a.lp"])), Err(msg) if msg.contains("-bogus"));
        assert_matches!(parse_args(&args(&["--threads"])), Err(msg) if msg.contains("needs an argument"));
        assert_matches!(parse_args(&args(&["--threads", "many"])), Err(_));
        assert_matches!(parse_args(&args(&["-warn=maybe", "a.lp"])), Err(_));
        assert_eq!(parse_args(&args(&["--help"])), Ok(CliCommand::Help));
        assert!(run_options(&[]).paths.is_empty());
    }

    #[test]
    fn test_build_config_overrides() {
        let options = CliOptions {
            warn: Some(true),
            threads: Some(6),
            verbose: true,
            ..CliOptions::default()
        };
        let config = build_config(&options).unwrap();
        assert!(config.check.issue_warnings);
        assert_eq!(config.batch.max_threads, 6);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);

        let options = CliOptions {
            threads: Some(4),
            sequential: true,
            ..CliOptions::default()
        };
        assert_eq!(build_config(&options).unwrap().batch.max_threads, 1);

        let options = CliOptions {
            threads: Some(0),
            ..CliOptions::default()
        };
        assert!(build_config(&options).is_err());
    }
}
