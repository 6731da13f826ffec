use g2errors_generator::config::compile_time::paths;
use g2errors_generator::emitter::Backend;
use g2errors_generator::logging::{self, codes, LogEvent};
use g2errors_generator::pipeline::{self, GenerationRequest, GeneratorError};
use std::env;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    targets: Vec<Backend>,
    include_timestamp: Option<bool>,
    check: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(message) = startup() {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &message);
        std::process::exit(1);
    }

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("g2errors-generate");

    let options = match parse_options(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            g2errors_generator::log_error!(codes::system::INVALID_ARGUMENTS, &message);
            eprintln!("Run '{} --help' for usage", program_name);
            std::process::exit(1);
        }
    };

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let mut request = GenerationRequest::new(".").with_check(options.check);
    if let Some(include_timestamp) = options.include_timestamp {
        request = request.with_timestamp(include_timestamp);
    }

    let targets = if options.targets.is_empty() {
        Backend::ALL.to_vec()
    } else {
        options.targets.clone()
    };

    let outcomes = match pipeline::generate_all(&request, &targets) {
        Ok(outcomes) => outcomes,
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_error_hint(&error);
            std::process::exit(1);
        }
    };

    let mut failed = 0;
    println!();
    for (backend, outcome) in &outcomes {
        match outcome {
            Ok(result) => println!("  ok      {}", result.summary()),
            Err(error) => {
                failed += 1;
                println!("  FAILED  {:<6} {}", backend.name(), error);
            }
        }
    }

    if failed > 0 {
        for (_, outcome) in &outcomes {
            if let Err(error) = outcome {
                print_error_hint(error);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize global logging, then self-check the generator configuration
fn startup() -> Result<(), String> {
    logging::init_global_logging()?;
    pipeline::validate_pipeline()
}

fn print_help(program_name: &str) {
    println!("G2 error table generator v{}", env!("CARGO_PKG_VERSION"));
    println!("Generates the Go and Python G2 error tables from {}", paths::INPUT_FILE);
    println!();
    println!("USAGE:");
    println!("    {} [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --target <name>     Generate only this backend (go, python); repeatable");
    println!("    --no-timestamp      Omit the 'Generated date:' banner line");
    println!("    --check             Verify artifacts are current without writing");
    println!();
    println!("OUTPUTS:");
    for backend in Backend::ALL {
        println!("    {:<8} {}", backend.name(), backend.output_file());
    }
    println!();
    println!("EXAMPLES:");
    println!("    {}                         # Regenerate everything", program_name);
    println!("    {} --target go             # Only go/main.go", program_name);
    println!("    {} --check --no-timestamp  # CI freshness check", program_name);
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                options.help = true;
            }
            "--target" => {
                let name = args
                    .get(i + 1)
                    .ok_or_else(|| "--target requires a backend name".to_string())?;
                let backend: Backend = name.parse().map_err(|e| format!("{}", e))?;
                if !options.targets.contains(&backend) {
                    options.targets.push(backend);
                }
                i += 1; // Skip the backend argument
            }
            "--no-timestamp" => {
                options.include_timestamp = Some(false);
            }
            "--check" => {
                options.check = true;
            }
            other => {
                return Err(format!("Unknown option '{}'", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_error_hint(error: &GeneratorError) {
    eprintln!("{}", error_report(error));
}

/// Error line plus the registry's category, severity and recommended action
fn error_report(error: &GeneratorError) -> String {
    LogEvent::error(error.error_code(), &error.to_string()).format_detailed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_means_everything() {
        let options = parse_options(&[]).unwrap();
        assert_eq!(options, CliOptions::default());
        assert!(options.targets.is_empty());
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&[
            "--target",
            "python",
            "--target",
            "go",
            "--target",
            "python",
            "--no-timestamp",
            "--check",
        ]))
        .unwrap();

        assert_eq!(options.targets, vec![Backend::Python, Backend::Go]);
        assert_eq!(options.include_timestamp, Some(false));
        assert!(options.check);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_options_invalid() {
        assert!(parse_options(&args(&["--target"])).is_err());
        assert!(parse_options(&args(&["--target", "rust"])).is_err());

        let err = parse_options(&args(&["--verbose"])).unwrap_err();
        assert_eq!(err, "Unknown option '--verbose'");
    }

    #[test]
    fn test_error_report_carries_registry_details() {
        let error = GeneratorError::Stale {
            backend: Backend::Go,
            path: "go/main.go".to_string(),
            reason: "content differs",
        };
        let report = error_report(&error);

        assert!(report.starts_with("[ERROR] E063 - go artifact go/main.go is out of date"));
        assert!(report.contains("Category: Emit"));
        assert!(report.contains("Recommended action:"));
    }

    #[test]
    fn test_help() {
        assert!(parse_options(&args(&["--help"])).unwrap().help);
    }
}
