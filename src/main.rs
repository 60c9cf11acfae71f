use std::process::ExitCode;

use clap::Parser;

use dotdeploy::cli::{self, Command};
use dotdeploy::commands;
use dotdeploy::logging::{self, Log, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, Command::Version) {
        println!("dotdeploy {}", cli::VERSION);
        return ExitCode::SUCCESS;
    }

    let verbosity = args.verbosity();
    logging::init_subscriber(verbosity, args.command.name());
    let log = Logger::new(args.command.name());

    let result = match &args.command {
        Command::Validate(opts) => {
            commands::validate::run(&opts.profile, verbosity.is_quiet(), &log)
        }
        Command::Apply(opts) => commands::apply::run(opts, &log),
        Command::Version => Ok(commands::Outcome::Success),
    };

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(path) = log.log_path() {
                log.debug(&format!("log written to {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}
