use std::process::ExitCode;

use clap::Parser;
use cyan::cli::*;
use log::{LevelFilter, error};

fn main() -> ExitCode {
	let cli = Cli::parse();

	let mut logger = env_logger::Builder::from_default_env();
	if cli.debug {
		logger.filter_level(LevelFilter::Debug);
	}
	logger.init();

	run(cli)
}

fn run(cli: Cli) -> ExitCode {
	let mut cyan = cyan::Cyan::new();
	if cli.files.is_empty() {
		cyan.run_prompt();
		return ExitCode::SUCCESS;
	}

	let mut code = ExitCode::SUCCESS;
	for path in &cli.files {
		if !path.exists() {
			error!("No such file: {}", path.display());
			code = ExitCode::FAILURE;
			continue;
		}
		if let Err(e) = cyan.run_file(path) {
			println!("{}", e.to_display_string());
			code = ExitCode::FAILURE;
		}
	}
	code
}
