use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cyan", version, about, after_long_help = "Without files, an interactive shell is started.")]
pub struct Cli {
	/// Log pipeline stages and their timings
	#[arg(short, long)]
	pub debug: bool,
	/// Script files to run, each in its own global scope
	pub files: Vec<PathBuf>,
}
