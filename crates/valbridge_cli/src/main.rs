#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "valbridge", about = "Dynamic value literal inspection tools")]
struct Cli {
	/// Log conversion and parse decisions at debug level.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Show(cmd::show::Args),
	Info(cmd::info::Args),
	Get(cmd::get::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> valbridge::bridge::Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Show(args) => cmd::show::run(args),
		Commands::Info(args) => cmd::info::run(args),
		Commands::Get(args) => cmd::get::run(args),
	}
}

fn init_logging(verbose: bool) {
	let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
	if verbose {
		builder.filter_level(log::LevelFilter::Debug);
	}
	builder.init();
}
