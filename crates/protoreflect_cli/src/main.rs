#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod logging;

#[derive(Parser)]
#[command(name = "protoreflect", about = "Protocol buffer reflection tools")]
struct Cli {
	/// Log at debug level unless RUST_LOG says otherwise.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print camel, pascal and snake casings of identifiers.
	Names(cmd::names::Args),
	/// List the records of a hex-encoded raw wire run.
	Wire(cmd::wire::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> protoreflect::reflect::Result<()> {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match cli.command {
		Commands::Names(args) => cmd::names::run(args),
		Commands::Wire(args) => cmd::wire::run(args),
	}
}
