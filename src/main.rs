//! gocluster - cluster Gene Ontology terms by semantic similarity

use clap::Parser;

use gocluster::cli::{Cli, Command};
use gocluster::commands;
use gocluster::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	ui::header(&format!("gocluster v{}", env!("CARGO_PKG_VERSION")));

	let result = match &cli.command {
		Command::Embed { input, output, seed } => commands::embed::run(input, output, *seed),
		Command::Cluster { input, output, pipeline } => commands::cluster::run(input, output, pipeline),
		Command::Run {
			input,
			no_embed,
			output,
			pipeline,
		} => commands::run::run(input, *no_embed, output, pipeline),
	};

	if let Err(e) = result {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}
