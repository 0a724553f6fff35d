// CLI binary entry point for tagsniff

mod cli;

use anyhow::Context;
use clap::Parser;
use std::process;

use cli::commands::{command_detect, command_read};
use cli::{Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .init();

    match run(&config) {
        Ok(0) => {}
        Ok(failures) => {
            log::debug!("{} file(s) failed", failures);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn run(config: &Config) -> anyhow::Result<usize> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.parse_options();

    let failures = match &config.command {
        Commands::Read {
            files,
            reader,
            output,
        } => command_read(files, *reader, output.as_deref(), &options, &formatter)
            .context("read failed")?,
        Commands::Detect { files } => {
            command_detect(files, &formatter).context("detect failed")?
        }
    };

    Ok(failures)
}
