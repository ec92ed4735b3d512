use clap::Parser;
use log::error;
use std::process;
use word2vec_trainer::{Cli, Config, Run};

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // a bad mode or partition is reported and ends the program before anything is loaded
    let config = match Config::new(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Run::run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
