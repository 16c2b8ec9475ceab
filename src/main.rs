use anyhow::Context;
use clap::Parser;

use xtouch_mini_controller::{Args, Controller, Settings};

fn init_logger(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(ref filters) = args.log_level {
        builder.parse_filters(filters);
    }

    builder.init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = Settings::load(args).context("Couldn't load settings")?;
    log::debug!("Running with {settings:?}");

    Controller::run(&settings).context("Controller failure")?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(&args);

    match run(&args) {
        Ok(()) => log::info!("Exiting"),
        Err(err) => {
            log::error!("Error: {err}");
            for source in err.chain().skip(1) {
                log::error!("\t{source}");
            }

            std::process::exit(1);
        }
    }
}
