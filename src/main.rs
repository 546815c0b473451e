mod activate;
mod args;
mod badge;
mod checksum;
mod discovery;
mod frame;
mod list;
mod message;
mod run;
mod segment;
mod send;
mod serial;
mod slot;

use tracing::Level;

fn main() -> Result<(), String> {
    let args: args::TopLevel = argh::from_env();
    init_logging(args.verbose);
    run::run(args.invocation)
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
