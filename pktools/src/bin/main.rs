use clap::{Parser, Subcommand};
use pktools::{detect, inspect};

#[derive(Parser)]
struct Opts {
    #[command(subcommand)]
    tool: ToolOpts,
}

#[derive(Subcommand)]
enum ToolOpts {
    Detect(detect::Opts),
    Inspect(inspect::Opts),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    match opts.tool {
        ToolOpts::Detect(opts) => detect::run(opts),
        ToolOpts::Inspect(opts) => inspect::run(opts),
    }
}
