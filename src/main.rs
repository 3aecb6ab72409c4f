use clap::Parser;
use normatrend::{App, Config, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "normatrend")]
#[command(author, version, about = "Monthly normality trend chart generator", long_about = None)]
struct Args {
    #[arg(short, long, help = "Directory to scan for the input workbook")]
    dir: Option<String>,

    #[arg(short, long, help = "Path to custom config file")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Output PNG path")]
    output: Option<String>,

    #[arg(long, help = "Do not open the rendered chart")]
    no_display: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    log::info!("Starting normatrend v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref())?;

    if let Some(dir) = args.dir {
        config.input.data_dir = dir;
    }
    if let Some(output) = args.output {
        config.chart.output_file = output;
    }

    App::new(config, !args.no_display).run()
}
