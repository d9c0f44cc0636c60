use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use eyre::WrapErr;
use structopt::StructOpt;
use tracing::Level;

use redstone_sandbox::cursor::Cursor;
use redstone_sandbox::render::{describe_blocks, render};
use redstone_sandbox::scenario::Scenario;
use redstone_sandbox::simulator::{Simulator, SimulatorConfig, K_DEFAULT_CASCADE_LIMIT};
use redstone_sandbox::world::{DimSize, HistoryPolicy};

#[derive(Debug, StructOpt)]
#[structopt(name = "redstone-sandbox", about = "Replay a redstone sandbox scenario")]
struct Opt {
    /// Scenario file (JSON)
    #[structopt(parse(from_os_str))]
    scenario: PathBuf,

    #[structopt(long, default_value = "50")]
    width: usize,

    #[structopt(long, default_value = "50")]
    height: usize,

    /// Drop overwritten blocks from the placement list
    #[structopt(long)]
    prune_history: bool,

    /// Max circuit settles per update
    #[structopt(long)]
    cascade_limit: Option<usize>,

    #[structopt(long, default_value = "redstone.log", parse(from_os_str))]
    log_file: PathBuf,

    #[structopt(short, long)]
    verbose: bool,

    /// Print every placed block after the frame
    #[structopt(long)]
    list: bool,
}

fn init_logging(opt: &Opt) -> eyre::Result<()> {
    let file = File::create(&opt.log_file)
        .wrap_err_with(|| format!("Cannot create log file {:?}", opt.log_file))?;

    tracing_subscriber::fmt()
        .with_max_level(if opt.verbose { Level::DEBUG } else { Level::INFO })
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!("redstone log file opened");

    Ok(())
}

fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();
    init_logging(&opt)?;

    let scenario = Scenario::load(&opt.scenario)?;

    let config = SimulatorConfig {
        size: DimSize(
            scenario.width.unwrap_or(opt.width),
            scenario.height.unwrap_or(opt.height),
        ),
        history: if opt.prune_history {
            HistoryPolicy::Prune
        } else {
            HistoryPolicy::Keep
        },
        cascade_limit: opt.cascade_limit.unwrap_or(K_DEFAULT_CASCADE_LIMIT),
    };

    eyre::ensure!(
        config.size.width() > 0 && config.size.height() > 0,
        "Grid must not be empty, got {:?}",
        config.size
    );

    tracing::info!("simulator config: {:?}", config);

    let mut sim = Simulator::new(config);
    let mut cursor = Cursor::default();

    let propagation = scenario
        .replay(&mut sim, &mut cursor)
        .wrap_err_with(|| format!("Cannot replay scenario {:?}", opt.scenario))?;

    tracing::info!("replay done: {} circuit settles", propagation.settled);
    if propagation.truncated {
        tracing::warn!("the cascade limit cut at least one update short");
    }

    println!("{}", render(&sim, None));

    if opt.list {
        println!("{}", describe_blocks(&sim));
    }

    Ok(())
}
