use clap::{Parser, Subcommand};
use log::error;
use netdepth::{
    apsp::{ApspOptions, Sweep},
    cli,
    config::{from_json_file, DepthConfig, DistanceConfig},
    error::Result,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, about, version = env!("GIT_HASH"))]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shortest path distances between all pairs of nodes of a network
    Distance {
        /// Input network file (labels, then `*Edges`, then `a b w` lines)
        #[clap(short, long, required_unless_present = "config")]
        input: Option<PathBuf>,
        /// Output distance matrix file (`.gz` to compress)
        #[clap(short, long, required_unless_present = "config")]
        output: Option<PathBuf>,
        /// JSON config file with `input_path`, `output_path` and `apsp`
        #[clap(long, conflicts_with_all = &["input", "output"])]
        config: Option<PathBuf>,
        /// Sweep each round on a single thread
        #[clap(long, conflicts_with = "config")]
        serial: bool,
        /// Show a progress bar over rounds
        #[clap(long, conflicts_with = "config")]
        progress: bool,
    },
    /// Projection depth of embedded nodes
    Depth {
        /// Input coordinate file (one row per node)
        #[clap(short, long)]
        coords: PathBuf,
        /// Network file the coordinates were computed from, for node labels.
        /// If not specified, nodes are labeled 1..n.
        #[clap(short, long)]
        network: Option<PathBuf>,
        /// Output TSV file `label<TAB>depth`
        #[clap(short, long)]
        output: PathBuf,
        /// Compute on a single thread
        #[clap(long)]
        serial: bool,
        /// Number of the most central nodes to log
        #[clap(long, default_value_t = 10)]
        top: usize,
    },
}

fn sweep(serial: bool) -> Sweep {
    if serial {
        Sweep::Serial
    } else {
        Sweep::Parallel
    }
}

fn run(opts: &Opts) -> Result<()> {
    match &opts.command {
        Commands::Distance {
            input,
            output,
            config: config_path,
            serial,
            progress,
        } => {
            let config = match config_path {
                Some(path) => from_json_file(path)?,
                None => {
                    // clap requires both `input` and `output` here
                    let mut config = DistanceConfig::new(
                        input.clone().unwrap_or_default(),
                        output.clone().unwrap_or_default(),
                    );
                    config.apsp = ApspOptions {
                        sweep: sweep(*serial),
                        progress: *progress,
                    };
                    config
                }
            };
            println!("# config={:?}", config);
            cli::distance(&config)?;
        }
        Commands::Depth {
            coords,
            network,
            output,
            serial,
            top,
        } => {
            let mut config = DepthConfig::new(coords.clone(), network.clone(), output.clone());
            config.sweep = sweep(*serial);
            config.top = *top;
            println!("# config={:?}", config);
            cli::depth(&config)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# n_threads={}", rayon::current_num_threads());
    println!("# git_hash={}", env!("GIT_HASH"));
    println!("# opts={:?}", opts);
    if let Err(e) = run(&opts) {
        error!("{}", e);
        println!("# failed_at={}", chrono::Local::now());
        std::process::exit(1);
    }
    println!("# finished_at={}", chrono::Local::now());
}

//
// tests
//
