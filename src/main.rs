use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use collectathon::game;
use collectathon::level::LevelData;
use collectathon::resources::gameconfig::GameConfig;
use collectathon::resources::input::InputBindings;
use collectathon::resources::progress::ProgressTracker;
use collectathon::resources::replication::{RemoteObserver, ReplicationHub};
use log::{error, info, warn};

#[derive(Parser)]
#[command(version, about = "Headless collect-the-pickups session runner")]
struct Cli {
    /// INI configuration file. Defaults are used if it does not exist.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level description (JSON).
    #[arg(long, value_name = "PATH", default_value = "assets/levels/demo.json")]
    level: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Tick length in seconds. Defaults to 1 / tick_rate from the config.
    #[arg(long)]
    dt: Option<f32>,

    /// Remote observers to connect to the replication hub.
    #[arg(long, default_value_t = 2)]
    observers: usize,

    /// Override the gameplay RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if cli.config.exists() {
        if let Err(e) = config.load_from_file() {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    } else {
        warn!("Config {} not found, using defaults", cli.config.display());
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.write_config {
        return match config.save_to_file() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }
    let dt = cli.dt.unwrap_or_else(|| config.tick_seconds());

    let level = match LevelData::load_from_file(&cli.level) {
        Ok(level) => level,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut world = match game::build_world(config, InputBindings::default_hero(), level) {
        Ok(world) => world,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut observers: Vec<RemoteObserver> = {
        let mut hub = world.resource_mut::<ReplicationHub>();
        (0..cli.observers).map(|_| hub.connect()).collect()
    };

    let mut schedule = game::build_update_schedule();
    game::run(&mut world, &mut schedule, cli.ticks, dt, |_| {
        for observer in observers.iter_mut() {
            for message in observer.poll() {
                info!("Observer {} received {:?}", observer.id(), message);
            }
        }
    });

    let tracker = world.resource::<ProgressTracker>();
    info!(
        "Ran {} ticks: score {}, resources {}, {}/{} pickups ({:.1}%)",
        cli.ticks,
        tracker.score(),
        tracker.total_resources(),
        tracker.pickups_collected(),
        tracker.total_pickups(),
        tracker.completion_percent()
    );
    for observer in &observers {
        let replica = observer.replica();
        info!(
            "Observer {}: {} coin(s), result {:?}",
            observer.id(),
            replica.total_level_coins,
            replica.level_result
        );
    }
    ExitCode::SUCCESS
}
