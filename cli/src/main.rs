mod scenario;

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use mediator::{sim::SimEngine, Config, Mediator};
use protocol::{Notification, ToMessage};

use crate::scenario::Scenario;

pub const PROGNAME: &str = "mediator";
pub const CONFIG_NAME: &str = "config.toml";

#[derive(Parser)]
#[command(version, about = "Drives a playback mediator against a simulated engine")]
struct Cli {
    /// Config file to use instead of the one in the config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging, can be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the commands of a scenario file and print every notification
    Replay {
        scenario: PathBuf,
        /// Also show the size of each notification as a protocol message
        #[arg(long)]
        wire: bool,
    },
    /// Print the configuration in effect
    Config,
}

fn init_logger(verbose: u8) {
    use log::LevelFilter;

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .level(LevelFilter::Off)
        .level_for("mediator", level)
        .level_for("mediator_cli", level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply()
        .expect("no logger should have been set yet");
}

fn conf_dir() -> anyhow::Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("could not get config dir")?
        .join(PROGNAME))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::read(path)
            .with_context(|| format!("reading config file at {:?}", path)),
        None => {
            let path = conf_dir()?.join(CONFIG_NAME);
            Config::read_or_default(&path)
                .with_context(|| format!("reading config file at {:?}", path))
        }
    }
}

fn describe(notification: &Notification) -> String {
    use Notification::*;
    let name = notification.name();
    match notification {
        StateChanged(state) => format!("{} {}", name.green().bold(), state),
        TimeChanged { time, length } => {
            format!("{} {} / {}", name.dimmed(), time, length).dimmed().to_string()
        }
        TitleChanged(title) => format!("{} {:?}", name.blue().bold(), title),
        ChaptersAvailable(chapters) => {
            let mut out = name.cyan().bold().to_string();
            for chapter in chapters {
                out.push_str(&format!("\n    {} {}", chapter.index, chapter.label));
            }
            out
        }
        VideoTracksAvailable(tracks)
        | AudioTracksAvailable(tracks)
        | SubtitleTracksAvailable(tracks) => {
            let mut out = name.cyan().bold().to_string();
            for track in tracks {
                out.push_str(&format!("\n    {}", track.label));
            }
            out
        }
        VideoSizeChanged { width, height } => {
            format!("{} {}x{}", name.magenta().bold(), width, height)
        }
        Status(status) => format!("{} {:#?}", name.bold(), status),
    }
}

fn replay(config: Config, path: &Path, wire: bool) -> anyhow::Result<()> {
    let scenario = Scenario::read(path)?;
    log::info!(
        "Replaying {} commands from {:?}",
        scenario.commands.len(),
        path
    );

    let engine = Rc::new(RefCell::new(SimEngine::new(scenario.media)));
    let mut mediator = Mediator::new(config);
    mediator.subscribe(move |n: &Notification| {
        println!("{} {}", "<".bold(), describe(n));
        if wire {
            match n.clone().to_message().serialize() {
                Ok(bytes) => println!("  ({} bytes)", bytes.len()),
                Err(e) => log::error!("Could not serialize {}: {}", n.name(), e),
            }
        }
    });
    mediator.attach(&engine, true);

    for command in scenario.commands {
        println!("{} {:?}", ">".yellow().bold(), command);
        mediator.execute(command);
        let handled = mediator.dispatch_pending();
        log::debug!("{} engine events after the command", handled);
    }

    let engine = engine.borrow();
    for message in engine.messages() {
        println!("{} {}", "osd".dimmed(), message);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = read_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Replay { scenario, wire } => replay(config, &scenario, wire),
        Commands::Config => {
            println!("{:#?}", config);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:?}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
