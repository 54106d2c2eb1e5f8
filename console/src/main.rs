mod aggregate;
mod phase;
mod run;
mod utils;

use aggregate::AggregateArgs;
use clap::{
    Parser,
    Subcommand,
};
use phase::PhaseArgs;
use run::RunArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Phase domains of transcripts and write the phasing dictionary.
    Phase {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  PhaseArgs,
    },

    /// Sum transcript counts per DoCo using a phasing dictionary.
    Aggregate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AggregateArgs,
    },

    /// Phase domains and aggregate counts in one go.
    Run {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  RunArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Phase { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Aggregate { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Run { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
