pub mod init;
pub mod sweep;
pub mod task;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks for a user", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Run a single reminder pass now")]
    Sweep,
    #[command(about = "Run the bot and the periodic reminder sweep")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Sweep => sweep::cmd().await,
            Commands::Watch => watch::cmd().await,
        }
    }
}
