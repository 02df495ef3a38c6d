mod config_cmd;
mod context;
mod dashboard;
mod diary;
mod login;
mod logout;
mod pages;
mod register;
mod status;
mod training_parser;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fmt;

pub use context::{with_spinner, AppContext};
pub use dashboard::DashboardCommand;
pub use diary::DiaryAddCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use register::RegisterCommand;
pub use status::StatusCommand;
pub use training_parser::{ParsedTraining, TrainingParser};

#[derive(Parser)]
#[command(name = "sportclub")]
#[command(about = "Terminal client for the SportCenter club", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SPORTCLUB_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the club
    Login(LoginCommand),

    /// Log out and forget the stored credential
    Logout(LogoutCommand),

    /// Create a new account
    Register(RegisterCommand),

    /// Show session state, visible pages and backend reachability
    Status(StatusCommand),

    /// Open a page by its path (e.g. /diary)
    Open {
        /// Client-side path
        path: String,
    },

    /// Home page with the coach's advice
    Home,

    /// Browse and join sections
    #[command(subcommand)]
    Sections(SectionsSubcommands),

    /// Training diary
    #[command(subcommand)]
    Diary(DiarySubcommands),

    /// List club members
    Users,

    /// About the club
    About,

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum SectionsSubcommands {
    /// List available sections
    List,

    /// Join a section
    Join {
        /// Section ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum DiarySubcommands {
    /// List logged trainings
    List,

    /// Log a new training
    Add(DiaryAddCommand),
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Marker for a command whose failure was already shown to the user
#[derive(Debug)]
pub struct CommandFailed;

impl fmt::Display for CommandFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command failed")
    }
}

impl std::error::Error for CommandFailed {}

pub(crate) fn fail_if(failed: bool) -> Result<()> {
    if failed {
        Err(CommandFailed.into())
    } else {
        Ok(())
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(config_path).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(config_path, force).await
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let ctx = AppContext::load(config_path)?;
                dispatch(command, &ctx).await
            }
        }
    }
}

async fn dispatch(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Login(cmd) => cmd.execute(ctx).await,
        Commands::Logout(cmd) => cmd.execute(ctx).await,
        Commands::Register(cmd) => cmd.execute(ctx).await,
        Commands::Status(cmd) => cmd.execute(ctx).await,
        Commands::Open { path } => pages::open(ctx, &path).await,
        Commands::Home => pages::home(ctx).await,
        Commands::Sections(subcmd) => match subcmd {
            SectionsSubcommands::List => pages::sections(ctx).await,
            SectionsSubcommands::Join { id } => pages::join_section(ctx, id).await,
        },
        Commands::Diary(subcmd) => match subcmd {
            DiarySubcommands::List => pages::diary(ctx).await,
            DiarySubcommands::Add(cmd) => cmd.execute(ctx).await,
        },
        Commands::Users => pages::users(ctx).await,
        Commands::About => pages::about(ctx).await,
        Commands::Dashboard(cmd) => cmd.execute(ctx).await,
        Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
