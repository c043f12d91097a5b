use std::path::PathBuf;

mod clear;
mod config;
mod edit;
mod export;
mod extract;
mod list;
mod save;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use clear::Clear;
use edit::Edit;
use export::Export;
use extract::Extract;
use list::List;
use reqtract::{Config, Directory, Pipeline, Session, SessionKey, SessionStore};
use save::Save;

/// The name of the configuration file inside the root directory.
const CONFIG_FILE: &str = "config.toml";

/// The directory inside the root that session files are kept in.
const SESSIONS_DIR: &str = "sessions";

/// Parse a session key at the CLI boundary.
fn parse_session_key(s: &str) -> Result<SessionKey, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding configuration and sessions
    #[arg(short, long, default_value = ".reqx", global = true)]
    root: PathBuf,

    /// The session to work on
    #[arg(
        short,
        long,
        default_value = "default",
        value_parser = parse_session_key,
        global = true
    )]
    session: SessionKey,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut workspace = Workspace::new(self.root, self.session);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&mut workspace)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Extract requirements from a document, replacing the session's
    /// collection
    Extract(Extract),

    /// List the session's requirements (default)
    List(List),

    /// Replace the session's requirements with an edit form
    ///
    /// The form is a JSON object of field names to values: `row-count`, then
    /// `id-N`, `text-N`, `category-N` and `source-N` for each row.
    Save(Save),

    /// Review and edit the session's requirements interactively
    Edit(Edit),

    /// Export the session's requirements as CSV
    Export(Export),

    /// Empty the session
    ///
    /// With --forget the session file is deleted rather than emptied.
    Clear(Clear),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        match self {
            Self::Extract(command) => command.run(workspace)?,
            Self::List(command) => command.run(workspace)?,
            Self::Save(command) => command.run(workspace)?,
            Self::Edit(command) => command.run(workspace)?,
            Self::Export(command) => command.run(workspace)?,
            Self::Clear(command) => command.run(workspace)?,
            Self::Config(command) => command.run(&workspace.config_path())?,
        }
        Ok(())
    }
}

/// The root directory, and the session a command works on.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    key: SessionKey,
    store: Directory,
}

impl Workspace {
    fn new(root: PathBuf, key: SessionKey) -> Self {
        let store = Directory::new(root.join(SESSIONS_DIR));
        Self { root, key, store }
    }

    pub const fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn config(&self) -> Config {
        Config::load_or_default(&self.config_path())
    }

    /// Build the pipeline described by the configuration.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::from_config(&self.config(), &self.root)
    }

    /// The current session, empty if it has never been saved.
    pub fn open(&self) -> anyhow::Result<Session> {
        self.store
            .open(&self.key)
            .with_context(|| format!("failed to open session '{}'", self.key))
    }

    pub fn save(&mut self, session: &Session) -> anyhow::Result<()> {
        self.store
            .save(&self.key, session)
            .with_context(|| format!("failed to save session '{}'", self.key))
    }

    pub fn remove(&mut self) -> anyhow::Result<()> {
        self.store
            .remove(&self.key)
            .with_context(|| format!("failed to remove session '{}'", self.key))
    }
}
