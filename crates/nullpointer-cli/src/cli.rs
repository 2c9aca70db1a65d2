use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use nullpointer_core::service_url::DEFAULT_SERVICE_URL;
use nullpointer_core::ServiceUrl;
use nullpointer_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const SERVICE_URL_ENV: &str = "NPY_SERVICE_URL";
pub const HISTORY_FILE_ENV: &str = "NPY_HISTORY_FILE";
pub const TIMEOUT_ENV: &str = "NPY_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "NPY_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormatArg {
    #[default]
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Pretty => write!(f, "pretty"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Upload files, shorten URLs and mirror remote files through a null pointer
/// service such as 0x0.st.
#[derive(Debug, Parser)]
#[command(name = "npy", version)]
pub struct Cli {
    /// Service to talk to.
    #[arg(long, global = true, env = SERVICE_URL_ENV, default_value = DEFAULT_SERVICE_URL)]
    pub service: ServiceUrl,

    /// History file to use instead of ~/.local/share/nullpynter/history.
    #[arg(long, global = true, env = HISTORY_FILE_ENV)]
    pub history_file: Option<PathBuf>,

    /// Keep the history in memory only for this run.
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = TIMEOUT_ENV)]
    pub timeout: Option<u64>,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a local file.
    Upload {
        path: PathBuf,
        /// Upload even if this file was already uploaded to the service.
        #[arg(long)]
        force: bool,
    },
    /// Shorten a URL.
    Shorten {
        url: String,
        /// Shorten even if this URL was already shortened by the service.
        #[arg(long)]
        force: bool,
    },
    /// Have the service fetch and host a remote file.
    Remote {
        url: String,
        /// Mirror even if this URL was already mirrored by the service.
        #[arg(long)]
        force: bool,
    },
    /// Print the service's landing page.
    Info,
    /// Inspect or edit the local history.
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List recorded submissions for the service.
    List {
        /// List every service.
        #[arg(long)]
        all: bool,
    },
    /// Remove one record. The file stays on the service.
    Forget {
        /// Response URL of the record. Takes precedence over --item.
        #[arg(long, required_unless_present = "item")]
        response: Option<String>,
        /// Submitted file path or URL of the record, searched across all services.
        #[arg(long)]
        item: Option<String>,
    },
    /// Remove all records for the service.
    Clear {
        /// Remove records for every service.
        #[arg(long)]
        all: bool,
    },
}
