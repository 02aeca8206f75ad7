use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Command line arguments for the `chronid` binary.
///
/// Global options may also come from the environment (or a `.env` file);
/// explicit flags win.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chronid",
    version,
    about = "Generate, parse and convert ULIDs and MongoDB ObjectIds"
)]
pub struct CliArgs {
    /// Log filter directive, e.g. `debug` or `chronid=trace`.
    ///
    /// Falls back to `RUST_LOG`, then `warn`. Logs go to stderr so stdout
    /// carries only identifiers.
    ///
    /// Environment variable: `CHRONID_LOG`
    #[arg(long, env = "CHRONID_LOG", global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    ///
    /// Environment variable: `CHRONID_LOG_FORMAT`
    #[arg(long, env = "CHRONID_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Largest `--count` accepted by the `generate` commands.
    ///
    /// Environment variable: `CHRONID_MAX_BATCH`
    #[arg(long, env = "CHRONID_MAX_BATCH", default_value_t = 10_000, global = true)]
    pub max_batch: i64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 128-bit lexicographically sortable identifiers.
    Ulid {
        #[command(subcommand)]
        command: UlidCommand,
    },
    /// 96-bit MongoDB ObjectIds.
    #[command(name = "objectid")]
    ObjectId {
        #[command(subcommand)]
        command: ObjectIdCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UlidCommand {
    /// Generate one or more ULIDs, one per line.
    Generate {
        #[arg(long, value_enum, default_value_t = UlidMode::Monotonic)]
        mode: UlidMode,
        #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },
    /// Generate a ULID for an explicit millisecond timestamp.
    Time { timestamp_ms: u64 },
    /// Validate a ULID and print its fields.
    Parse { text: String },
    /// Relabel a UUID's 16 bytes as a ULID.
    FromUuid { uuid: Uuid },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlidMode {
    /// Strictly increasing, payload incremented within a millisecond.
    Monotonic,
    /// Fresh payload from the fast generator.
    Random,
    /// Fresh payload from the cryptographically strong generator.
    Crypto,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdCommand {
    /// Generate one or more ObjectIds, one per line.
    Generate {
        #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },
    /// Generate an ObjectId for an explicit second timestamp.
    Time { timestamp_secs: u32 },
    /// Validate an ObjectId and print its fields.
    Parse { text: String },
}

/// Logging settings handed to [`init_telemetry`].
///
/// [`init_telemetry`]: crate::cli::telemetry::init_telemetry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Option<String>,
    pub format: LogFormat,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log: LogConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.max_batch <= 0 {
            bail!("CHRONID_MAX_BATCH must be greater than 0");
        }

        if let Some(count) = args.command.count() {
            if !(1..=args.max_batch).contains(&count) {
                bail!(
                    "--count ({}) must be between 1 and {} (CHRONID_MAX_BATCH)",
                    count,
                    args.max_batch
                );
            }
        }

        Ok(Self {
            log: LogConfig {
                level: args.log_level.filter(|level| !level.trim().is_empty()),
                format: args.log_format,
            },
            command: args.command,
        })
    }
}

impl Command {
    /// The requested batch size, for commands that generate batches.
    fn count(&self) -> Option<i64> {
        match self {
            Self::Ulid {
                command: UlidCommand::Generate { count, .. },
            }
            | Self::ObjectId {
                command: ObjectIdCommand::Generate { count },
            } => Some(*count),
            _ => None,
        }
    }
}
