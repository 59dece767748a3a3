/// Version injected at compile time via CCLOUD_PROVIDER_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CCLOUD_PROVIDER_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use ccloud_provider::ccloud::client::CcloudClient;
use ccloud_provider::ccloud::http::format_api_error;
use ccloud_provider::config::Config;
use ccloud_provider::resource::{Provider, ResourceData, ResourceKind};
use ccloud_provider::ProviderError;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Drive Confluent Cloud resource lifecycle operations by hand
#[derive(Parser, Debug)]
#[command(name = "ccloud-provider", version, about, long_about = None)]
struct Args {
    /// Log level for debugging (written to the log file)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Management API endpoint (defaults to https://api.confluent.cloud)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Cloud API key (overrides environment and config file)
    #[arg(long, global = true, requires = "api_secret")]
    api_key: Option<String>,

    /// Cloud API secret
    #[arg(long, global = true, requires = "api_key")]
    api_secret: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print attribute schemas as JSON
    Schema {
        /// Resource kind (all kinds when omitted)
        kind: Option<ResourceKind>,
    },
    /// Create a resource from declared attributes
    Create {
        kind: ResourceKind,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Refresh a resource from its stored state
    Read {
        kind: ResourceKind,
        /// Stored state file (YAML or JSON)
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Apply planned attributes to a stored state
    Update {
        kind: ResourceKind,
        /// Stored state file (YAML or JSON)
        #[arg(short, long)]
        state: PathBuf,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Remove a resource
    Delete {
        kind: ResourceKind,
        /// Stored state file (YAML or JSON)
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Adopt an existing remote object
    Import {
        kind: ResourceKind,
        /// External id, e.g. <environment-id>/<cluster-id>
        external_id: String,
    },
    /// Look up an existing object without managing it (data source)
    Lookup {
        kind: ResourceKind,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Save credentials and endpoint to the config file
    Configure {
        #[arg(long = "key")]
        key: String,
        #[arg(long = "secret")]
        secret: String,
        #[arg(long = "url")]
        url: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct InputArgs {
    /// Attribute file (YAML or JSON)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Attribute assignment, repeatable
    #[arg(short = 'a', long = "attr", value_name = "NAME=VALUE")]
    attrs: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ccloud-provider {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("ccloud-provider").join("ccloud-provider.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".ccloud-provider").join("ccloud-provider.log");
    }
    PathBuf::from("ccloud-provider.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        match err.downcast_ref::<ProviderError>() {
            Some(provider_err) => {
                tracing::error!("{:?}", provider_err);
                eprintln!("Error: {}", format_api_error(provider_err));
            }
            None => eprintln!("Error: {err:?}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load();

    let provider = || -> Result<Provider> {
        let credentials =
            config.effective_credentials(args.api_key.as_deref(), args.api_secret.as_deref())?;
        let endpoint = config.effective_endpoint(args.endpoint.as_deref());
        tracing::info!("Using endpoint: {}", endpoint);
        Ok(Provider::new(CcloudClient::with_base_url(credentials, &endpoint)?))
    };

    match &args.command {
        Command::Schema { kind } => {
            let described: Vec<Value> = match kind {
                Some(kind) => vec![kind.describe()],
                None => ResourceKind::ALL.iter().map(|k| k.describe()).collect(),
            };
            print_json(&described)?;
        }
        Command::Create { kind, input } => {
            let declared = load_record(input.file.as_deref(), &input.attrs)?;
            let created = provider()?.create(*kind, &declared).await?;
            print_json(&created)?;
        }
        Command::Read { kind, state } => {
            let current = load_record(Some(state), &[])?;
            let refreshed = provider()?.read(*kind, &current).await?;
            print_json(&refreshed)?;
        }
        Command::Update { kind, state, input } => {
            let prior = load_record(Some(state), &[])?;
            let planned = load_record(input.file.as_deref(), &input.attrs)?;
            let next = provider()?.update(*kind, &prior, &planned).await?;
            print_json(&next)?;
        }
        Command::Delete { kind, state } => {
            let current = load_record(Some(state), &[])?;
            provider()?.delete(*kind, &current).await?;
            eprintln!(
                "{} {} removed from state",
                kind,
                current.id().unwrap_or("<no id>")
            );
        }
        Command::Import { kind, external_id } => {
            let imported = provider()?.import(*kind, external_id).await?;
            print_json(&imported)?;
        }
        Command::Lookup { kind, input } => {
            let query = load_record(input.file.as_deref(), &input.attrs)?;
            let found = provider()?.read_data_source(*kind, &query).await?;
            print_json(&found)?;
        }
        Command::Configure { key, secret, url } => {
            let config = Config {
                api_key: Some(key.clone()),
                api_secret: Some(secret.clone()),
                endpoint: url.clone(),
            };
            let path = config.save()?;
            eprintln!("Configuration saved to {:?}", path);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build a record from an optional YAML/JSON file plus `name=value` overrides.
///
/// The file may hold a bare attribute map or a full `{id, attributes}` record.
fn load_record(path: Option<&Path>, assignments: &[String]) -> Result<ResourceData> {
    let mut record = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            parse_record(&content).with_context(|| format!("Failed to parse {:?}", path))?
        }
        None => ResourceData::new(),
    };

    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        record.set(name, value);
    }

    Ok(record)
}

fn parse_record(content: &str) -> Result<ResourceData> {
    let value: Value = serde_yaml::from_str(content)?;

    match value {
        Value::Null => Ok(ResourceData::new()),
        Value::Object(map) if map.contains_key("attributes") => {
            Ok(serde_json::from_value(Value::Object(map))?)
        }
        Value::Object(map) => Ok(ResourceData::from_attributes(map)),
        other => Err(anyhow::anyhow!("expected a mapping, found {}", other)),
    }
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(anyhow::anyhow!(
            "invalid attribute '{}': expected NAME=VALUE",
            assignment
        )),
    }
}
