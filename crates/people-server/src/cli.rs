//! CLI argument definitions.

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use people_core::{SchemaGeneration, SecretName, ServiceUrl};

/// REST service for person records.
#[derive(Parser, Debug)]
#[command(name = "people")]
#[command(author, version = env!("PEOPLE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the person record API
    Serve(ServeArgs),

    /// Store a new secret version (file:// secrets only)
    AddSecret(AddSecretArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "PEOPLE_LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// Document store base URL (https://... or file:///path)
    #[arg(long, env = "PEOPLE_STORE")]
    pub store: ServiceUrl,

    /// Collection holding the person records
    #[arg(long, env = "PEOPLE_COLLECTION", default_value = "persons")]
    pub collection: String,

    /// Secrets provider base URL (https://... or file:///path)
    #[arg(long, env = "PEOPLE_SECRETS")]
    pub secrets: Option<ServiceUrl>,

    /// Name of the secret holding the store credentials
    #[arg(
        long,
        env = "PEOPLE_CREDENTIALS_SECRET",
        default_value = "people-store-credentials"
    )]
    pub credentials_secret: SecretName,

    /// Bearer token for the secrets provider
    #[arg(long, env = "PEOPLE_SECRETS_TOKEN", hide_env_values = true)]
    pub secrets_token: Option<String>,

    /// Which revision of the person contract to serve
    #[arg(long, env = "PEOPLE_SCHEMA_GENERATION", value_enum, default_value_t = GenerationArg::Crud)]
    pub schema_generation: GenerationArg,
}

#[derive(Args, Debug)]
pub struct AddSecretArgs {
    /// Secrets directory URL (file:///path)
    #[arg(long, env = "PEOPLE_SECRETS")]
    pub secrets: ServiceUrl,

    /// Secret name
    #[arg(long)]
    pub name: SecretName,

    /// File with the secret content (use - for stdin)
    pub file: String,
}

/// Contract revision selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerationArg {
    /// Create/read/update/delete; duplicate create answers 500
    Crud,
    /// Validate-and-echo create; names required; no update/delete
    Echo,
}

impl From<GenerationArg> for SchemaGeneration {
    fn from(arg: GenerationArg) -> Self {
        match arg {
            GenerationArg::Crud => SchemaGeneration::Crud,
            GenerationArg::Echo => SchemaGeneration::Echo,
        }
    }
}
