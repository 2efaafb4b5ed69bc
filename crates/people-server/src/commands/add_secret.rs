//! Add secret command implementation.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use people_file::FileSecretsProvider;
use people_server::cli::AddSecretArgs;

pub async fn run(args: AddSecretArgs) -> Result<()> {
    if !args.secrets.is_local() {
        bail!("add-secret only supports file:// secrets, got {}", args.secrets);
    }
    let root = args
        .secrets
        .to_file_path()
        .context("Failed to convert file:// URL to path")?;

    let bytes = if args.file == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read(&args.file).context("Failed to read secret file")?
    };

    let version = FileSecretsProvider::new(root)
        .add_version(&args.name, &bytes)
        .context("Failed to store secret")?;

    println!("{} version {}", args.name, version);
    Ok(())
}
