//! RightScale command-line client
//!
//! Loads settings from an optional `appsettings.json` style file overlaid
//! with `RIGHTSCALE_*` environment variables, logs in, runs one command and
//! prints the result as JSON.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{BackupCommand, Cli, CloudCommand, Command, ListArgs, ServerTemplateCommand};
use rightscale_client::{CleanupBackups, ClientConfig, Filter, RightScaleClient};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Using RightScale API at {}", config.api_url);

    if let Command::Accounts = cli.command {
        let (Some(email), Some(password)) = (config.email.as_deref(), config.password.as_deref()) else {
            bail!("listing accounts needs RIGHTSCALE_EMAIL and RIGHTSCALE_PASSWORD");
        };
        let client = RightScaleClient::new(config.clone())?;
        return print_json(&client.accounts(email, password).await?);
    }

    let client = RightScaleClient::connect(config).await.context("login failed")?;
    run(&client, cli.command).await
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path).with_context(|| format!("reading {}", path.display()))?,
        None => ClientConfig::default(),
    };
    config.apply_env()?;

    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if cli.tags {
        config.auto_populate_tags = true;
    }
    Ok(config)
}

fn filters(list: &ListArgs) -> Result<Vec<Filter>> {
    match list.filter.as_deref() {
        Some(raw) => Ok(Filter::parse_list(raw)?),
        None => Ok(Vec::new()),
    }
}

async fn run(client: &RightScaleClient, command: Command) -> Result<()> {
    match command {
        Command::Accounts => bail!("accounts are listed without a session"),
        Command::Session => print_json(&client.session().await?),
        Command::Clouds(command) => run_clouds(client, command).await,
        Command::Networks(list) => print_json(&client.index_networks(&filters(&list)?).await?),
        Command::ServerTemplates(command) => run_server_templates(client, command).await,
        Command::Backups(command) => run_backups(client, command).await,
    }
}

async fn run_clouds(client: &RightScaleClient, command: CloudCommand) -> Result<()> {
    match command {
        CloudCommand::Ls(list) => print_json(&client.index_clouds(&filters(&list)?).await?),
        CloudCommand::Instances { cloud } => {
            let cloud = client.show_cloud(&cloud).await?;
            print_json(&cloud.instances(client).await?)
        }
        CloudCommand::InstanceTypes { cloud, list } => {
            print_json(&client.index_instance_types(&cloud, &filters(&list)?, None).await?)
        }
        CloudCommand::IpAddresses { cloud, list } => {
            print_json(&client.index_ip_addresses(&cloud, &filters(&list)?).await?)
        }
    }
}

async fn run_server_templates(client: &RightScaleClient, command: ServerTemplateCommand) -> Result<()> {
    match command {
        ServerTemplateCommand::Ls { list, view } => {
            print_json(&client.index_server_templates(&filters(&list)?, view.as_deref()).await?)
        }
        ServerTemplateCommand::Show { id, view } => {
            print_json(&client.show_server_template(&id, view.as_deref()).await?)
        }
        ServerTemplateCommand::Commit {
            id,
            message,
            head_dependencies,
            freeze_repositories,
        } => {
            let revision = client
                .commit_server_template(&id, head_dependencies, &message, freeze_repositories)
                .await?;
            info!("Committed ServerTemplate {} as {}", id, revision);
            print_json(&serde_json::json!({ "id": revision }))
        }
    }
}

async fn run_backups(client: &RightScaleClient, command: BackupCommand) -> Result<()> {
    match command {
        BackupCommand::Ls { lineage, list } => print_json(&client.index_backups(&lineage, &filters(&list)?).await?),
        BackupCommand::Cleanup {
            lineage,
            keep_last,
            cloud,
        } => {
            let policy = CleanupBackups {
                lineage,
                keep_last,
                cloud_id: cloud,
                ..CleanupBackups::default()
            };
            client.cleanup_backups(&policy).await?;
            info!("Cleaned up backups of lineage {}", policy.lineage);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
