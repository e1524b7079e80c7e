use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "rightscale-ctl", version, about = "Query and manage RightScale resources")]
pub(crate) struct Cli {
    /// Settings file (appsettings.json style); RIGHTSCALE_* variables override it
    #[arg(short, long, env = "RIGHTSCALE_SETTINGS")]
    pub config: Option<PathBuf>,
    /// API endpoint, e.g. https://us-3.rightscale.com
    #[arg(long)]
    pub api_url: Option<String>,
    /// Fetch tags for networks and ServerTemplates
    #[arg(long)]
    pub tags: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// List the accounts the configured user can log in to
    Accounts,
    /// Show the current session
    Session,
    /// Clouds and their contents
    #[command(subcommand)]
    Clouds(CloudCommand),
    /// List networks
    Networks(ListArgs),
    /// ServerTemplates
    #[command(subcommand)]
    #[command(alias = "st")]
    ServerTemplates(ServerTemplateCommand),
    /// Backups
    #[command(subcommand)]
    Backups(BackupCommand),
}

#[derive(Debug, clap::Args)]
pub(crate) struct ListArgs {
    /// Filters as a comma-separated list, e.g. "name==web,cloud_type<>amazon"
    #[arg(short, long)]
    pub filter: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum CloudCommand {
    /// List clouds
    #[clap(alias = "list")]
    Ls(ListArgs),
    /// List the instances of a cloud
    Instances {
        /// Cloud ID
        cloud: String,
    },
    /// List the instance types of a cloud
    InstanceTypes {
        /// Cloud ID
        cloud: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// List the IP addresses of a cloud
    IpAddresses {
        /// Cloud ID
        cloud: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum ServerTemplateCommand {
    /// List ServerTemplates
    #[clap(alias = "list")]
    Ls {
        #[command(flatten)]
        list: ListArgs,
        /// default, inputs or inputs_2_0
        #[arg(long)]
        view: Option<String>,
    },
    /// Show one ServerTemplate
    Show {
        id: String,
        #[arg(long)]
        view: Option<String>,
    },
    /// Commit the HEAD revision
    Commit {
        id: String,
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Also commit HEAD RightScripts and MultiCloudImages
        #[arg(long)]
        head_dependencies: bool,
        /// Freeze repositories at their current revision
        #[arg(long)]
        freeze_repositories: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum BackupCommand {
    /// List the backups of a lineage
    #[clap(alias = "list")]
    Ls {
        lineage: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Delete old backups of a lineage
    Cleanup {
        lineage: String,
        /// Number of most recent backups to keep
        #[arg(long)]
        keep_last: u32,
        /// Only clean up backups in this cloud
        #[arg(long)]
        cloud: Option<String>,
    },
}
