use anyhow::Result;
use bitsync::areas::config::SyncConfig;
use bitsync::areas::repository::Repository;
use bitsync::artifacts::core::{PagerWriter, should_page};
use bitsync::artifacts::diff::change_type::DiffFilter;
use bitsync::commands::porcelain::changes::ChangesOptions;
use clap::{Parser, Subcommand};
use minus::{Pager, page_all};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitsync",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Review working copy changes against repository history",
    long_about = "bitsync builds a tree of the changes between the commits of a repository \
    and its working copy: the commits being compared, and below each commit the \
    directories and files that differ from what is on disk, leaving out ignored paths.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the working copy as tree objects",
        long_about = "This command stores every non-ignored file of the working copy and prints the root tree id."
    )]
    WriteTree,
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the non-ignored working copy as a new commit on top of HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "changes",
        about = "Show the working copy changes against history",
        long_about = "This command lists the commits reachable from the destination and not from the source, \
        and below each commit the directories and files of the working copy that differ from it."
    )]
    Changes {
        #[arg(long, help = "Commits reachable from this revision are left out")]
        source: Option<String>,
        #[arg(long, help = "The revision to list commits from (defaults to HEAD)")]
        destination: Option<String>,
        #[arg(long, help = "How many levels below the repository to show")]
        depth: Option<usize>,
        #[arg(
            long = "diff-filter",
            value_parser = parse_diff_filter,
            help = "Only show added (A), deleted (D) or modified (M) files"
        )]
        diff_filter: Option<DiffFilter>,
        #[arg(long, help = "Print the changed paths of the destination commit only")]
        flat: bool,
    },
}

fn parse_diff_filter(value: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(value).ok_or_else(|| format!("invalid diff filter: {value}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_new(SyncConfig::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let pager = should_page().then(Pager::new);
    let writer: Box<dyn std::io::Write + Send> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy().into_owned();

    match &cli.command {
        Commands::Init { path } => {
            let repository = Repository::new(path.as_deref().unwrap_or(pwd.as_str()), writer)?;
            repository.init()?
        }
        Commands::HashObject { write, file } => {
            let repository = Repository::new(&pwd, writer)?;
            repository.hash_object(file, *write)?
        }
        Commands::WriteTree => {
            let repository = Repository::new(&pwd, writer)?;
            repository.print_tree_id()?
        }
        Commands::Commit { message } => {
            let repository = Repository::new(&pwd, writer)?;
            repository.commit(message)?;
        }
        Commands::Changes {
            source,
            destination,
            depth,
            diff_filter,
            flat,
        } => {
            let repository = Arc::new(Repository::new(&pwd, writer)?);
            let opts = ChangesOptions {
                source: source.clone(),
                destination: destination.clone(),
                depth: *depth,
                diff_filter: diff_filter.unwrap_or(DiffFilter::all()),
                flat: *flat,
            };
            repository.changes(&opts)?
        }
    }

    if let Some(pager) = pager {
        page_all(pager)?;
    }

    Ok(())
}
