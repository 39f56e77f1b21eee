use clap::{ArgGroup, Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vcs::CommitDisplayFormat;
use vcs::areas::repository::Repository;
use vcs::artifacts::core::{PagerWriter, should_page};
use vcs::commands::porcelain::log::LogOptions;
use vcs::errors::find_vcs_error;

/// Exit code for failures that carry no specific error kind
const GENERIC_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(
    name = "vcs",
    version,
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "A minimal version control system storing files and commits by their SHA-1 digest. \
    It supports staging, committing, linear history and lightweight branches.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
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
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the given files, expanding directories recursively. \
        Files matching a pattern in .vcs/ignore are skipped."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the active branch.",
        group(ArgGroup::new("commit_message").required(true).args(["message", "message_flag"]))
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
        #[arg(short = 'm', long = "message", help = "The commit message")]
        message_flag: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command shows the history of the active branch, or of the given branch, newest commit first."
    )]
    Log {
        #[arg(index = 1, help = "The branch to start from")]
        branch: Option<String>,
        #[arg(long, help = "Shorthand for --format=oneline --abbrev-commit")]
        oneline: bool,
        #[arg(long = "abbrev-commit", help = "Show abbreviated commit ids")]
        abbrev_commit: bool,
        #[arg(long, value_enum, default_value_t = CommitDisplayFormat::Medium, help = "The output format")]
        format: CommitDisplayFormat,
    },
    #[command(
        name = "branch",
        about = "List, create or delete branches",
        long_about = "Without arguments this command lists all branches. With a name it creates a branch \
        at the head of the active branch."
    )]
    Branch {
        #[arg(index = 1, required_if_eq("delete", "true"), help = "The branch name")]
        name: Option<String>,
        #[arg(short, long, help = "Re-point the branch if it already exists")]
        force: bool,
        #[arg(short, long, conflicts_with = "force", help = "Delete the branch")]
        delete: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch the active branch",
        long_about = "This command makes the given branch the active one. The working files and the staged files are not changed."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command prints the blob digest of a file and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints a stored blob or commit given its id or an unambiguous prefix of it."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id")]
        oid: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {:#}", error);

            let kind = find_vcs_error(&error);
            if let Some(hint) = kind.and_then(|kind| kind.hint()) {
                eprintln!("hint: {}", hint);
            }

            let code = kind
                .and_then(|kind| u8::try_from(kind.exit_code()).ok())
                .unwrap_or(GENERIC_FAILURE);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let stdout = || Box::new(std::io::stdout()) as Box<dyn Write>;

    match cli.command {
        Commands::Init { path } => {
            let path = path
                .map(PathBuf::from)
                .unwrap_or_else(|| pwd.clone());
            let mut repository = Repository::new(&path.to_string_lossy(), stdout())?;

            repository.init().await
        }
        Commands::Add { paths } => {
            let mut repository = Repository::discover(&pwd, stdout())?;

            repository.add(&paths).await
        }
        Commands::Commit {
            message,
            message_flag,
        } => {
            let message = message
                .or(message_flag)
                .ok_or_else(|| anyhow::anyhow!("a commit message is required"))?;
            let mut repository = Repository::discover(&pwd, stdout())?;

            repository.commit(&message).await.map(|_| ())
        }
        Commands::Log {
            branch,
            oneline,
            abbrev_commit,
            format,
        } => {
            let options = LogOptions {
                branch,
                oneline,
                abbrev_commit,
                format,
            };

            if should_page() {
                let pager = Pager::new();
                let repository =
                    Repository::discover(&pwd, Box::new(PagerWriter::new(pager.clone())))?;
                repository.log(&options)?;
                minus::page_all(pager)?;
                Ok(())
            } else {
                let repository = Repository::discover(&pwd, stdout())?;
                repository.log(&options)
            }
        }
        Commands::Branch {
            name,
            force,
            delete,
        } => {
            let mut repository = Repository::discover(&pwd, stdout())?;

            match name {
                Some(name) if delete => repository.delete_branch(&name).await,
                Some(name) => repository.branch(&name, force).await,
                None => repository.list_branches(),
            }
        }
        Commands::Checkout { name } => {
            let mut repository = Repository::discover(&pwd, stdout())?;

            repository.checkout(&name).await
        }
        Commands::HashObject { write, file } => {
            let mut repository = if write {
                Repository::discover(&pwd, stdout())?
            } else {
                Repository::new(&pwd.to_string_lossy(), stdout())?
            };

            repository.hash_object(&file, write)
        }
        Commands::CatFile { oid } => {
            let mut repository = Repository::discover(&pwd, stdout())?;

            repository.cat_file(&oid)
        }
    }
}
