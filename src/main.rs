//! sciprodir - Create research project directories.
//!
//! Usage:
//!   sciprodir create -p PATH [OPTIONS]        New local project
//!   sciprodir create -g URL [OPTIONS]         New project in a cloned git remote
//!   sciprodir link SOURCE DEST [OPTIONS]      Hard-link a directory tree
//!   sciprodir plots --plots DIR -m|-t --project PATH
//!   sciprodir --help                          Show help

mod logging;

use std::path::{Path, PathBuf};
use std::thread;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

use sciprodir_link::{LinkConfig, LinkMode, ManifestStyle, ManifestTarget, TreeLinker};
use sciprodir_scaffold::{
    DataSource, DocFormat, ProjectConfig, ProjectSource, ScaffoldError, TOOL_NAME,
    create_project, insert_plots, link_summary, render_command,
};

#[derive(Parser)]
#[command(
    name = "sciprodir",
    version,
    about = "Create research project directories with hard-linked resource data",
    long_about = "sciprodir sets up a uniform project directory: a fixed skeleton with \
                  README files, optional LaTeX stubs and git setup, and your resource data \
                  hard-linked into res/ with a manifest of every linked file."
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new project
    Create(CreateArgs),

    /// Mirror a directory tree with hard links
    Link {
        /// Directory to mirror
        source: PathBuf,

        /// Directory receiving the mirrored tree
        destination: PathBuf,

        /// Prefix stripped from paths in manifest lines (defaults to current directory)
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// File receiving manifest lines; `.md` files get Markdown lines
        #[arg(short, long)]
        manifest: Vec<PathBuf>,

        /// Copy files instead of hard linking them
        #[arg(long)]
        copy: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Insert plots into a project's documentation
    #[command(group(ArgGroup::new("document").required(true).args(["markdown", "latex"])))]
    Plots {
        /// Directory traversed for plot files
        #[arg(long, value_name = "PLOTS_DIRECTORY")]
        plots: PathBuf,

        /// Append plots to README.md
        #[arg(short, long)]
        markdown: bool,

        /// Append plots to doc/attachments.tex
        #[arg(short = 't', long)]
        latex: bool,

        /// Project directory
        #[arg(long, value_name = "PROJECT_PATH", default_value = ".")]
        project: PathBuf,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["project", "git"])))]
struct CreateArgs {
    /// Path of the new local project directory
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// URL of an empty git remote to clone into the project directory
    #[arg(short, long)]
    git: Option<String>,

    /// Short project description
    #[arg(short = 'd', long, default_value = "")]
    project_description: String,

    /// Directory whose contents are hard-linked into res/
    #[arg(short, long)]
    link: Option<PathBuf>,

    /// Training and validation data linked into res/traindata and res/valdata
    #[arg(long, num_args = 2, value_names = ["TRAIN", "VAL"])]
    machine_learning: Option<Vec<PathBuf>>,

    /// Entry for .gitignore (requires --git)
    #[arg(short = 'i', long)]
    gitignore: Vec<String>,

    /// Author name (defaults to the login name)
    #[arg(short, long)]
    author: Option<String>,

    /// Project supervisor
    #[arg(short, long)]
    supervisor: Option<String>,

    /// Organization the project is developed at
    #[arg(short, long)]
    organization: Option<String>,

    /// ORCID of the author
    #[arg(long)]
    orcid: Option<String>,

    /// Generate LaTeX documentation stubs in doc/
    #[arg(long)]
    latex: bool,

    /// Record hardware specs of this machine in README.md
    #[arg(long)]
    specs: bool,

    /// Copy resource data instead of hard linking it
    #[arg(long)]
    copy: bool,

    /// Commit but do not push to the git remote
    #[arg(long)]
    no_push: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if let Err(report) = run(cli) {
        if let Some(err) = report.downcast_ref::<ScaffoldError>() {
            error!("{err}");
            std::process::exit(err.exit_code());
        }
        return Err(report);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Create(args) => run_create(args),
        Command::Link {
            source,
            destination,
            project_root,
            manifest,
            copy,
            format,
        } => run_link(source, destination, project_root, manifest, copy, format),
        Command::Plots {
            plots,
            markdown,
            latex: _,
            project,
        } => {
            let format = if markdown {
                DocFormat::Markdown
            } else {
                DocFormat::Latex
            };
            run_plots(&plots, &project, format)
        }
    }
}

fn link_mode(copy: bool) -> LinkMode {
    if copy { LinkMode::Copy } else { LinkMode::HardLink }
}

/// Create a project and print what was done.
fn run_create(args: CreateArgs) -> Result<()> {
    let project = match (args.project, args.git) {
        (_, Some(url)) => ProjectSource::Git(url),
        (Some(path), None) => ProjectSource::Local(path),
        (None, None) => return Err(eyre!("Either --project or --git is required")),
    };
    let machine_learning = args.machine_learning.and_then(|paths| match paths.as_slice() {
        [train, validation] => Some((train.clone(), validation.clone())),
        _ => None,
    });
    let data = DataSource::from_options(args.link, machine_learning)?;

    let command_args: Vec<String> = std::env::args().skip(1).collect();
    let config = ProjectConfig::builder()
        .project(project)
        .description(args.project_description)
        .data(data)
        .link_mode(link_mode(args.copy))
        .gitignore(args.gitignore)
        .author(args.author)
        .supervisor(args.supervisor)
        .organization(args.organization)
        .orcid(args.orcid)
        .latex(args.latex)
        .specs(args.specs)
        .push(!args.no_push)
        .command(render_command(TOOL_NAME, &command_args))
        .build()
        .context("Invalid project configuration")?;

    let report = create_project(&config)?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "Created project '{}' in {}",
                report.project_name,
                report.project_dir.display()
            );
            for data in &report.data {
                println!("{}", link_summary(data.label.as_deref(), &data.result));
            }
            if report.pushed {
                println!("Pushed initial commit to origin");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Log progress updates until the linker is dropped.
fn spawn_progress_logger(linker: &TreeLinker) -> thread::JoinHandle<()> {
    let mut rx = linker.subscribe();
    thread::spawn(move || {
        loop {
            match rx.blocking_recv() {
                Ok(progress) => debug!(
                    files = progress.files_linked,
                    files_per_second = progress.files_per_second(),
                    path = %progress.current_path.display(),
                    "Linked"
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Build the link configuration for the `link` command.
///
/// The destination and project root are made absolute so that manifest paths
/// are relative to the project root however the paths were spelled.
fn link_config(
    source: &Path,
    destination: &Path,
    project_root: Option<PathBuf>,
    manifests: Vec<PathBuf>,
    copy: bool,
) -> Result<LinkConfig> {
    let project_root = match project_root {
        Some(root) => root,
        None => std::env::current_dir().context("Cannot read current directory")?,
    };
    let project_root = std::path::absolute(&project_root)
        .with_context(|| format!("Invalid project root {}", project_root.display()))?;
    let destination = std::path::absolute(destination)
        .with_context(|| format!("Invalid destination {}", destination.display()))?;

    let mut config =
        LinkConfig::new(source, destination, project_root).with_mode(link_mode(copy));
    for path in manifests {
        let style = match path.extension().and_then(|e| e.to_str()) {
            Some("md") => ManifestStyle::Markdown,
            _ => ManifestStyle::Plain,
        };
        config = config.with_manifest(ManifestTarget::new(path, style));
    }
    Ok(config)
}

/// Mirror one directory tree.
fn run_link(
    source: PathBuf,
    destination: PathBuf,
    project_root: Option<PathBuf>,
    manifests: Vec<PathBuf>,
    copy: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = link_config(&source, &destination, project_root, manifests, copy)?;

    let linker = TreeLinker::new();
    let logger = spawn_progress_logger(&linker);
    let result = linker.link(&config);
    drop(linker);
    let _ = logger.join();

    let result = result.with_context(|| format!("Failed to link {}", source.display()))?;

    match format {
        OutputFormat::Text => println!("{}", link_summary(None, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

/// Insert plots into a project document.
fn run_plots(plots: &Path, project: &Path, format: DocFormat) -> Result<()> {
    let count = insert_plots(plots, project, format)?;
    info!(count, document = %format.document(project).display(), "Inserted plots");
    println!("Inserted {count} plots");
    Ok(())
}
