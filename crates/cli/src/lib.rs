mod discover;
mod generate;

use clap::{Args, Parser, Subcommand, ValueEnum};
use servicescope_api::DiscoveryResult;
use servicescope_core::{DependencyManifest, DiscoveryRequest, GeneratorAction, ScanProfile, ServiceScanner};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "servicescope",
    version,
    about = "Discovers Cloud Endpoints service classes in compiled servlet projects",
    long_about = "Servicescope scans a project's compiled classes for servlets extending the Endpoints \
                  base servlet, reads the service classes they declare through @WebServlet init \
                  parameters and merges them with explicitly configured ones."
)]
pub struct Cli {
    /// Also write logs to daily files under ~/.servicescope/logs
    #[arg(long, global = true)]
    pub log_to_file: bool,

    /// Directory for log files (implies --log-to-file)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn log_dir(&self) -> Option<PathBuf> {
        match (&self.log_dir, self.log_to_file) {
            (Some(dir), _) => Some(dir.clone()),
            (None, true) => Some(servicescope_core::logging::default_log_dir()),
            (None, false) => None,
        }
    }

    fn component(&self) -> &'static str {
        match self.command {
            Commands::Discover { .. } => "discover",
            Commands::Generate { .. } => "generate",
        }
    }
}

/// Inputs shared by every command that runs discovery.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory holding the project's compiled classes
    #[arg(long, value_name = "DIR")]
    pub classes: PathBuf,

    /// JSON dependency manifest: {"artifacts": [{"group", "name", "version", "location"}]}
    #[arg(long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Service class to include in addition to discovered ones (repeatable)
    #[arg(long = "service", value_name = "CLASS")]
    pub services: Vec<String>,

    /// JSON scan profile overriding base type, marker and library coordinates
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

impl ScanArgs {
    fn scan(&self) -> Result<(DependencyManifest, DiscoveryResult), Box<dyn std::error::Error>> {
        let profile = match &self.profile {
            Some(path) => ScanProfile::load(path)?,
            None => ScanProfile::default(),
        };
        let manifest = DependencyManifest::load(&self.manifest)?;
        let request = DiscoveryRequest {
            compiled_output: self.classes.clone(),
            dependencies: manifest.artifacts.clone(),
            configured: self.services.clone(),
        };
        let result = ServiceScanner::new(profile).discover(&request)?;
        Ok((manifest, result))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Discovery documents
    DiscoveryDocs,
    /// OpenAPI document (openapi.json)
    OpenapiDocs,
    /// Java client library sources
    ClientLibs,
}

impl From<Action> for GeneratorAction {
    fn from(action: Action) -> Self {
        match action {
            Action::DiscoveryDocs => GeneratorAction::DiscoveryDoc,
            Action::OpenapiDocs => GeneratorAction::OpenApiDoc,
            Action::ClientLibs => GeneratorAction::ClientLib,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the service classes of a compiled project
    #[command(
        long_about = "Resolves the servlet API and Endpoints framework from the manifest, scans the \
                      compiled classes and prints configured plus discovered service classes, one per line."
    )]
    Discover {
        #[command(flatten)]
        scan: ScanArgs,

        /// Print a JSON array instead of one class per line
        #[arg(long)]
        json: bool,
    },
    /// Run the external generator with the discovered service classes
    Generate {
        /// What to generate
        #[arg(value_enum)]
        action: Action,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        output: PathBuf,

        /// Web application directory (containing WEB-INF)
        #[arg(long, value_name = "DIR")]
        webapp: PathBuf,

        /// Generator executable
        #[arg(long, value_name = "CMD")]
        tool: PathBuf,

        /// Classpath entry passed to the generator (repeatable). Defaults to the
        /// compiled classes followed by every manifest artifact.
        #[arg(long = "classpath", value_name = "ENTRY")]
        classpath: Vec<PathBuf>,

        #[arg(long)]
        hostname: Option<String>,

        #[arg(long)]
        base_path: Option<String>,

        /// Print the generator command line instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir();
    let _guard = servicescope_core::logging::init_logging(cli.component(), log_dir.as_deref());

    match cli.command {
        Commands::Discover { scan, json } => discover::run(&scan, json),
        Commands::Generate {
            action,
            scan,
            output,
            webapp,
            tool,
            classpath,
            hostname,
            base_path,
            dry_run,
        } => generate::run(generate::GenerateArgs {
            action: action.into(),
            scan,
            output,
            webapp,
            tool,
            classpath,
            hostname,
            base_path,
            dry_run,
        }),
    }
}
