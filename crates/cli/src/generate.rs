use crate::ScanArgs;
use servicescope_core::{GeneratorAction, GeneratorInvocation};
use std::path::PathBuf;
use tracing::info;

pub struct GenerateArgs {
    pub action: GeneratorAction,
    pub scan: ScanArgs,
    pub output: PathBuf,
    pub webapp: PathBuf,
    pub tool: PathBuf,
    pub classpath: Vec<PathBuf>,
    pub hostname: Option<String>,
    pub base_path: Option<String>,
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (manifest, services) = args.scan.scan()?;

    let classpath = if args.classpath.is_empty() {
        std::iter::once(args.scan.classes.clone())
            .chain(manifest.artifacts.iter().map(|a| a.location.clone()))
            .collect()
    } else {
        args.classpath
    };

    let invocation = GeneratorInvocation {
        action: args.action,
        output_dir: args.output,
        classpath,
        webapp_dir: args.webapp,
        hostname: args.hostname,
        base_path: args.base_path,
        services,
    };

    if args.dry_run {
        let mut line = vec![args.tool.display().to_string()];
        line.extend(invocation.args()?.iter().map(|a| a.to_string_lossy().into_owned()));
        println!("{}", line.join(" "));
        return Ok(());
    }

    invocation.run(&args.tool)?;
    info!("{} finished", args.action.name());
    Ok(())
}
