//! Command line for the external document/client-library generator.
//!
//! The generator itself is opaque: it receives an action, an output
//! location, a classpath, the web app directory and the service classes as
//! positional arguments.

use crate::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use servicescope_api::DiscoveryResult;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorAction {
    DiscoveryDoc,
    OpenApiDoc,
    ClientLib,
}

impl GeneratorAction {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorAction::DiscoveryDoc => "get-discovery-doc",
            GeneratorAction::OpenApiDoc => "get-openapi-doc",
            GeneratorAction::ClientLib => "get-client-lib",
        }
    }

    /// Where the generator is told to write, given the requested output directory.
    pub fn output_target(&self, output_dir: &Path) -> PathBuf {
        match self {
            GeneratorAction::OpenApiDoc => output_dir.join("openapi.json"),
            _ => output_dir.to_path_buf(),
        }
    }

    fn extra_params(&self) -> &'static [&'static str] {
        match self {
            GeneratorAction::ClientLib => &["-l", "java", "-bs", "gradle"],
            _ => &[],
        }
    }

    fn accepts_base_path(&self) -> bool {
        !matches!(self, GeneratorAction::DiscoveryDoc)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorInvocation {
    pub action: GeneratorAction,
    pub output_dir: PathBuf,
    pub classpath: Vec<PathBuf>,
    pub webapp_dir: PathBuf,
    pub hostname: Option<String>,
    pub base_path: Option<String>,
    pub services: DiscoveryResult,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl GeneratorInvocation {
    pub fn args(&self) -> Result<Vec<OsString>> {
        let classpath = std::env::join_paths(&self.classpath)
            .map_err(|e| DiscoveryError::Generator(format!("invalid classpath entry: {e}")))?;

        let mut args: Vec<OsString> = vec![
            self.action.name().into(),
            "-o".into(),
            self.action.output_target(&self.output_dir).into(),
            "-cp".into(),
            classpath,
            "-w".into(),
            self.webapp_dir.clone().into(),
        ];
        args.extend(self.action.extra_params().iter().map(OsString::from));
        if let Some(hostname) = non_empty(&self.hostname) {
            args.extend([OsString::from("-h"), OsString::from(hostname)]);
        }
        if let Some(base_path) = non_empty(&self.base_path).filter(|_| self.action.accepts_base_path()) {
            args.extend([OsString::from("-p"), OsString::from(base_path)]);
        }
        args.extend(self.services.iter().map(|s| OsString::from(s.as_str())));
        Ok(args)
    }

    /// Spawns `tool` with the assembled arguments and waits for it.
    pub fn run(&self, tool: &Path) -> Result<()> {
        let args = self.args()?;
        info!(
            "Running {} {} for {} services",
            tool.display(),
            self.action.name(),
            self.services.len()
        );

        let status = Command::new(tool).args(&args).status()?;
        if !status.success() {
            return Err(DiscoveryError::Generator(format!(
                "{} {} exited with {}",
                tool.display(),
                self.action.name(),
                status
            )));
        }
        Ok(())
    }
}
