//! Class-file backed loading context.
//!
//! Resolution order is the order of the supplied locations. The first
//! location is the compiled output and is the only one enumerated by
//! `project_types`. Jar archives stay open for the lifetime of the context
//! and are closed when it is dropped.

mod decode;

pub use decode::decode_class;

use crate::error::{DiscoveryError, Result};
use servicescope_api::{Artifact, LoadingContext, TypeHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

enum ClasspathEntry {
    Directory(PathBuf),
    Archive {
        path: PathBuf,
        archive: RefCell<ZipArchive<File>>,
    },
}

impl ClasspathEntry {
    fn open(location: &Path) -> Result<Self> {
        if location.is_dir() {
            return Ok(ClasspathEntry::Directory(location.to_path_buf()));
        }
        if !location.exists() {
            return Err(DiscoveryError::NotFound(format!(
                "classpath location {} does not exist",
                location.display()
            )));
        }
        let file = File::open(location)?;
        let archive = ZipArchive::new(file).map_err(|e| {
            DiscoveryError::load(location.display().to_string(), format!("not a jar archive: {e}"))
        })?;
        Ok(ClasspathEntry::Archive {
            path: location.to_path_buf(),
            archive: RefCell::new(archive),
        })
    }

    fn path(&self) -> &Path {
        match self {
            ClasspathEntry::Directory(path) => path,
            ClasspathEntry::Archive { path, .. } => path,
        }
    }

    /// Raw bytes of `class_path` (e.g. `com/example/Foo.class`) if this entry holds it.
    fn read(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        match self {
            ClasspathEntry::Directory(root) => {
                let file = root.join(class_path);
                if !file.is_file() {
                    return Ok(None);
                }
                Ok(Some(std::fs::read(file)?))
            }
            ClasspathEntry::Archive { path, archive } => {
                let mut archive = archive.borrow_mut();
                let mut entry = match archive.by_name(class_path) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(e) => {
                        return Err(DiscoveryError::load(
                            class_path,
                            format!("cannot read {}: {e}", path.display()),
                        ));
                    }
                };
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
        }
    }
}

/// Candidate class file paths for a type name, most literal first.
///
/// `a.b.Outer.Inner` is tried as `a/b/Outer/Inner.class`, then
/// `a/b/Outer$Inner.class`, then `a/b$Outer$Inner.class`.
fn class_paths(name: &str) -> Vec<String> {
    let mut internal = name.replace('.', "/");
    let mut paths = vec![format!("{internal}.class")];
    while let Some(idx) = internal.rfind('/') {
        internal.replace_range(idx..idx + 1, "$");
        paths.push(format!("{internal}.class"));
    }
    paths
}

fn is_type_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    file_name.ends_with(".class") && file_name != "module-info.class" && file_name != "package-info.class"
}

/// An isolated, single-use type resolution environment.
pub struct ClasspathContext {
    entries: Vec<ClasspathEntry>,
    // memoised per context only, never shared across runs
    loaded: RefCell<HashMap<String, Option<TypeHandle>>>,
}

impl ClasspathContext {
    /// Opens every location in order. The first one must be a directory.
    pub fn open<P: AsRef<Path>>(locations: &[P]) -> Result<Self> {
        let mut entries = Vec::with_capacity(locations.len());
        for location in locations {
            entries.push(ClasspathEntry::open(location.as_ref())?);
        }
        match entries.first() {
            Some(ClasspathEntry::Directory(_)) => {}
            Some(entry) => {
                return Err(DiscoveryError::NotFound(format!(
                    "compiled output {} is not a directory",
                    entry.path().display()
                )));
            }
            None => {
                return Err(DiscoveryError::NotFound(
                    "loading context needs at least the compiled output location".to_string(),
                ));
            }
        }

        debug!(
            "Opened loading context: {:?}",
            entries.iter().map(|e| e.path().display().to_string()).collect::<Vec<_>>()
        );
        Ok(Self {
            entries,
            loaded: RefCell::new(HashMap::new()),
        })
    }

    /// Context over a build's compiled output followed by the given libraries.
    pub fn for_build<'a>(
        compiled_output: &Path,
        required: impl IntoIterator<Item = &'a Artifact>,
    ) -> Result<Self> {
        let mut locations = vec![compiled_output.to_path_buf()];
        locations.extend(required.into_iter().map(|a| a.location.clone()));
        Self::open(&locations)
    }

    pub fn compiled_output(&self) -> &Path {
        self.entries[0].path()
    }

    fn load(&self, name: &str) -> Result<Option<TypeHandle>> {
        for class_path in class_paths(name) {
            for (origin, entry) in self.entries.iter().enumerate() {
                let Some(bytes) = entry.read(&class_path)? else {
                    continue;
                };
                let descriptor = decode_class(bytes, origin).map_err(|reason| {
                    DiscoveryError::load(name, format!("{} in {}", reason, entry.path().display()))
                })?;
                return Ok(Some(Arc::new(descriptor)));
            }
        }
        Ok(None)
    }
}

impl LoadingContext for ClasspathContext {
    fn resolve_type(&self, name: &str) -> Result<Option<TypeHandle>> {
        if let Some(cached) = self.loaded.borrow().get(name) {
            return Ok(cached.clone());
        }
        let handle = self.load(name)?;
        self.loaded
            .borrow_mut()
            .insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    fn project_types(&self) -> Result<Vec<TypeHandle>> {
        let root = self.compiled_output();
        let mut types = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(root).display().to_string();
                DiscoveryError::load(at, format!("cannot enumerate compiled output: {e}"))
            })?;
            if !entry.file_type().is_file() || !is_type_file(entry.path()) {
                continue;
            }
            let path = entry.path();
            let bytes = std::fs::read(path)?;
            let descriptor = decode_class(bytes, 0)
                .map_err(|reason| DiscoveryError::load(path.display().to_string(), reason))?;
            let handle = Arc::new(descriptor);
            self.loaded
                .borrow_mut()
                .entry(handle.name.clone())
                .or_insert_with(|| Some(handle.clone()));
            types.push(handle);
        }

        Ok(types)
    }
}

impl Drop for ClasspathContext {
    fn drop(&mut self) {
        debug!(
            "Releasing loading context ({} entries, {} types loaded)",
            self.entries.len(),
            self.loaded.borrow().len()
        );
    }
}
