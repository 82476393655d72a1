//! Writes resolved certificate mounts to disk

use crate::store::SecretStore;
use catrust_core::{Error, Result, SecretName};
use catrust_resolver::ResolvedSpec;
use catrust_utils::write_atomic_with_mode;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Certificates are public material; readable by every process in the container
pub const CERTIFICATE_FILE_MODE: u32 = 0o644;

/// Files written by one [`Materializer::apply`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub written: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Places mounted secret keys under a target root, the way a container
/// runtime would place them inside the container filesystem.
#[derive(Debug, Clone)]
pub struct Materializer {
    target_root: PathBuf,
}

impl Materializer {
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
        }
    }

    /// Host path for a container destination path.
    ///
    /// Fails for any `..` component so nothing lands outside the target root.
    pub fn host_path(&self, destination_path: &str) -> Result<PathBuf> {
        let mut path = self.target_root.clone();
        for component in Path::new(destination_path).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(Error::file_system(
                        destination_path,
                        "resolve certificate destination",
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "destination escapes the target root",
                        ),
                    ));
                }
            }
        }
        Ok(path)
    }

    /// Write every mount of `spec` from `secret` in `store`.
    ///
    /// Every key is read and every destination checked before anything is
    /// written, so a failure leaves the target root untouched. An empty spec
    /// writes nothing.
    pub async fn apply(
        &self,
        spec: &ResolvedSpec,
        secret: &SecretName,
        store: &dyn SecretStore,
    ) -> Result<MaterializeReport> {
        if spec.mounts.is_empty() {
            tracing::debug!("no certificate mounts to materialize");
            return Ok(MaterializeReport::default());
        }

        let mut staged = Vec::with_capacity(spec.mounts.len());
        for mount in &spec.mounts {
            let path = self.host_path(&mount.destination_path)?;
            if path.is_dir() {
                return Err(Error::file_system(
                    &path,
                    "write certificate",
                    io::Error::other("destination is a directory"),
                ));
            }
            let contents = store.read_key(secret, &mount.source_key).await?;
            staged.push((path, contents));
        }

        let mut report = MaterializeReport::default();
        for (path, contents) in staged {
            write_atomic_with_mode(&path, &contents, CERTIFICATE_FILE_MODE)?;
            tracing::info!(
                secret = %secret,
                path = %path.display(),
                bytes = contents.len(),
                "wrote certificate"
            );
            report.written.push(path);
        }

        Ok(report)
    }
}
