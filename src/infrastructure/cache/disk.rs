use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use image::RgbaImage;

use crate::shared::error::{ApiError, ApiResult};

/// One flat subdirectory per render kind under the root, files named by
/// cache key. No locking: concurrent writers for the same key produce the
/// same bytes, last writer wins.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn at_system_temp() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn artifact_path(&self, namespace: &str, key: &str) -> PathBuf {
        self.root.join(namespace).join(key)
    }

    pub fn lookup(&self, namespace: &str, key: &str) -> ApiResult<Option<RgbaImage>> {
        let path = self.artifact_path(namespace, key);
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = read_artifact(&path)?;
        let image = image::load_from_memory(&bytes).map_err(|err| {
            ApiError::Internal(format!(
                "failed decoding cached render {}: {err}",
                path.display()
            ))
        })?;

        log::info!("cache hit {}", path.display());
        Ok(Some(image.to_rgba8()))
    }

    pub fn store(&self, namespace: &str, key: &str, bytes: &[u8]) -> ApiResult<()> {
        let path = self.artifact_path(namespace, key);

        match fs::write(&path, bytes) {
            Ok(()) => {
                log::info!("cached render {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let dir = self.root.join(namespace);
                fs::create_dir(&dir).map_err(|err| {
                    ApiError::Internal(format!(
                        "failed creating cache directory {}: {err}",
                        dir.display()
                    ))
                })?;
                fs::write(&path, bytes).map_err(|err| {
                    ApiError::Internal(format!(
                        "failed writing cached render {}: {err}",
                        path.display()
                    ))
                })?;
                log::info!("cached render {}", path.display());
                Ok(())
            }
            Err(err) => Err(ApiError::Internal(format!(
                "failed writing cached render {}: {err}",
                path.display()
            ))),
        }
    }
}

fn read_artifact(path: &Path) -> ApiResult<Vec<u8>> {
    fs::read(path).map_err(|err| {
        ApiError::Internal(format!(
            "failed reading cached render {}: {err}",
            path.display()
        ))
    })
}
