use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("не удалось загрузить ASCII-арт {path}: {source}")]
pub struct AssetError {
    path: String,
    source: std::io::Error,
}

pub fn art_path(assets_dir: impl AsRef<Path>, name: &str) -> PathBuf {
    assets_dir.as_ref().join(format!("{name}.txt"))
}

pub fn load_art(assets_dir: impl AsRef<Path>, name: &str) -> Result<String, AssetError> {
    let path = art_path(assets_dir, name);
    fs::read_to_string(&path).map_err(|source| AssetError {
        path: path.display().to_string(),
        source,
    })
}
