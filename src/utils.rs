use crate::error::AvigridError;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "avigrid";

pub fn get_data_dir() -> Result<PathBuf, AvigridError> {
    dirs::data_dir()
        .ok_or(AvigridError::DataDirResolution)
        .map(|p| p.join(DATA_DIR_NAME))
}

pub fn ensure_dir_exists(path: &Path) -> Result<(), AvigridError> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(AvigridError::NotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => std::fs::create_dir_all(path)
            .map_err(|e| AvigridError::DataDirCreation(path.to_path_buf(), e)),
        Err(e) => Err(AvigridError::DataDirCreation(path.to_path_buf(), e)),
    }
}
