pub mod hash;
pub mod inspect;
pub mod verify;

use std::fs;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// 读取文件，不存在时返回 FileNotFound
pub(crate) fn read_existing(path: &str) -> CliResult<Vec<u8>> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    Ok(fs::read(path)?)
}
