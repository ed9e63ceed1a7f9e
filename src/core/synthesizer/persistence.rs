//! # 모델 저장/불러오기
//!
//! 파일 구조: 8바이트 매직 `TVAEMDL1` + bincode로 인코딩된 `SavedModel`.
//! 임시 파일에 모두 쓴 뒤 rename 하므로 대상 경로에는 완전한 파일만 생긴다.

use crate::core::error::{Result, TvaeError};
use crate::core::network::NamedTensor;
use crate::core::systems::{LossHistory, RandomStateSnapshot, TvaeConfig};
use crate::core::transform::DataTransformer;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MAGIC: &[u8; 8] = b"TVAEMDL1";
pub const FORMAT_VERSION: u32 = 1;

/// 직렬화되는 전체 모델 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    pub format_version: u32,
    pub config: TvaeConfig,
    pub transformer: DataTransformer,
    pub parameters: Vec<NamedTensor>,
    pub loss_history: LossHistory,
    pub random_state: RandomStateSnapshot,
}

pub fn write_model(path: &Path, model: &SavedModel) -> Result<()> {
    let temp = temporary_path(path);
    let written = (|| -> Result<()> {
        let mut writer = BufWriter::new(File::create(&temp)?);
        writer.write_all(MAGIC)?;
        bincode::serialize_into(&mut writer, model)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    fs::rename(&temp, path)?;
    Ok(())
}

/// 모델 파일 읽기. 본문은 메모리에 올린 뒤 디코딩하므로 길이 필드는 남은 바이트 수로 제한된다
pub fn read_model(path: &Path) -> Result<SavedModel> {
    let bytes = fs::read(path)?;

    if bytes.len() < MAGIC.len() {
        return Err(TvaeError::IncompatibleModel(format!(
            "{} is too short to be a model file",
            path.display()
        )));
    }
    let (magic, body) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(TvaeError::IncompatibleModel(format!(
            "{} is not a TVAE model file",
            path.display()
        )));
    }

    let model: SavedModel = bincode::deserialize(body)?;
    if model.format_version != FORMAT_VERSION {
        return Err(TvaeError::IncompatibleModel(format!(
            "format version {} is not supported (expected {})",
            model.format_version, FORMAT_VERSION
        )));
    }
    model.config.validate()?;
    Ok(model)
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "model".into());
    name.push(".tmp");
    path.with_file_name(name)
}
