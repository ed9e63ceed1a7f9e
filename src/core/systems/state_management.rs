//! # 학습 상태 관리
//!
//! 모델 수명 주기 상태와 학습 스텝별 손실 기록

use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// 모델 수명 주기
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    /// 생성 직후 (sample/save 불가)
    Uninitialized,
    /// fit 진행 중
    Fitting,
    /// 학습 완료
    Fitted,
}

/// 학습 스텝 하나의 손실
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    pub epoch: usize,
    pub batch: usize,
    pub loss: f32,
}

/// 시간순 손실 기록. 추가만 가능하고 새 fit에서만 초기화된다
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    records: Vec<LossRecord>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, epoch: usize, batch: usize, loss: f32) {
        self.records.push(LossRecord { epoch, batch, loss });
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[LossRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LossRecord> {
        self.records.last()
    }

    /// 에포크별 평균 손실
    pub fn epoch_means(&self) -> Vec<(usize, f32)> {
        let mut means: Vec<(usize, f32, usize)> = Vec::new();
        for record in &self.records {
            match means.last_mut() {
                Some((epoch, sum, count)) if *epoch == record.epoch => {
                    *sum += record.loss;
                    *count += 1;
                }
                _ => means.push((record.epoch, record.loss, 1)),
            }
        }
        means
            .into_iter()
            .map(|(epoch, sum, count)| (epoch, sum / count as f32))
            .collect()
    }

    /// `Epoch,Batch,Loss` 헤더의 CSV로 기록
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(["Epoch", "Batch", "Loss"])?;
        for record in &self.records {
            writer.write_record([
                record.epoch.to_string(),
                record.batch.to_string(),
                record.loss.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
