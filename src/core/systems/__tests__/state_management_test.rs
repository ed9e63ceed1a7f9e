//! # 손실 기록 테스트

use crate::core::systems::state_management::{LossHistory, LossRecord};
use crate::core::systems::progress::{loss_description, progress_line, TrainingProgress};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[test]
fn 손실_기록_추가_테스트() {
    let mut history = LossHistory::new();
    history.push(0, 0, 3.5);
    history.push(0, 1, 2.5);
    history.push(1, 0, 1.0);

    assert_eq!(history.len(), 3);
    assert_eq!(history.last(), Some(&LossRecord { epoch: 1, batch: 0, loss: 1.0 }));
    assert_eq!(history.epoch_means(), vec![(0, 3.0), (1, 1.0)]);

    history.clear();
    assert!(history.is_empty());

    println!("✅ 손실 기록 테스트 통과");
}

#[test]
fn 손실_기록_csv_테스트() {
    let mut history = LossHistory::new();
    history.push(0, 0, 1.5);
    history.push(1, 0, 0.25);

    let mut buffer = Vec::new();
    history.write_csv(&mut buffer).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), "Epoch,Batch,Loss\n0,0,1.5\n1,0,0.25\n");
}

#[test]
fn 손실_문구_소수점_3자리_테스트() {
    assert_eq!(loss_description(0.0), "Loss: 0.000");
    assert_eq!(loss_description(1.23456), "Loss: 1.235");
    assert_eq!(loss_description(-12.0), "Loss: -12.000");
}

#[test]
fn 비활성_진행률_테스트() {
    let mut progress = TrainingProgress::new(10, false);
    assert!(!progress.is_enabled());
    progress.epoch_finished(1.0);
    progress.finish();
}

/// 진행률 출력을 모아두는 버퍼
#[derive(Clone, Default)]
struct 공유_버퍼(Arc<Mutex<Vec<u8>>>);

impl Write for 공유_버퍼 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn 진행률_줄_형식_테스트() {
    assert_eq!(progress_line(6.66905, 10, 10), "Loss: 6.669: 100%| 10/10");
    assert_eq!(progress_line(1.0, 1, 4), "Loss: 1.000: 25%| 1/4");
}

#[test]
fn writer_진행률_출력_테스트() {
    let buffer = 공유_버퍼::default();
    let mut progress = TrainingProgress::with_writer(3, buffer.clone());
    assert!(progress.is_enabled());

    progress.epoch_finished(3.0);
    progress.epoch_finished(2.5);
    progress.epoch_finished(0.1234);
    progress.finish();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Loss: 3.000: 33%| 1/3");
    assert_eq!(lines[2], "Loss: 0.123: 100%| 3/3");

    println!("✅ writer 진행률 출력 테스트 통과");
}
