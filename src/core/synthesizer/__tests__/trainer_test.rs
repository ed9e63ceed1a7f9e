use crate::core::data::{Column, Table};
use crate::core::network::{Decoder, Encoder, ParameterStore, RandomWeights};
use crate::core::synthesizer::Trainer;
use crate::core::systems::{progress_line, LossHistory, RandomState, TrainingProgress, TvaeConfig};
use crate::core::transform::DataTransformer;
use candle_core::Device;
use std::io::Write;
use std::sync::{Arc, Mutex};

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
fn 마지막_진행률_줄과_손실_기록_일치_테스트() {
    let table = Table::new(vec![
        Column::continuous("value", (0..40).map(|i| (i % 8) as f64).collect()),
        Column::categorical("label", (0..40).map(|i| ["x", "y"][i % 2])),
    ])
    .unwrap();
    let config = TvaeConfig::new()
        .with_epochs(5)
        .with_batch_size(100)
        .with_embedding_dim(4)
        .with_compress_dims(vec![8])
        .with_decompress_dims(vec![8])
        .with_verbose(true);

    let device = Device::Cpu;
    let mut state = RandomState::from_seed(9);
    let transformer = DataTransformer::fit(&table, &["label"], &mut state).unwrap();
    let data = transformer.transform(&table, &mut state).unwrap();
    let width = transformer.output_dimensions();

    let mut store = ParameterStore::new();
    let (encoder, decoder) = {
        let mut source = RandomWeights::new(&mut state, &device);
        let encoder = Encoder::new(width, &config.compress_dims, config.embedding_dim, &mut source, &mut store).unwrap();
        let decoder = Decoder::new(config.embedding_dim, &config.decompress_dims, width, &mut source, &mut store).unwrap();
        (encoder, decoder)
    };
    let spans = transformer.spans();

    let buffer = 공유_버퍼::default();
    let mut history = LossHistory::new();
    Trainer {
        config: &config,
        encoder: &encoder,
        decoder: &decoder,
        parameters: store.vars(),
        spans: &spans,
        device: &device,
    }
    .train_with_progress(
        data.view(),
        &mut state,
        &mut history,
        TrainingProgress::with_writer(config.epochs, buffer.clone()),
    )
    .unwrap();

    // 40행 / 배치 100 → 에포크당 한 스텝
    assert_eq!(history.len(), 5);
    assert!(history.records().iter().all(|r| r.batch == 0));

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let last_line = output.lines().last().unwrap();
    let last_loss = history.last().unwrap().loss;
    assert_eq!(last_line, progress_line(last_loss, 5, 5));
    assert!(last_line.starts_with(&format!("Loss: {:.3}: 100%", last_loss)));

    println!("✅ 진행률 마지막 줄: {}", last_line);
}
