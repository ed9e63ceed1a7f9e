//! # 샘플러
//!
//! 사전분포 N(0, I)에서 잠재 벡터를 뽑아 디코딩하고 역변환으로 표를 만든다.

use crate::core::data::Table;
use crate::core::error::{Result, TvaeError};
use crate::core::network::Decoder;
use crate::core::systems::RandomState;
use crate::core::transform::DataTransformer;
use candle_core::Device;
use ndarray::Array2;

/// 정확히 `n`행을 생성. 배치 크기 단위로 디코딩하며 마지막 배치는 남은 만큼만
pub fn sample_rows(
    n: usize,
    batch_size: usize,
    decoder: &Decoder,
    transformer: &DataTransformer,
    random_state: &mut RandomState,
    device: &Device,
) -> Result<Table> {
    let width = transformer.output_dimensions();
    let mut values: Vec<f32> = Vec::with_capacity(n * width);
    let mut sigmas: Vec<f32> = decoder.sigma().to_vec1::<f32>()?;

    let mut remaining = n;
    while remaining > 0 {
        let rows = remaining.min(batch_size);
        let noise = random_state.standard_normal_tensor(rows, decoder.embedding_dim, device)?;
        let (fake, batch_sigmas) = decoder.forward(&noise)?;
        let fake = fake.tanh()?;

        for row in fake.to_vec2::<f32>()? {
            values.extend(row);
        }
        sigmas = batch_sigmas.to_vec1::<f32>()?;
        remaining -= rows;
    }

    let data = Array2::from_shape_vec((n, width), values)
        .map_err(|e| TvaeError::InvalidData(e.to_string()))?;
    transformer.inverse_transform(data.view(), Some(&sigmas), random_state)
}
