use crate::core::systems::RandomState;
use crate::core::transform::{Activation, ClusterNormalizer, MixtureConfig};
use ndarray::Array2;

#[test]
fn 출력_레이아웃_테스트() {
    let values: Vec<f64> = (0..200).map(|i| (i % 20) as f64).collect();
    let mut state = RandomState::from_seed(0);
    let normalizer = ClusterNormalizer::fit(&values, &MixtureConfig::default(), &mut state).unwrap();

    let spans = normalizer.output_info();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].dim, 1);
    assert_eq!(spans[0].activation, Activation::Tanh);
    assert_eq!(spans[1].dim, normalizer.n_modes());
    assert_eq!(spans[1].activation, Activation::Softmax);
    assert_eq!(normalizer.output_dimensions(), 1 + normalizer.n_modes());
}

#[test]
fn 변환_역변환_복원_테스트() {
    let values: Vec<f64> = (0..300).map(|i| 10.0 + (i as f64) * 0.37).collect();
    let mut state = RandomState::from_seed(1);
    let normalizer = ClusterNormalizer::fit(&values, &MixtureConfig::default(), &mut state).unwrap();

    let mut encoded = Array2::<f32>::zeros((values.len(), normalizer.output_dimensions()));
    normalizer.transform_into(&values, encoded.view_mut(), &mut state);

    for row in encoded.rows() {
        assert!(row[0].abs() <= 0.99);
        let hot: f32 = row.iter().skip(1).sum();
        assert_eq!(hot, 1.0, "모드 원-핫은 정확히 하나");
    }

    let restored = normalizer.inverse_transform(encoded.view(), None, &mut state);
    let close = values
        .iter()
        .zip(&restored)
        .filter(|(a, b)| (*a - *b).abs() < 1e-3 * a.abs().max(1.0))
        .count();
    assert!(close >= values.len() * 99 / 100, "복원 일치 {}/{}", close, values.len());

    println!("✅ 모드별 정규화 복원 테스트 통과 ({} 모드)", normalizer.n_modes());
}

#[test]
fn 시그마_노이즈_테스트() {
    let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let mut state = RandomState::from_seed(2);
    let normalizer = ClusterNormalizer::fit(&values, &MixtureConfig::default(), &mut state).unwrap();

    let mut encoded = Array2::<f32>::zeros((values.len(), normalizer.output_dimensions()));
    normalizer.transform_into(&values, encoded.view_mut(), &mut state);

    let clean = normalizer.inverse_transform(encoded.view(), None, &mut state);
    let noisy = normalizer.inverse_transform(encoded.view(), Some(0.5), &mut state);
    assert_ne!(clean, noisy);

    let mut again = RandomState::from_seed(77);
    let mut again2 = RandomState::from_seed(77);
    assert_eq!(
        normalizer.inverse_transform(encoded.view(), Some(0.5), &mut again),
        normalizer.inverse_transform(encoded.view(), Some(0.5), &mut again2)
    );
}
