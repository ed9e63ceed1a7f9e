use crate::core::data::{Column, ColumnData, ColumnKind, Table};
use crate::core::error::TvaeError;
use crate::core::synthesizer::Tvae;
use crate::core::systems::{ModelStatus, TvaeConfig};
use tempfile::tempdir;

fn 작은_구성() -> TvaeConfig {
    TvaeConfig::new()
        .with_epochs(2)
        .with_batch_size(10)
        .with_embedding_dim(4)
        .with_compress_dims(vec![8])
        .with_decompress_dims(vec![8])
}

fn 작은_표() -> Table {
    Table::new(vec![
        Column::continuous("age", (0..30).map(|i| 20.0 + (i % 10) as f64).collect()),
        Column::categorical("city", (0..30).map(|i| ["seoul", "busan"][i % 2])),
    ])
    .unwrap()
}

fn 학습된_모델(seed: u64) -> Tvae {
    let mut model = Tvae::new(작은_구성()).unwrap();
    model.set_random_state(seed);
    model.fit(&작은_표(), &["city"]).unwrap();
    model
}

#[test]
fn 학습_전_샘플링_오류_테스트() {
    let mut model = Tvae::new(작은_구성()).unwrap();
    assert_eq!(model.status(), ModelStatus::Uninitialized);
    assert!(matches!(model.sample(5), Err(TvaeError::NotFitted)));

    let dir = tempdir().unwrap();
    assert!(matches!(model.save(dir.path().join("m.bin")), Err(TvaeError::NotFitted)));
}

#[test]
fn 잘못된_구성_거부_테스트() {
    assert!(matches!(
        Tvae::new(작은_구성().with_batch_size(7)),
        Err(TvaeError::InvalidConfig(_))
    ));
    assert!(matches!(
        Tvae::from_json_config(r#"{"epochs": 3, "dropout": 0.5}"#),
        Err(TvaeError::ConfigParse(_))
    ));

    let model = Tvae::from_json_config(r#"{"epochs": 3}"#).unwrap();
    assert_eq!(model.config().epochs, 3);
    assert_eq!(model.config().batch_size, 500);
}

#[test]
fn 학습_후_샘플_형상_테스트() {
    let mut model = 학습된_모델(0);
    assert_eq!(model.status(), ModelStatus::Fitted);

    // 30행 / 배치 10 → 에포크당 3 스텝
    assert_eq!(model.loss_values().len(), 6);
    assert!(model.loss_values().iter().all(|r| r.loss.is_finite()));

    let sampled = model.sample(25).unwrap();
    assert_eq!(sampled.shape(), (25, 2));
    assert_eq!(sampled.column_names(), vec!["age", "city"]);
    assert_eq!(sampled.dtypes(), vec![ColumnKind::Continuous, ColumnKind::Categorical]);

    let cities = sampled.column("city").unwrap().data.as_categorical().unwrap();
    assert!(cities.iter().all(|c| c == "seoul" || c == "busan"));

    let empty = model.sample(0).unwrap();
    assert_eq!(empty.shape(), (0, 2));

    println!("✅ 학습 후 샘플 형상 테스트 통과");
}

#[test]
fn 같은_시드_재현성_테스트() {
    let mut first = 학습된_모델(42);
    let mut second = 학습된_모델(42);

    assert_eq!(first.loss_values(), second.loss_values());
    assert_eq!(first.sample(12).unwrap(), second.sample(12).unwrap());
}

#[test]
fn 실패한_학습_상태_복귀_테스트() {
    let mut model = Tvae::new(작은_구성()).unwrap();
    let result = model.fit(&작은_표(), &["city", "missing"]);

    match result {
        Err(TvaeError::InvalidColumns(cols)) => assert_eq!(cols, vec!["missing".to_string()]),
        other => panic!("InvalidColumns 기대, 실제: {:?}", other),
    }
    assert_eq!(model.status(), ModelStatus::Uninitialized);
    assert!(model.loss_values().is_empty());
}

#[test]
fn 저장_불러오기_테스트() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tvae.bin");

    let mut model = 학습된_모델(7);
    model.save(&path).unwrap();
    let mut loaded = Tvae::load(&path).unwrap();

    assert_eq!(loaded.status(), ModelStatus::Fitted);
    assert_eq!(loaded.config(), model.config());
    assert_eq!(loaded.loss_values(), model.loss_values());
    assert_eq!(loaded.transformer().unwrap(), model.transformer().unwrap());

    // 저장 시점의 RNG 상태에서 이어지므로 같은 샘플
    let original = model.sample(15).unwrap();
    let restored = loaded.sample(15).unwrap();
    assert_eq!(original, restored);

    match restored.column("age").unwrap().data {
        ColumnData::Continuous(ref values) => assert!(values.iter().all(|v| v.is_finite())),
        _ => panic!("age는 연속 컬럼이어야 함"),
    }

    println!("✅ 저장/불러오기 테스트 통과");
}

#[test]
fn 재학습시_손실_기록_초기화_테스트() {
    let mut model = 학습된_모델(3);
    assert_eq!(model.loss_values().len(), 6);

    model.fit(&작은_표(), &["city"]).unwrap();
    assert_eq!(model.loss_values().len(), 6);
    assert_eq!(model.loss_values()[0].epoch, 0);
}

#[test]
fn 발산한_학습_오류_테스트() {
    // f32 범위를 넘는 가중치로 손실이 무한대가 된다
    let mut model = Tvae::new(작은_구성().with_loss_factor(1e300)).unwrap();
    model.set_random_state(0);

    match model.fit(&작은_표(), &["city"]) {
        Err(TvaeError::TrainingDiverged { epoch, batch, loss }) => {
            assert_eq!((epoch, batch), (0, 0));
            assert!(!loss.is_finite());
        }
        other => panic!("TrainingDiverged 기대, 실제: {:?}", other),
    }
    assert_eq!(model.status(), ModelStatus::Uninitialized);
    assert!(model.loss_values().is_empty());
    assert!(matches!(model.sample(3), Err(TvaeError::NotFitted)));
}
