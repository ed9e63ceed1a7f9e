//! # 구성 설정 단위테스트

use crate::core::error::TvaeError;
use crate::core::systems::config::TvaeConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn 구성_기본값_테스트() {
        let config = TvaeConfig::default();

        assert_eq!(config.embedding_dim, 128);
        assert_eq!(config.compress_dims, vec![128, 128]);
        assert_eq!(config.decompress_dims, vec![128, 128]);
        assert_eq!(config.l2scale, 1e-5);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.epochs, 300);
        assert_eq!(config.loss_factor, 2.0);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());

        println!("✅ 구성 기본값 테스트 통과");
    }

    #[test]
    fn 빌더_메서드_테스트() {
        let config = TvaeConfig::new()
            .with_epochs(10)
            .with_batch_size(64)
            .with_embedding_dim(16)
            .with_compress_dims(vec![32])
            .with_decompress_dims(vec![32, 32])
            .with_learning_rate(5e-4)
            .with_loss_factor(1.0)
            .with_l2scale(0.0)
            .with_verbose(true);

        assert_eq!(config.epochs, 10);
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.embedding_dim, 16);
        assert_eq!(config.compress_dims, vec![32]);
        assert_eq!(config.decompress_dims, vec![32, 32]);
        assert!(config.verbose);

        let optimizer = config.optimizer_config();
        assert_eq!(optimizer.learning_rate, 5e-4);
        assert_eq!(optimizer.weight_decay, 0.0);
    }

    #[test]
    fn 잘못된_값_거부_테스트() {
        let cases = vec![
            TvaeConfig::new().with_epochs(0),
            TvaeConfig::new().with_batch_size(0),
            TvaeConfig::new().with_batch_size(7),
            TvaeConfig::new().with_embedding_dim(0),
            TvaeConfig::new().with_compress_dims(vec![128, 0]),
            TvaeConfig::new().with_learning_rate(0.0),
            TvaeConfig::new().with_learning_rate(f64::NAN),
            TvaeConfig::new().with_loss_factor(-1.0),
            TvaeConfig::new().with_l2scale(-1e-3),
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(TvaeError::InvalidConfig(_))),
                "거부되어야 함: {:?}",
                config
            );
        }

        println!("✅ 잘못된 구성 거부 테스트 통과");
    }

    #[test]
    fn json_구성_파싱_테스트() {
        let config = TvaeConfig::from_json_str(r#"{"epochs": 5, "verbose": true}"#).unwrap();

        assert_eq!(config.epochs, 5);
        assert!(config.verbose);
        assert_eq!(config.batch_size, 500, "누락 필드는 기본값");
    }

    #[test]
    fn 알수없는_옵션_거부_테스트() {
        let result = TvaeConfig::from_json_str(r#"{"epochs": 5, "generator_lr": 0.1}"#);
        assert!(matches!(result, Err(TvaeError::ConfigParse(_))));

        let result = TvaeConfig::from_json_str(r#"{"batch_size": 3}"#);
        assert!(matches!(result, Err(TvaeError::InvalidConfig(_))));
    }
}
