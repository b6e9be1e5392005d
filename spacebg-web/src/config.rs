use spacebg_core::{ConfigError, SceneConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Parse a JSON scene config passed in from the page. Missing fields take
/// their defaults.
pub fn parse_config(json: &str) -> Result<SceneConfig, LoadConfigError> {
    let config: SceneConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config =
            parse_config(r#"{ "starfield": { "count": 500 }, "speed": { "boost": 0.3 }, "seed": 7 }"#)
                .unwrap();
        assert_eq!(config.starfield.count, 500);
        assert_eq!(config.starfield.size, 0.7);
        assert_eq!(config.speed.base, 0.005);
        assert_eq!(config.speed.boost, 0.3);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_colors_are_plain_numbers() {
        let config = parse_config(r#"{ "asteroids": { "color": 16711680 } }"#).unwrap();
        assert_eq!(config.asteroids.color.0, 0xff0000);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_config("{ starfield: ").unwrap_err();
        assert!(matches!(err, LoadConfigError::Json(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config(r#"{ "travel": { "lower_bound": 10.0, "upper_bound": -10.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, LoadConfigError::Invalid(ConfigError::TravelBand { .. })));
        assert!(err.to_string().contains("travel band"));
    }

    #[test]
    fn test_zero_rotation_rejected_before_build() {
        let err = parse_config(r#"{ "asteroids": { "max_rotation": 0.0 }, "seed": 1 }"#).unwrap_err();
        assert!(matches!(err, LoadConfigError::Invalid(ConfigError::MaxRotation(_))));
    }
}
