//! # Manifest 模块
//!
//! 剧本清单：入口剧本名与演出资源名册。
//!
//! ## 设计原则
//!
//! - JSON 文档，serde 直接建模
//! - 格式错误属于创作期配置错误，立即暴露，不重试

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

/// 剧本清单
///
/// 名册用于加载期登记立绘/模型，运行期引用未登记的标识符是致命错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInfo {
    /// 默认入口剧本名
    pub default_scenario: String,

    /// 登记的立绘标识符
    #[serde(default)]
    pub sprites: Vec<String>,

    /// 登记的模型标识符
    #[serde(default)]
    pub models: Vec<String>,
}

impl ScenarioInfo {
    /// 从 JSON 文本解析清单
    pub fn from_json(text: &str) -> ScenarioResult<Self> {
        serde_json::from_str(text).map_err(|e| ScenarioError::Manifest {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let json = r#"{
            "default_scenario": "intro",
            "sprites": ["hero", "rival"],
            "models": ["hero_l2d"]
        }"#;

        let info = ScenarioInfo::from_json(json).unwrap();
        assert_eq!(info.default_scenario, "intro");
        assert_eq!(info.sprites, vec!["hero", "rival"]);
        assert_eq!(info.models, vec!["hero_l2d"]);
    }

    #[test]
    fn test_rosters_default_empty() {
        let info = ScenarioInfo::from_json(r#"{ "default_scenario": "main" }"#).unwrap();
        assert!(info.sprites.is_empty());
        assert!(info.models.is_empty());
    }

    #[test]
    fn test_malformed_manifest_is_fatal() {
        let err = ScenarioInfo::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScenarioError::Manifest { .. }));
    }

    #[test]
    fn test_manifest_roundtrip() {
        let info = ScenarioInfo {
            default_scenario: "intro".to_string(),
            sprites: vec!["hero".to_string()],
            models: vec![],
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(ScenarioInfo::from_json(&json).unwrap(), info);
    }
}
