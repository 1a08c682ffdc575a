//! RiskConfig 配置模块
//!
//! 本模块提供了统计计算的可配置参数。
//! 所有字段都有默认值，JSON 中缺失的字段使用默认值补齐。
//!
//! # 使用示例
//!
//! ```rust
//! use quantrisk::RiskConfig;
//!
//! let config = RiskConfig::from_json_str(r#"{"var_level": 1.0}"#).unwrap();
//! assert_eq!(config.var_level, 1.0);
//! assert_eq!(config.normality_level, 0.01);
//! assert_eq!(config.wealth_base, 1000.0);
//! ```

use crate::{
    error::RiskError,
    statistic::metric::{
        drawdown::WEALTH_BASE, normality::DEFAULT_NORMALITY_LEVEL, var::DEFAULT_VAR_LEVEL,
    },
};
use serde::{Deserialize, Serialize};

/// 统计计算的可配置参数。
///
/// ## 字段说明
///
/// - **var_level**: VaR 与 CVaR 的百分位水平（`[0, 100]`，默认 5）
/// - **normality_level**: Jarque-Bera 检验的显著性水平（默认 0.01）
/// - **wealth_base**: 回撤财富路径的名义基数（默认 1000）
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskConfig {
    /// VaR 与 CVaR 的百分位水平。
    pub var_level: f64,
    /// Jarque-Bera 检验的显著性水平。
    pub normality_level: f64,
    /// 回撤财富路径的名义基数。
    pub wealth_base: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            var_level: DEFAULT_VAR_LEVEL,
            normality_level: DEFAULT_NORMALITY_LEVEL,
            wealth_base: WEALTH_BASE,
        }
    }
}

impl RiskConfig {
    /// 从 JSON 文本解码 [`RiskConfig`]，并通过 [`RiskConfig::validate`] 校验。
    pub fn from_json_str(input: &str) -> Result<Self, RiskError> {
        let config = serde_json::from_str::<Self>(input)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验所有字段。
    ///
    /// # 错误
    ///
    /// - `var_level` 超出 `[0, 100]` 或 `normality_level` 超出 `[0, 1]`：[`RiskError::InvalidLevel`]
    /// - `wealth_base` 不是有限正数：[`RiskError::InvalidWealthBase`]
    pub fn validate(&self) -> Result<(), RiskError> {
        RiskError::check_percentile_level(self.var_level)?;
        RiskError::check_significance_level(self.normality_level)?;
        RiskError::check_wealth_base(self.wealth_base)?;
        Ok(())
    }
}
