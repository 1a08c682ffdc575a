//! Error 错误处理模块
//!
//! 本模块定义了 QuantRisk 可能返回的所有错误类型。
//!
//! # 错误分类
//!
//! - **形状错误**: 输入既不是收益率序列也不是收益率表格（[`RiskError::InvalidInput`]），
//!   或者序列在构造时不满足不变量（长度不一致、索引非递增、包含 NaN/无穷大）。
//! - **参数错误**: 百分位置信水平超出 `[0, 100]`、显著性水平超出 `[0, 1]`
//!   （[`RiskError::InvalidLevel`]），或财富基数不是有限正数（[`RiskError::InvalidWealthBase`]）。
//! - **空输入**: 需要至少一个观测值的计算收到空序列（[`RiskError::Empty`]）。
//!
//! 数值退化（零方差、空的负收益子集）不会被视为错误，而是以 NaN 或无穷大的形式
//! 传播给调用方。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// QuantRisk 中生成的所有错误。
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Error)]
pub enum RiskError {
    /// 输入既不是收益率序列也不是收益率表格。
    #[error("invalid input: expected a return series or a return table, found {0}")]
    InvalidInput(String),

    /// 百分位置信水平超出允许范围。
    #[error("invalid level {level}: must be within [{min}, {max}]")]
    InvalidLevel {
        /// 提供的置信水平。
        level: f64,
        /// 允许的最小值（包含）。
        min: f64,
        /// 允许的最大值（包含）。
        max: f64,
    },

    /// 财富基数不是有限正数。
    #[error("invalid wealth base {0}: must be finite and positive")]
    InvalidWealthBase(f64),

    /// 计算需要至少一个观测值。
    #[error("return series is empty")]
    Empty,

    /// 收益率表格中存在重复的列名。
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// 值的数量与索引长度不一致。
    #[error("length mismatch: index has {expected} entries, values have {actual}")]
    LengthMismatch {
        /// 索引长度。
        expected: usize,
        /// 值的长度。
        actual: usize,
    },

    /// 索引在给定位置不是严格递增的。
    #[error("index is not strictly increasing at position {position}")]
    IndexNotIncreasing {
        /// 第一个违反顺序的位置。
        position: usize,
    },

    /// 收益率在给定位置为 NaN 或无穷大。
    #[error("non-finite return at position {position}")]
    NonFinite {
        /// 第一个非有限值的位置。
        position: usize,
    },

    /// JSON 解析失败。
    #[error("json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for RiskError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}

impl RiskError {
    /// 校验百分位置信水平位于 `[0, 100]` 之内。
    pub fn check_percentile_level(level: f64) -> Result<f64, Self> {
        Self::check_level(level, 0.0, 100.0)
    }

    /// 校验显著性水平位于 `[0, 1]` 之内。
    pub fn check_significance_level(level: f64) -> Result<f64, Self> {
        Self::check_level(level, 0.0, 1.0)
    }

    /// 校验财富基数是有限正数。
    pub fn check_wealth_base(base: f64) -> Result<f64, Self> {
        if base.is_finite() && base > 0.0 {
            Ok(base)
        } else {
            Err(Self::InvalidWealthBase(base))
        }
    }

    fn check_level(level: f64, min: f64, max: f64) -> Result<f64, Self> {
        if (min..=max).contains(&level) {
            Ok(level)
        } else {
            Err(Self::InvalidLevel { level, min, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_percentile_level() {
        struct TestCase {
            input: f64,
            expected: Result<f64, RiskError>,
        }

        let cases = vec![
            // TC0: lower bound is inclusive
            TestCase {
                input: 0.0,
                expected: Ok(0.0),
            },
            // TC1: upper bound is inclusive
            TestCase {
                input: 100.0,
                expected: Ok(100.0),
            },
            // TC2: typical level
            TestCase {
                input: 5.0,
                expected: Ok(5.0),
            },
            // TC3: negative level
            TestCase {
                input: -0.5,
                expected: Err(RiskError::InvalidLevel {
                    level: -0.5,
                    min: 0.0,
                    max: 100.0,
                }),
            },
            // TC4: level above 100
            TestCase {
                input: 101.0,
                expected: Err(RiskError::InvalidLevel {
                    level: 101.0,
                    min: 0.0,
                    max: 100.0,
                }),
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = RiskError::check_percentile_level(test.input);
            assert_eq!(actual, test.expected, "TC{index} failed");
        }
    }

    #[test]
    fn test_check_percentile_level_nan() {
        assert!(matches!(
            RiskError::check_percentile_level(f64::NAN),
            Err(RiskError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_check_significance_level() {
        assert_eq!(RiskError::check_significance_level(0.05), Ok(0.05));
        assert_eq!(RiskError::check_significance_level(1.0), Ok(1.0));
        assert_eq!(
            RiskError::check_significance_level(7.0),
            Err(RiskError::InvalidLevel {
                level: 7.0,
                min: 0.0,
                max: 1.0,
            })
        );
    }

    #[test]
    fn test_check_wealth_base() {
        struct TestCase {
            input: f64,
            valid: bool,
        }

        let cases = vec![
            // TC0: default base
            TestCase {
                input: 1000.0,
                valid: true,
            },
            // TC1: unit base
            TestCase {
                input: 1.0,
                valid: true,
            },
            // TC2: zero base
            TestCase {
                input: 0.0,
                valid: false,
            },
            // TC3: negative base
            TestCase {
                input: -1000.0,
                valid: false,
            },
            // TC4: infinite base
            TestCase {
                input: f64::INFINITY,
                valid: false,
            },
            // TC5: NaN base
            TestCase {
                input: f64::NAN,
                valid: false,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = RiskError::check_wealth_base(test.input);
            assert_eq!(actual.is_ok(), test.valid, "TC{index} failed: {actual:?}");
        }
    }

    #[test]
    fn test_display() {
        let error = RiskError::InvalidInput("a string".to_string());
        assert_eq!(
            error.to_string(),
            "invalid input: expected a return series or a return table, found a string"
        );
    }
}
