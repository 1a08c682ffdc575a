//! Summary 风险摘要模块
//!
//! 本模块提供了单个收益率序列的风险摘要。
//! [`RiskSummary`] 使用 [`RiskConfig`] 中的参数一次性计算所有风险指标。

use crate::{
    config::RiskConfig,
    error::RiskError,
    series::ReturnSeries,
    statistic::{
        metric::{
            drawdown::{MaxDrawdown, drawdown_with_base},
            normality::{JarqueBera, jarque_bera},
            semideviation::semideviation,
            var::{cvar_historic, var_gaussian, var_historic},
        },
        moments::Moments,
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 单个收益率序列的风险摘要。
///
/// ## 字段说明
///
/// - **count**: 观测值数量
/// - **max_drawdown**: 最大回撤（财富从未低于峰值时为 `None`）
/// - **skewness** / **kurtosis**: 偏度与原始峰度
/// - **semideviation**: 半偏差
/// - **jarque_bera** / **is_normal**: 正态性检验结果与结论
/// - **var_historic** / **cvar_historic**: 历史 VaR 与 CVaR
/// - **var_gaussian** / **var_modified**: Gaussian VaR 与 Cornish-Fisher 修正 VaR
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RiskSummary<Index = DateTime<Utc>> {
    /// 观测值数量。
    pub count: usize,
    /// 最大回撤（可选）。
    pub max_drawdown: Option<MaxDrawdown<Index>>,
    /// 偏度。
    pub skewness: f64,
    /// 原始峰度。
    pub kurtosis: f64,
    /// 半偏差。
    pub semideviation: f64,
    /// Jarque-Bera 检验结果。
    pub jarque_bera: JarqueBera,
    /// 在 `normality_level` 下是否服从正态分布。
    pub is_normal: bool,
    /// 历史 VaR。
    pub var_historic: f64,
    /// 历史 CVaR。
    pub cvar_historic: f64,
    /// Gaussian VaR。
    pub var_gaussian: f64,
    /// Cornish-Fisher 修正 VaR。
    pub var_modified: f64,
}

impl<Index> RiskSummary<Index>
where
    Index: Clone,
{
    /// 使用 `config` 生成 `returns` 的 [`RiskSummary`]。
    ///
    /// # 错误
    ///
    /// - `config` 校验失败：见 [`RiskConfig::validate`]
    /// - 空序列：[`RiskError::Empty`]
    ///
    /// # 使用示例
    ///
    /// ```rust
    /// use quantrisk::{ReturnSeries, RiskConfig, statistic::summary::RiskSummary};
    ///
    /// let returns = ReturnSeries::from_values(vec![-0.05, -0.03, -0.01, 0.0, 0.02, 0.04, 0.06]).unwrap();
    /// let summary = RiskSummary::generate(&returns, &RiskConfig::default()).unwrap();
    ///
    /// assert_eq!(summary.count, 7);
    /// assert!((summary.var_historic - 0.044).abs() < 1e-12);
    /// ```
    pub fn generate(
        returns: &ReturnSeries<Index>,
        config: &RiskConfig,
    ) -> Result<Self, RiskError> {
        config.validate()?;

        let max_drawdown = drawdown_with_base(returns, config.wealth_base)?.max_drawdown();
        let var_historic = var_historic(returns, config.var_level)?;
        let cvar_historic = cvar_historic(returns, config.var_level)?;
        let var_gaussian_value = var_gaussian(returns, config.var_level, false)?;
        let var_modified = var_gaussian(returns, config.var_level, true)?;

        let moments = Moments::calculate(returns.values());
        let jarque_bera = jarque_bera(returns.values());

        let summary = Self {
            count: moments.count,
            max_drawdown,
            skewness: moments.skewness,
            kurtosis: moments.kurtosis,
            semideviation: semideviation(returns),
            jarque_bera,
            is_normal: jarque_bera.is_normal(config.normality_level),
            var_historic,
            cvar_historic,
            var_gaussian: var_gaussian_value,
            var_modified,
        };

        debug!(
            count = summary.count,
            var_historic = summary.var_historic,
            var_gaussian = summary.var_gaussian,
            is_normal = summary.is_normal,
            "RiskSummary generated"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        is_normal, kurtosis, skewness,
        statistic::metric::drawdown::drawdown,
        test_utils::{daily_index, f64_is_eq},
    };

    #[test]
    fn test_risk_summary_matches_individual_metrics() {
        let base = DateTime::<Utc>::MIN_UTC;
        let returns = ReturnSeries::new(
            daily_index(base, 7),
            vec![0.02, -0.05, 0.04, -0.03, 0.06, -0.01, 0.0],
        )
        .unwrap();
        let config = RiskConfig::default();

        let summary = RiskSummary::generate(&returns, &config).unwrap();

        assert_eq!(summary.count, 7);
        assert_eq!(summary.max_drawdown, drawdown(&returns).max_drawdown());
        assert_eq!(summary.skewness, skewness(&returns));
        assert_eq!(summary.kurtosis, kurtosis(&returns));
        assert!(f64_is_eq(summary.semideviation, semideviation(&returns), 1e-15));
        assert_eq!(summary.jarque_bera, jarque_bera(returns.values()));
        assert_eq!(summary.is_normal, is_normal(&returns, config.normality_level));
        assert_eq!(
            summary.var_historic,
            var_historic(&returns, config.var_level).unwrap()
        );
        assert_eq!(
            summary.cvar_historic,
            cvar_historic(&returns, config.var_level).unwrap()
        );
        assert_eq!(
            summary.var_gaussian,
            var_gaussian(&returns, config.var_level, false).unwrap()
        );
        assert_eq!(
            summary.var_modified,
            var_gaussian(&returns, config.var_level, true).unwrap()
        );
    }

    #[test]
    fn test_risk_summary_max_drawdown_ignores_wealth_base() {
        let returns = ReturnSeries::from_values(vec![0.1, -0.1, -0.2, 0.5]).unwrap();

        let default = RiskSummary::generate(&returns, &RiskConfig::default()).unwrap();
        let unit = RiskSummary::generate(
            &returns,
            &RiskConfig {
                wealth_base: 1.0,
                ..RiskConfig::default()
            },
        )
        .unwrap();

        let default = default.max_drawdown.unwrap();
        let unit = unit.max_drawdown.unwrap();

        assert!(f64_is_eq(default.value, -0.28, 1e-12));
        assert!(f64_is_eq(unit.value, default.value, 1e-12));
        assert_eq!((default.time_peak, default.time_trough), (0, 2));
    }

    #[test]
    fn test_risk_summary_errors() {
        let empty = ReturnSeries::from_values(vec![]).unwrap();
        assert_eq!(
            RiskSummary::generate(&empty, &RiskConfig::default()),
            Err(RiskError::Empty)
        );

        let returns = ReturnSeries::from_values(vec![0.01, -0.01]).unwrap();
        let config = RiskConfig {
            var_level: -5.0,
            ..RiskConfig::default()
        };
        assert_eq!(
            RiskSummary::generate(&returns, &config),
            Err(RiskError::InvalidLevel {
                level: -5.0,
                min: 0.0,
                max: 100.0,
            })
        );
    }

    #[test]
    fn test_risk_summary_rejects_invalid_config() {
        let returns = ReturnSeries::from_values(vec![0.1, -0.1]).unwrap();

        struct TestCase {
            config: RiskConfig,
            expected: RiskError,
        }

        let cases = vec![
            // TC0: negative base would turn the 10% loss into a new peak
            TestCase {
                config: RiskConfig {
                    wealth_base: -1000.0,
                    ..RiskConfig::default()
                },
                expected: RiskError::InvalidWealthBase(-1000.0),
            },
            // TC1: zero base
            TestCase {
                config: RiskConfig {
                    wealth_base: 0.0,
                    ..RiskConfig::default()
                },
                expected: RiskError::InvalidWealthBase(0.0),
            },
            // TC2: significance level above 1
            TestCase {
                config: RiskConfig {
                    normality_level: 7.0,
                    ..RiskConfig::default()
                },
                expected: RiskError::InvalidLevel {
                    level: 7.0,
                    min: 0.0,
                    max: 1.0,
                },
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = RiskSummary::generate(&returns, &test.config);
            assert_eq!(actual, Err(test.expected), "TC{index} failed");
        }

        // The same loss is reported with a valid configuration
        let valid = RiskSummary::generate(&returns, &RiskConfig::default()).unwrap();
        let max = valid.max_drawdown.unwrap();
        assert!(f64_is_eq(max.value, -0.1, 1e-12));
    }

    #[test]
    fn test_risk_summary_serializes() {
        let returns = ReturnSeries::from_values(vec![0.01, -0.02, 0.03]).unwrap();
        let summary = RiskSummary::generate(&returns, &RiskConfig::default()).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["max_drawdown"]["time_peak"], 0);
        assert_eq!(json["max_drawdown"]["time_trough"], 1);
    }
}
