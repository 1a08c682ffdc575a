//! Normality 正态性检验模块
//!
//! 使用 Jarque-Bera 检验判断收益率序列是否服从正态分布。
//!
//! # 计算公式
//!
//! `JB = N / 6 * (S^2 + (K - 3)^2 / 4)`
//!
//! 其中 `S` 为偏度、`K` 为原始峰度（均使用总体标准差，见 [`Moments`]）。
//! 在正态性原假设下 `JB` 渐近服从自由度为 2 的卡方分布，p 值为其生存函数。
//!
//! # 参考文档
//!
//! <https://en.wikipedia.org/wiki/Jarque%E2%80%93Bera_test>

use crate::{series::ReturnSeries, statistic::moments::Moments};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

/// [`is_normal`] 的默认显著性水平（1%）。
pub const DEFAULT_NORMALITY_LEVEL: f64 = 0.01;

const DEGREES_OF_FREEDOM: f64 = 2.0;

/// Jarque-Bera 检验结果。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize, Display)]
#[display("JarqueBera(statistic: {statistic}, p_value: {p_value})")]
pub struct JarqueBera {
    /// 检验统计量。
    pub statistic: f64,
    /// 自由度为 2 的卡方分布下的 p 值。
    pub p_value: f64,
}

impl JarqueBera {
    /// 在显著性水平 `level` 下是否无法拒绝正态性原假设（`p_value > level`）。
    pub fn is_normal(&self, level: f64) -> bool {
        self.p_value > level
    }
}

/// 对 `values` 执行 Jarque-Bera 检验。
///
/// 零方差或空输入时统计量与 p 值均为 NaN。
pub fn jarque_bera(values: &[f64]) -> JarqueBera {
    let moments = Moments::calculate(values);
    let n = moments.count as f64;

    let statistic =
        n / 6.0 * (moments.skewness.powi(2) + moments.excess_kurtosis().powi(2) / 4.0);

    let p_value = if statistic.is_nan() {
        f64::NAN
    } else {
        ChiSquared::new(DEGREES_OF_FREEDOM).map_or(f64::NAN, |chi| chi.sf(statistic))
    };

    debug!(count = moments.count, statistic, p_value, "JarqueBera calculated");

    JarqueBera { statistic, p_value }
}

/// 应用 Jarque-Bera 检验判断收益率序列是否服从正态分布。
///
/// 如果 p 值大于 `level`（无法拒绝正态性），返回 `true`，否则返回 `false`。
/// 默认显著性水平见 [`DEFAULT_NORMALITY_LEVEL`]。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, is_normal, statistic::metric::normality::DEFAULT_NORMALITY_LEVEL};
///
/// let returns = ReturnSeries::from_values(vec![-0.01, 0.0, 0.01, -0.005, 0.005]).unwrap();
/// assert!(is_normal(&returns, DEFAULT_NORMALITY_LEVEL));
/// ```
pub fn is_normal<Index>(returns: &ReturnSeries<Index>, level: f64) -> bool {
    jarque_bera(returns.values()).is_normal(level)
}
