//! Moments 矩统计模块
//!
//! 本模块集中定义了所有指标共享的矩约定：
//!
//! - **总体标准差**: 除数为 `N`（而不是 `N - 1`）
//! - **偏度**: `mean(d^3) / sigma^3`，其中 `d` 为去均值后的收益率
//! - **峰度**: `mean(d^4) / sigma^4`，原始峰度，不减 3（正态分布约为 3）
//!
//! Cornish-Fisher 修正 VaR 与 Jarque-Bera 检验都通过 [`Moments`] 获取这些值，
//! 以确保各处使用一致的约定。

use crate::{series::Returns, statistic::algorithm::mean_and_population_variance};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 收益率序列的前四阶矩统计。
///
/// 零方差（常数序列）时偏度和峰度为 NaN；空序列时所有字段为 NaN。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Moments {
    /// 观测值数量。
    pub count: usize,
    /// 算术平均值。
    pub mean: f64,
    /// 总体标准差（除数为 `N`）。
    pub std_dev: f64,
    /// 偏度。
    pub skewness: f64,
    /// 原始峰度（不减 3）。
    pub kurtosis: f64,
}

impl Moments {
    /// 计算 `values` 的 [`Moments`]。
    pub fn calculate(values: &[f64]) -> Self {
        let (mean, variance) = mean_and_population_variance(values);
        let std_dev = variance.sqrt();

        let (sum_cubed, sum_fourth) =
            values
                .iter()
                .fold((0.0, 0.0), |(sum_cubed, sum_fourth), value| {
                    let demeaned = value - mean;
                    let squared = demeaned * demeaned;
                    (sum_cubed + squared * demeaned, sum_fourth + squared * squared)
                });

        let count = values.len();
        let n = count as f64;

        if count > 0 && std_dev == 0.0 {
            warn!(count, mean, "Moments found zero variance returns");
        }

        Self {
            count,
            mean,
            std_dev,
            skewness: (sum_cubed / n) / std_dev.powi(3),
            kurtosis: (sum_fourth / n) / std_dev.powi(4),
        }
    }

    /// 超额峰度（原始峰度减 3）。
    pub fn excess_kurtosis(&self) -> f64 {
        self.kurtosis - 3.0
    }
}

/// 算术平均值，空输入返回 NaN。
pub fn mean(values: &[f64]) -> f64 {
    mean_and_population_variance(values).0
}

/// 总体标准差（除数为 `N`），空输入返回 NaN。
pub fn population_std_dev(values: &[f64]) -> f64 {
    mean_and_population_variance(values).1.sqrt()
}

/// 计算 [`ReturnSeries`](crate::ReturnSeries) 的偏度，或 [`ReturnTable`](crate::ReturnTable)
/// 每一列的偏度。
///
/// 使用总体标准差：`mean((r - mean(r))^3) / sigma^3`。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, skewness};
///
/// let symmetric = ReturnSeries::from_values(vec![-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap();
/// assert!(skewness(&symmetric).abs() < 1e-12);
/// ```
pub fn skewness<R>(returns: &R) -> R::Output<f64>
where
    R: Returns,
{
    returns.aggregate(|values| Moments::calculate(values).skewness)
}

/// 计算 [`ReturnSeries`](crate::ReturnSeries) 的原始峰度，或
/// [`ReturnTable`](crate::ReturnTable) 每一列的原始峰度。
///
/// 使用总体标准差：`mean((r - mean(r))^4) / sigma^4`，不减 3。
pub fn kurtosis<R>(returns: &R) -> R::Output<f64>
where
    R: Returns,
{
    returns.aggregate(|values| Moments::calculate(values).kurtosis)
}
