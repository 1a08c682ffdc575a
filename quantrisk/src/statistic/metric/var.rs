//! Value at Risk 风险价值模块
//!
//! 本模块提供了 VaR（风险价值）的计算逻辑。VaR 以正数表示损失：
//! 当左尾收益率为负时，VaR 为正。
//!
//! # 核心指标
//!
//! - **Historic VaR**: 经验百分位数取负
//! - **Historic CVaR**: 不高于经验百分位数的收益率均值取负（Expected Shortfall）
//! - **Gaussian VaR**: 假设正态分布的参数化 VaR
//! - **Modified VaR**: 使用 Cornish-Fisher 展开按偏度和峰度修正 z 分数的参数化 VaR
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/v/var.asp>

use crate::{
    error::RiskError,
    series::Returns,
    statistic::{algorithm::percentile, moments::Moments},
};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

/// VaR 的默认百分位水平（第 5 百分位）。
pub const DEFAULT_VAR_LEVEL: f64 = 5.0;

/// 计算 [`ReturnSeries`](crate::ReturnSeries) 的历史 VaR，或
/// [`ReturnTable`](crate::ReturnTable) 每一列的历史 VaR。
///
/// 返回 `level` 百分位（0 到 100）经验百分位数的相反数，使左尾损失表现为正数。
///
/// # 错误
///
/// - `level` 超出 `[0, 100]`：[`RiskError::InvalidLevel`]
/// - 序列（或任意一列）为空：[`RiskError::Empty`]
///
/// 运行时既不是序列也不是表格的输入在解码 [`ReturnData`](crate::ReturnData) 时即被拒绝
/// （[`RiskError::InvalidInput`]）。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, var_historic};
///
/// let returns = ReturnSeries::from_values(vec![-0.05, -0.03, -0.01, 0.0, 0.02, 0.04, 0.06]).unwrap();
/// let var = var_historic(&returns, 5.0).unwrap();
/// assert!((var - 0.044).abs() < 1e-12);
/// ```
pub fn var_historic<R>(returns: &R, level: f64) -> Result<R::Output<f64>, RiskError>
where
    R: Returns,
{
    let level = RiskError::check_percentile_level(level)?;

    returns.try_aggregate(|values| {
        percentile(values, level)
            .map(|value| -value)
            .ok_or(RiskError::Empty)
    })
}

/// 计算历史 CVaR（Expected Shortfall）：所有不高于 `level` 百分位数的收益率的均值取负。
///
/// 错误条件与 [`var_historic`] 相同。
pub fn cvar_historic<R>(returns: &R, level: f64) -> Result<R::Output<f64>, RiskError>
where
    R: Returns,
{
    let level = RiskError::check_percentile_level(level)?;

    returns.try_aggregate(|values| {
        let threshold = percentile(values, level).ok_or(RiskError::Empty)?;

        // 最小值总是不高于任何百分位数，因此尾部非空
        let (sum, count) = values
            .iter()
            .filter(|value| **value <= threshold)
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

        Ok(-(sum / count as f64))
    })
}

/// 计算参数化 Gaussian VaR（`modified = true` 时为 Cornish-Fisher 修正 VaR）。
///
/// ## 计算流程
///
/// 1. `z = Phi^-1(level / 100)`，`level = 5` 时 `z ≈ -1.645`
/// 2. 如果 `modified`，使用偏度 `s` 与原始峰度 `k` 修正 `z`，见 [`cornish_fisher_z`]
/// 3. 返回 `-(mean + z * sigma)`，`sigma` 为总体标准差
///
/// # 错误
///
/// - `level` 超出 `[0, 100]`：[`RiskError::InvalidLevel`]
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, var_gaussian};
///
/// let returns = ReturnSeries::from_values(vec![-0.05, -0.03, -0.01, 0.0, 0.02, 0.04, 0.06]).unwrap();
///
/// let gaussian = var_gaussian(&returns, 5.0, false).unwrap();
/// let modified = var_gaussian(&returns, 5.0, true).unwrap();
/// assert!(gaussian > 0.0 && modified > 0.0);
/// ```
pub fn var_gaussian<R>(returns: &R, level: f64, modified: bool) -> Result<R::Output<f64>, RiskError>
where
    R: Returns,
{
    let level = RiskError::check_percentile_level(level)?;
    let z = Normal::standard().inverse_cdf(level / 100.0);

    Ok(returns.aggregate(|values| {
        let moments = Moments::calculate(values);

        let z = match modified {
            true => cornish_fisher_z(z, moments.skewness, moments.kurtosis),
            false => z,
        };

        debug!(level, z, modified, "var_gaussian z score");

        -(moments.mean + z * moments.std_dev)
    }))
}

/// 使用 Cornish-Fisher 展开按偏度 `s` 和原始峰度 `k` 修正标准正态分位数 `z`。
///
/// `z' = z + (z^2 - 1)s/6 + (z^3 - 3z)(k - 3)/24 - (2z^3 - 5z)s^2/36`
///
/// `k` 必须是原始峰度（见 [`Moments::kurtosis`]），公式自身减去 3。
pub fn cornish_fisher_z(z: f64, skewness: f64, kurtosis: f64) -> f64 {
    z + (z.powi(2) - 1.0) * skewness / 6.0 + (z.powi(3) - 3.0 * z) * (kurtosis - 3.0) / 24.0
        - (2.0 * z.powi(3) - 5.0 * z) * skewness.powi(2) / 36.0
}
