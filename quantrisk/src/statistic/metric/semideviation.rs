//! Semideviation 半偏差模块
//!
//! 半偏差（也称负半偏差）只使用严格小于 0 的收益率计算总体标准差，
//! 近似衡量下行波动率而忽略上行方差。

use crate::{series::Returns, statistic::moments::population_std_dev};
use tracing::warn;

/// 计算 [`ReturnSeries`](crate::ReturnSeries) 的半偏差，或
/// [`ReturnTable`](crate::ReturnTable) 每一列的半偏差。
///
/// 如果没有负收益率，则在空子集上计算，结果为 NaN。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, semideviation};
///
/// let returns = ReturnSeries::from_values(vec![-0.02, 0.05, -0.04, 0.01]).unwrap();
/// assert!((semideviation(&returns) - 0.01).abs() < 1e-12);
///
/// let gains = ReturnSeries::from_values(vec![0.01, 0.02]).unwrap();
/// assert!(semideviation(&gains).is_nan());
/// ```
pub fn semideviation<R>(returns: &R) -> R::Output<f64>
where
    R: Returns,
{
    returns.aggregate(|values| {
        let losses = values
            .iter()
            .copied()
            .filter(|value| *value < 0.0)
            .collect::<Vec<_>>();

        if losses.is_empty() && !values.is_empty() {
            warn!(
                count = values.len(),
                "semideviation found no negative returns"
            );
        }

        population_std_dev(&losses)
    })
}
