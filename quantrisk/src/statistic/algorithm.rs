//! Algorithm 统计算法模块
//!
//! 本模块提供了用于分析收益率数据集的基础统计算法。
//!
//! # 核心概念
//!
//! - **Welford Online 算法**: 单次遍历计算均值和总体方差，数值稳定
//! - **百分位数**: 最近秩之间线性插值的经验百分位数

use itertools::Itertools;

/// [Welford Online](https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm)
/// 算法集合，用于单次遍历计算运行中的值，如均值和方差。
///
/// ## 算法优势
///
/// - **单次遍历**: 只需遍历数据一次
/// - **数值稳定**: 减少浮点数误差累积（相比 `E[x^2] - E[x]^2`）
pub mod welford_online {
    /// 计算下一个均值。
    ///
    /// ## 公式
    ///
    /// `new_mean = prev_mean + (next_value - prev_mean) / count`
    pub fn calculate_mean<T>(mut prev_mean: T, next_value: T, count: T) -> T
    where
        T: Copy + std::ops::Sub<Output = T> + std::ops::Div<Output = T> + std::ops::AddAssign,
    {
        prev_mean += (next_value - prev_mean) / count;
        prev_mean
    }

    /// 计算下一个 Welford Online 递推关系 M。
    ///
    /// ## 公式
    ///
    /// `M = prev_m + (new_value - prev_mean) * (new_value - new_mean)`
    pub fn calculate_recurrence_relation_m(
        prev_m: f64,
        prev_mean: f64,
        new_value: f64,
        new_mean: f64,
    ) -> f64 {
        prev_m + ((new_value - prev_mean) * (new_value - new_mean))
    }

    /// 使用 Welford Online 递推关系 M 计算有偏"总体"方差（除数为 `count`）。
    ///
    /// 如果 `count < 1`，返回 NaN：空集合的方差没有定义。
    pub fn calculate_population_variance(recurrence_relation_m: f64, count: f64) -> f64 {
        match count < 1.0 {
            true => f64::NAN,
            false => recurrence_relation_m / count,
        }
    }
}

/// 单次遍历计算 `(均值, 总体方差)`。
///
/// 空输入返回 `(NaN, NaN)`。
pub fn mean_and_population_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }

    let (count, mean, m) = values
        .iter()
        .fold((0.0, 0.0, 0.0), |(count, mean, m), &value| {
            let count = count + 1.0;
            let new_mean = welford_online::calculate_mean(mean, value, count);
            let m = welford_online::calculate_recurrence_relation_m(m, mean, value, new_mean);
            (count, new_mean, m)
        });

    (
        mean,
        welford_online::calculate_population_variance(m, count),
    )
}

/// 计算 `values` 在 `level`（0 到 100）处的经验百分位数。
///
/// 排序后在秩 `level / 100 * (N - 1)` 两侧最近的观测值之间线性插值，
/// 与常见数值库的默认百分位约定一致。调用方负责确保 `level` 位于 `[0, 100]`。
///
/// 空输入返回 `None`。
pub fn percentile(values: &[f64], level: f64) -> Option<f64> {
    let sorted = values
        .iter()
        .copied()
        .sorted_unstable_by(f64::total_cmp)
        .collect::<Vec<_>>();

    let last = sorted.len().checked_sub(1)?;
    let rank = (level / 100.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(last);
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
