//! Drawdown 回撤模块
//!
//! 本模块提供了 Drawdown（回撤）的计算逻辑。
//! 回撤是财富路径相对于其历史峰值的百分比下降，是衡量下行波动率的指标。
//!
//! # 计算流程
//!
//! 1. **财富路径**: 以 1000 为名义基数，逐期乘以 `(1 + r)` 得到累计财富
//! 2. **历史峰值**: 截至当前（包含当前）的财富累计最大值
//! 3. **回撤**: `(财富 - 峰值) / 峰值`，取值范围 `(-inf, 0]`
//!
//! 整个序列只有一条连续的历史峰值，没有平滑或重置逻辑。
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/d/drawdown.asp>

use crate::{
    error::RiskError,
    series::ReturnSeries,
    statistic::metric::drawdown::max::MaxDrawdownGenerator,
};
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use itertools::izip;
use serde::{Deserialize, Serialize};

/// 最大回撤计算逻辑。
pub mod max;

pub use max::MaxDrawdown;

/// 财富路径的默认名义基数。
pub const WEALTH_BASE: f64 = 1000.0;

/// [`DrawdownTable`] 中某一期的财富、峰值与回撤。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize, Constructor)]
pub struct DrawdownPoint {
    /// 累计财富。
    pub wealth: f64,
    /// 截至当前的历史峰值。
    pub peak: f64,
    /// 相对历史峰值的回撤（<= 0）。
    pub drawdown: f64,
}

/// 与输入收益率序列对齐的财富路径、历史峰值和回撤。
///
/// 所有列长度相同，并共享输入序列的索引。
///
/// ## 不变量
///
/// - `peaks` 单调不减，且等于 `wealth` 的累计最大值
/// - `drawdown[t] <= 0`，当 `wealth[t] == peaks[t]` 时等于 0
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DrawdownTable<Index = DateTime<Utc>> {
    /// 输入序列的索引。
    pub index: Vec<Index>,
    /// 财富路径。
    pub wealth: Vec<f64>,
    /// 历史峰值。
    pub peaks: Vec<f64>,
    /// 回撤百分比。
    pub drawdown: Vec<f64>,
}

impl<Index> DrawdownTable<Index> {
    /// 行数。
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// 是否没有任何行。
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// 按时间顺序迭代 `(索引, DrawdownPoint)`。
    pub fn iter(&self) -> impl Iterator<Item = (&Index, DrawdownPoint)> + '_ {
        izip!(&self.index, &self.wealth, &self.peaks, &self.drawdown)
            .map(|(index, &wealth, &peak, &drawdown)| {
                (index, DrawdownPoint::new(wealth, peak, drawdown))
            })
    }

    /// 计算 [`MaxDrawdown`]：最深的回撤及其峰值、谷值所在的索引。
    ///
    /// 如果财富从未低于历史峰值（包括空表），返回 `None`。
    pub fn max_drawdown(&self) -> Option<MaxDrawdown<Index>>
    where
        Index: Clone,
    {
        let mut generator = MaxDrawdownGenerator::default();
        for (index, point) in self.iter() {
            generator.update(index, point);
        }
        generator.generate()
    }
}

/// 计算收益率序列的财富路径、历史峰值与回撤，财富基数为 [`WEALTH_BASE`]。
///
/// 空序列返回空表，不返回错误。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnSeries, drawdown};
///
/// let returns = ReturnSeries::from_values(vec![0.1, -0.1, -0.2, 0.5]).unwrap();
/// let table = drawdown(&returns);
///
/// assert!((table.wealth[0] - 1100.0).abs() < 1e-9);
/// assert!((table.peaks[2] - 1100.0).abs() < 1e-9);
/// assert!((table.drawdown[2] + 0.28).abs() < 1e-12);
/// ```
pub fn drawdown<Index>(returns: &ReturnSeries<Index>) -> DrawdownTable<Index>
where
    Index: Clone,
{
    build_table(returns, WEALTH_BASE)
}

/// 与 [`drawdown`] 相同，但使用自定义的财富基数。
///
/// 回撤百分比与基数无关，基数只影响 `wealth` 与 `peaks` 的量级。
///
/// # 错误
///
/// - `base` 不是有限正数：[`RiskError::InvalidWealthBase`]
pub fn drawdown_with_base<Index>(
    returns: &ReturnSeries<Index>,
    base: f64,
) -> Result<DrawdownTable<Index>, RiskError>
where
    Index: Clone,
{
    let base = RiskError::check_wealth_base(base)?;
    Ok(build_table(returns, base))
}

fn build_table<Index>(returns: &ReturnSeries<Index>, base: f64) -> DrawdownTable<Index>
where
    Index: Clone,
{
    let wealth = returns
        .values()
        .iter()
        .scan(base, |wealth, value| {
            *wealth *= 1.0 + value;
            Some(*wealth)
        })
        .collect::<Vec<_>>();

    let peaks = wealth
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &wealth| {
            *peak = peak.max(wealth);
            Some(*peak)
        })
        .collect::<Vec<_>>();

    let drawdown = wealth
        .iter()
        .zip(&peaks)
        .map(|(wealth, peak)| (wealth - peak) / peak)
        .collect();

    DrawdownTable {
        index: returns.index().to_vec(),
        wealth,
        peaks,
        drawdown,
    }
}
