//! Max Drawdown 最大回撤模块
//!
//! 本模块提供了 Max Drawdown（最大回撤）的计算逻辑。
//! 最大回撤是财富路径在整个序列中最深的峰值到谷值下降。
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/m/maximum-drawdown-mdd.asp>

use crate::statistic::metric::drawdown::DrawdownPoint;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// [`MaxDrawdown`] 是财富路径最深的峰值到谷值下降。
///
/// ## 字段说明
///
/// - **value**: 回撤值，与 [`DrawdownTable`](super::DrawdownTable) 相同的符号约定（<= 0，
///   例如 -0.2 表示 20% 的回撤）
/// - **time_peak**: 回撤开始前最后一次创出峰值的索引
/// - **time_trough**: 谷值所在的索引
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize, Constructor)]
pub struct MaxDrawdown<Index> {
    /// 回撤值（<= 0）。
    pub value: f64,
    /// 峰值所在的索引。
    pub time_peak: Index,
    /// 谷值所在的索引。
    pub time_trough: Index,
}

/// [`MaxDrawdown`] 生成器。
///
/// 按时间顺序接收 [`DrawdownPoint`]，跟踪最近一次峰值的索引，
/// 并在出现更深的回撤时替换当前最大回撤。
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Constructor)]
pub struct MaxDrawdownGenerator<Index> {
    /// 最近一次创出峰值的索引。
    pub time_peak: Option<Index>,
    /// 当前最大回撤。
    pub max: Option<MaxDrawdown<Index>>,
}

impl<Index> Default for MaxDrawdownGenerator<Index> {
    fn default() -> Self {
        Self {
            time_peak: None,
            max: None,
        }
    }
}

impl<Index> MaxDrawdownGenerator<Index>
where
    Index: Clone,
{
    /// 使用下一个 `(索引, DrawdownPoint)` 更新内部状态。
    pub fn update(&mut self, index: &Index, point: DrawdownPoint) {
        let deeper = self
            .max
            .as_ref()
            .is_none_or(|current| point.drawdown < current.value);

        match &self.time_peak {
            Some(time_peak) if point.drawdown < 0.0 => {
                if deeper {
                    self.max = Some(MaxDrawdown {
                        value: point.drawdown,
                        time_peak: time_peak.clone(),
                        time_trough: index.clone(),
                    });
                }
            }
            // 处于峰值（或首个值）时只记录峰值索引
            _ => self.time_peak = Some(index.clone()),
        }
    }

    /// 生成当前的 [`MaxDrawdown`]（如果存在）。
    pub fn generate(&self) -> Option<MaxDrawdown<Index>> {
        self.max.clone()
    }
}
