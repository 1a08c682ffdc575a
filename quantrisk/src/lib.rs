#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]
#![allow(clippy::type_complexity, type_alias_bounds)]

//! # QuantRisk
//! QuantRisk 是一个用于计算周期性资产收益率序列风险与收益统计量的 Rust 库。
//! * **无状态**：所有函数都借用不可变输入并返回新的结果，可以在任意线程中并行调用。
//! * **强类型**：单一序列（[`ReturnSeries`]）与多列表格（[`ReturnTable`]）通过
//!   [`Returns`] Trait 统一处理，表格输入会逐列应用同一个单序列实现。
//! * **一致的矩约定**：总体标准差（除数为 N）与原始峰度（不减 3）集中定义在
//!   [`statistic::moments`] 中，所有指标共享。
//!
//! ## 概述
//! 从高层次来看，它提供了以下统计量：
//! * Drawdown：财富路径、历史峰值和回撤百分比。
//! * 分布形态：偏度（skewness）与峰度（kurtosis）。
//! * 下行风险：半偏差（semideviation）、历史 VaR、历史 CVaR、参数化 Gaussian VaR
//!   以及 Cornish-Fisher 修正 VaR。
//! * 正态性检验：Jarque-Bera 检验。
//! * 汇总：[`RiskSummary`](statistic::summary::RiskSummary) 一次性计算单个序列的全部指标。
//!
//! ## 快速开始
//!
//! ```rust
//! use quantrisk::{ReturnSeries, var_historic, var_gaussian};
//!
//! let returns = ReturnSeries::from_values(vec![-0.05, -0.03, -0.01, 0.0, 0.02, 0.04, 0.06]).unwrap();
//!
//! let historic = var_historic(&returns, 5.0).unwrap();
//! assert!((historic - 0.044).abs() < 1e-12);
//!
//! let gaussian = var_gaussian(&returns, 5.0, false).unwrap();
//! assert!(gaussian > 0.0);
//! ```

use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// 统计计算的可配置参数（VaR 置信水平、正态性检验显著性水平、财富基数）。
pub mod config;

/// 定义 QuantRisk 中所有可能的错误。
pub mod error;

/// 提供 QuantRisk 的默认 Tracing 日志初始化器。
pub mod logging;

/// 收益率序列、收益率表格以及逐列聚合的 [`Returns`] Trait。
pub mod series;

/// 用于分析收益率数据集的统计算法、风险指标和统计摘要。
///
/// 例如：`drawdown`、`var_gaussian`、`RiskSummary` 等。
pub mod statistic;

pub use config::RiskConfig;
pub use error::RiskError;
pub use series::{Aggregated, ReturnData, ReturnSeries, ReturnTable, Returns};
pub use statistic::{
    metric::{
        drawdown::{DrawdownTable, MaxDrawdown, drawdown, drawdown_with_base},
        normality::{JarqueBera, is_normal, jarque_bera},
        semideviation::semideviation,
        var::{cvar_historic, var_gaussian, var_historic},
    },
    moments::{kurtosis, skewness},
};

/// 带时间戳的值。
///
/// 用于将任意值与 UTC 时间戳关联，例如某一周期的收益率及其所属时间。
///
/// # 使用示例
///
/// ```rust
/// use chrono::Utc;
/// use quantrisk::{ReturnSeries, Timed};
///
/// let now = Utc::now();
/// let series = ReturnSeries::from_timed(vec![Timed::new(0.01, now)]).unwrap();
/// assert_eq!(series.len(), 1);
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Deserialize,
    Serialize,
    Constructor,
)]
pub struct Timed<T> {
    /// 存储的值
    pub value: T,
    /// UTC 时间戳
    pub time: DateTime<Utc>,
}

/// QuantRisk 测试工具。
///
/// 提供用于测试的辅助函数，包括浮点数比较和时间操作。
pub mod test_utils {
    use chrono::{DateTime, Days, Utc};

    /// 比较两个 f64 浮点数是否相等（考虑 NaN 和无穷大）。
    ///
    /// # 特殊情况处理
    ///
    /// - 两个 NaN 值被视为相等
    /// - 两个同符号的无穷大值被视为相等
    /// - 其他包含 NaN 或无穷大的情况返回 `false`
    pub fn f64_is_eq(actual: f64, expected: f64, epsilon: f64) -> bool {
        if actual.is_nan() && expected.is_nan() {
            true
        } else if actual.is_infinite() && expected.is_infinite() {
            actual.is_sign_positive() == expected.is_sign_positive()
        } else if actual.is_nan()
            || expected.is_nan()
            || actual.is_infinite()
            || expected.is_infinite()
        {
            false
        } else {
            (actual - expected).abs() < epsilon
        }
    }

    /// 在基础时间上增加指定的天数。
    ///
    /// # Panics
    ///
    /// 如果时间溢出，此函数会 panic。
    pub fn time_plus_days(base: DateTime<Utc>, plus: u64) -> DateTime<Utc> {
        base.checked_add_days(Days::new(plus)).unwrap()
    }

    /// 生成从 `base` 开始、间隔一天的 `len` 个时间戳。
    pub fn daily_index(base: DateTime<Utc>, len: usize) -> Vec<DateTime<Utc>> {
        (0..len as u64)
            .map(|day| time_plus_days(base, day))
            .collect()
    }
}
