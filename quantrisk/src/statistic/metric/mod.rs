//! Metric 风险指标模块
//!
//! 本模块提供了各种风险指标的计算逻辑。
//! 除回撤外，所有指标都通过 [`Returns`](crate::Returns) 同时支持单一序列和多列表格。
//!
//! # 核心指标
//!
//! - **Drawdown**: 财富路径、历史峰值与回撤
//! - **Semideviation**: 半偏差，只考虑负收益率的波动率
//! - **Normality**: Jarque-Bera 正态性检验
//! - **VaR**: 历史 VaR、历史 CVaR 与参数化（Gaussian / Cornish-Fisher）VaR

/// Drawdown 回撤计算逻辑。
pub mod drawdown;

/// Jarque-Bera 正态性检验。
pub mod normality;

/// Semideviation 半偏差计算逻辑。
pub mod semideviation;

/// Value at Risk 风险价值计算逻辑。
pub mod var;
