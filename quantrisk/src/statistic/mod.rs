//! Statistic 统计模块
//!
//! 本模块提供了用于分析收益率数据集的统计算法、风险指标和统计摘要。
//!
//! # 核心概念
//!
//! - **algorithm**: 用于分析数据集的统计算法（Welford 在线算法、百分位数）
//! - **moments**: 所有指标共享的矩约定（总体标准差、偏度、原始峰度）
//! - **metric**: 风险指标（回撤、半偏差、正态性、VaR）
//! - **summary**: 单个收益率序列的风险摘要

/// 用于分析数据集的统计算法。
pub mod algorithm;

/// 风险指标的计算逻辑。
pub mod metric;

/// 前四阶矩统计。
pub mod moments;

/// 收益率序列的风险摘要。
///
/// 例如，`RiskSummary`。
pub mod summary;
