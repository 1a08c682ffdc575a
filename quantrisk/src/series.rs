//! Series 收益率序列模块
//!
//! 本模块定义了所有统计函数共享的数据形态：
//!
//! - **ReturnSeries**: 按时间顺序排列的周期性收益率序列（0.01 表示 +1%）
//! - **ReturnTable**: 共享同一时间索引的多列收益率序列，列名唯一且保持插入顺序
//! - **ReturnData**: 运行时的"序列或表格"输入，从 JSON 解码
//! - **Returns**: 逐列聚合 Trait，单序列实现只需编写一次，表格自动逐列应用
//!
//! # 缺失值策略
//!
//! 构造时拒绝 NaN 与无穷大（[`RiskError::NonFinite`]），因此所有统计函数都可以假定
//! 输入是有限的。

use crate::{Timed, error::RiskError};
use chrono::{DateTime, Utc};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// 使用 Fnv 哈希的 [`IndexMap`]，保持列的插入顺序。
pub type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// 能够将单序列统计函数逐列应用到自身的收益率数据。
///
/// - [`ReturnSeries`] 的输出就是函数结果本身。
/// - [`ReturnTable`] 的输出是以列名为键、保持列顺序的结果映射。
/// - [`ReturnData`] 的输出是运行时的 [`Aggregated`]。
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnTable, Returns};
///
/// let table = ReturnTable::from_columns([
///     ("A", vec![0.01, -0.02]),
///     ("B", vec![0.03, 0.01]),
/// ]).unwrap();
///
/// let sums = table.aggregate(|values| values.iter().sum::<f64>());
/// assert_eq!(sums.keys().map(|name| name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
/// ```
pub trait Returns {
    /// 聚合结果的形态。
    type Output<T>;

    /// 将 `f` 应用于每个值序列。
    fn aggregate<T, F>(&self, f: F) -> Self::Output<T>
    where
        F: FnMut(&[f64]) -> T;

    /// 将可失败的 `f` 应用于每个值序列，遇到第一个错误即返回。
    fn try_aggregate<T, E, F>(&self, f: F) -> Result<Self::Output<T>, E>
    where
        F: FnMut(&[f64]) -> Result<T, E>;
}

/// 按时间顺序排列的收益率序列。
///
/// ## 不变量
///
/// - `index` 与 `values` 长度相同
/// - `index` 严格递增（插入顺序即时间顺序）
/// - 所有 `values` 都是有限值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SeriesParts<Index>",
    bound(deserialize = "Index: Deserialize<'de> + PartialOrd")
)]
pub struct ReturnSeries<Index = DateTime<Utc>> {
    index: Vec<Index>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct SeriesParts<Index> {
    index: Vec<Index>,
    values: Vec<f64>,
}

impl<Index> TryFrom<SeriesParts<Index>> for ReturnSeries<Index>
where
    Index: PartialOrd,
{
    type Error = RiskError;

    fn try_from(parts: SeriesParts<Index>) -> Result<Self, Self::Error> {
        Self::new(parts.index, parts.values)
    }
}

impl<Index> ReturnSeries<Index> {
    /// 从时间索引和收益率值构造 [`ReturnSeries`]，并校验所有不变量。
    pub fn new(index: Vec<Index>, values: Vec<f64>) -> Result<Self, RiskError>
    where
        Index: PartialOrd,
    {
        validate_index(&index)?;
        validate_values(index.len(), &values)?;
        Ok(Self { index, values })
    }

    /// 时间索引。
    pub fn index(&self) -> &[Index] {
        &self.index
    }

    /// 收益率值。
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 观测值数量。
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有任何观测值。
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按时间顺序迭代 `(索引, 收益率)`。
    pub fn iter(&self) -> impl Iterator<Item = (&Index, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }
}

impl ReturnSeries<usize> {
    /// 从不带时间索引的收益率构造 [`ReturnSeries`]，使用位置 `0..N` 作为索引。
    pub fn from_values(values: Vec<f64>) -> Result<Self, RiskError> {
        Self::new((0..values.len()).collect(), values)
    }
}

impl ReturnSeries<DateTime<Utc>> {
    /// 从一组 [`Timed`] 收益率构造 [`ReturnSeries`]。
    pub fn from_timed<Iter>(points: Iter) -> Result<Self, RiskError>
    where
        Iter: IntoIterator<Item = Timed<f64>>,
    {
        let (index, values) = points
            .into_iter()
            .map(|point| (point.time, point.value))
            .unzip();

        Self::new(index, values)
    }
}

impl<Index> Returns for ReturnSeries<Index> {
    type Output<T> = T;

    fn aggregate<T, F>(&self, mut f: F) -> Self::Output<T>
    where
        F: FnMut(&[f64]) -> T,
    {
        f(&self.values)
    }

    fn try_aggregate<T, E, F>(&self, mut f: F) -> Result<Self::Output<T>, E>
    where
        F: FnMut(&[f64]) -> Result<T, E>,
    {
        f(&self.values)
    }
}

/// 共享同一时间索引的多列收益率。
///
/// 列名唯一，列的顺序即插入顺序。逐列计算的结果保留相同的列名与顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "TableParts<Index>",
    bound(deserialize = "Index: Deserialize<'de> + PartialOrd")
)]
pub struct ReturnTable<Index = DateTime<Utc>> {
    index: Vec<Index>,
    columns: FnvIndexMap<SmolStr, Vec<f64>>,
}

#[derive(Deserialize)]
struct TableParts<Index> {
    index: Vec<Index>,
    columns: FnvIndexMap<SmolStr, Vec<f64>>,
}

impl<Index> TryFrom<TableParts<Index>> for ReturnTable<Index>
where
    Index: PartialOrd,
{
    type Error = RiskError;

    fn try_from(parts: TableParts<Index>) -> Result<Self, Self::Error> {
        Self::new(parts.index, parts.columns)
    }
}

impl<Index> ReturnTable<Index> {
    /// 从共享的时间索引和若干 `(列名, 收益率)` 构造 [`ReturnTable`]。
    ///
    /// 每一列都必须满足 [`ReturnSeries`] 的不变量，且列名不能重复。
    pub fn new<Iter, Name>(index: Vec<Index>, columns: Iter) -> Result<Self, RiskError>
    where
        Index: PartialOrd,
        Iter: IntoIterator<Item = (Name, Vec<f64>)>,
        Name: Into<SmolStr>,
    {
        validate_index(&index)?;

        let mut table = FnvIndexMap::default();
        for (name, values) in columns {
            let name = name.into();
            validate_values(index.len(), &values)?;
            if table.contains_key(&name) {
                return Err(RiskError::DuplicateColumn(name.to_string()));
            }
            table.insert(name, values);
        }

        Ok(Self {
            index,
            columns: table,
        })
    }

    /// 共享的时间索引。
    pub fn index(&self) -> &[Index] {
        &self.index
    }

    /// 按插入顺序迭代列名。
    pub fn column_names(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.columns.keys()
    }

    /// 指定列的收益率值。
    pub fn column_values(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// 以独立 [`ReturnSeries`] 的形式取出指定列（复制共享索引）。
    pub fn column(&self, name: &str) -> Option<ReturnSeries<Index>>
    where
        Index: Clone,
    {
        self.columns.get(name).map(|values| ReturnSeries {
            index: self.index.clone(),
            values: values.clone(),
        })
    }

    /// 按插入顺序迭代 `(列名, 独立的 ReturnSeries)`。
    pub fn columns(&self) -> impl Iterator<Item = (&SmolStr, ReturnSeries<Index>)> + '_
    where
        Index: Clone,
    {
        self.columns.iter().map(|(name, values)| {
            (
                name,
                ReturnSeries {
                    index: self.index.clone(),
                    values: values.clone(),
                },
            )
        })
    }

    /// 列数。
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 行数（即索引长度）。
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// 是否没有任何行。
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl ReturnTable<usize> {
    /// 从不带时间索引的列构造 [`ReturnTable`]，使用位置 `0..N` 作为索引，
    /// `N` 为第一列的长度。
    pub fn from_columns<Iter, Name>(columns: Iter) -> Result<Self, RiskError>
    where
        Iter: IntoIterator<Item = (Name, Vec<f64>)>,
        Name: Into<SmolStr>,
    {
        let columns = columns.into_iter().collect::<Vec<_>>();
        let len = columns.first().map_or(0, |(_, values)| values.len());
        Self::new((0..len).collect(), columns)
    }
}

impl<Index> Returns for ReturnTable<Index> {
    type Output<T> = FnvIndexMap<SmolStr, T>;

    fn aggregate<T, F>(&self, mut f: F) -> Self::Output<T>
    where
        F: FnMut(&[f64]) -> T,
    {
        self.columns
            .iter()
            .map(|(name, values)| (name.clone(), f(values)))
            .collect()
    }

    fn try_aggregate<T, E, F>(&self, mut f: F) -> Result<Self::Output<T>, E>
    where
        F: FnMut(&[f64]) -> Result<T, E>,
    {
        self.columns
            .iter()
            .map(|(name, values)| f(values).map(|output| (name.clone(), output)))
            .collect()
    }
}

/// 运行时的收益率输入：单一序列或多列表格。
///
/// 用于外部协作方以 JSON 形式提供数据的场景：
///
/// - 数字数组解码为 [`ReturnData::Series`]
/// - 值为数字数组的对象解码为 [`ReturnData::Table`]，列顺序与 JSON 中的键顺序一致
/// - 其他任何形态返回 [`RiskError::InvalidInput`]
///
/// # 使用示例
///
/// ```rust
/// use quantrisk::{ReturnData, RiskError};
///
/// let series = ReturnData::from_json_str("[0.01, -0.02, 0.03]").unwrap();
/// assert!(matches!(series, ReturnData::Series(_)));
///
/// let table = ReturnData::from_json_str(r#"{"A": [0.01, -0.02], "B": [0.0, 0.01]}"#).unwrap();
/// assert!(matches!(table, ReturnData::Table(_)));
///
/// let invalid = ReturnData::from_json_str(r#""not returns""#);
/// assert!(matches!(invalid, Err(RiskError::InvalidInput(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReturnData {
    Series(ReturnSeries<usize>),
    Table(ReturnTable<usize>),
}

impl ReturnData {
    /// 从 JSON 文本解码 [`ReturnData`]。
    pub fn from_json_str(input: &str) -> Result<Self, RiskError> {
        let value = serde_json::from_str::<serde_json::Value>(input)?;
        Self::try_from(value)
    }
}

impl TryFrom<serde_json::Value> for ReturnData {
    type Error = RiskError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(items) => {
                ReturnSeries::from_values(json_numbers(&items)?).map(Self::Series)
            }
            serde_json::Value::Object(map) => {
                let columns = map
                    .iter()
                    .map(|(name, column)| match column {
                        serde_json::Value::Array(items) => {
                            json_numbers(items).map(|values| (name.as_str(), values))
                        }
                        other => Err(RiskError::InvalidInput(format!(
                            "column {name} holding {}",
                            json_kind(other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                ReturnTable::from_columns(columns).map(Self::Table)
            }
            other => Err(RiskError::InvalidInput(json_kind(&other).to_string())),
        }
    }
}

impl Returns for ReturnData {
    type Output<T> = Aggregated<T>;

    fn aggregate<T, F>(&self, f: F) -> Self::Output<T>
    where
        F: FnMut(&[f64]) -> T,
    {
        match self {
            Self::Series(series) => Aggregated::Scalar(series.aggregate(f)),
            Self::Table(table) => Aggregated::Columns(table.aggregate(f)),
        }
    }

    fn try_aggregate<T, E, F>(&self, f: F) -> Result<Self::Output<T>, E>
    where
        F: FnMut(&[f64]) -> Result<T, E>,
    {
        match self {
            Self::Series(series) => series.try_aggregate(f).map(Aggregated::Scalar),
            Self::Table(table) => table.try_aggregate(f).map(Aggregated::Columns),
        }
    }
}

/// [`ReturnData`] 的聚合结果：单个值或逐列结果。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Aggregated<T> {
    Scalar(T),
    Columns(FnvIndexMap<SmolStr, T>),
}

impl<T> Aggregated<T> {
    /// 如果是单个值，返回 `Some(T)`。
    pub fn scalar(self) -> Option<T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Columns(_) => None,
        }
    }

    /// 如果是逐列结果，返回 `Some(columns)`。
    pub fn columns(self) -> Option<FnvIndexMap<SmolStr, T>> {
        match self {
            Self::Scalar(_) => None,
            Self::Columns(columns) => Some(columns),
        }
    }
}

fn validate_index<Index>(index: &[Index]) -> Result<(), RiskError>
where
    Index: PartialOrd,
{
    match index.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(position) => Err(RiskError::IndexNotIncreasing {
            position: position + 1,
        }),
        None => Ok(()),
    }
}

fn validate_values(expected: usize, values: &[f64]) -> Result<(), RiskError> {
    if values.len() != expected {
        return Err(RiskError::LengthMismatch {
            expected,
            actual: values.len(),
        });
    }

    match values.iter().position(|value| !value.is_finite()) {
        Some(position) => Err(RiskError::NonFinite { position }),
        None => Ok(()),
    }
}

fn json_numbers(items: &[serde_json::Value]) -> Result<Vec<f64>, RiskError> {
    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| {
                RiskError::InvalidInput(format!("array containing {}", json_kind(item)))
            })
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
