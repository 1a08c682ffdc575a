use quantrisk::{
    ReturnData, RiskConfig, logging::init_logging, statistic::summary::RiskSummary, var_gaussian,
    var_historic,
};
use std::fs;
use tracing::info;

/// 风险配置文件路径。
const FILE_PATH_RISK_CONFIG: &str = "quantrisk/examples/data/risk_config.json";

/// 收益率数据文件路径（值为收益率数组的 JSON 对象）。
const FILE_PATH_RETURNS: &str = "quantrisk/examples/data/returns.json";

/// 示例：从 JSON 加载收益率表格，逐列计算 VaR，并为每一列生成 RiskSummary。
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化 Tracing 日志
    init_logging();

    let config = RiskConfig::from_json_str(&fs::read_to_string(FILE_PATH_RISK_CONFIG)?)?;
    let data = ReturnData::from_json_str(&fs::read_to_string(FILE_PATH_RETURNS)?)?;

    let historic = var_historic(&data, config.var_level)?;
    let modified = var_gaussian(&data, config.var_level, true)?;
    info!(?historic, ?modified, "VaR per column");

    let ReturnData::Table(table) = data else {
        return Err("expected a table of returns".into());
    };

    for (name, series) in table.columns() {
        let summary = RiskSummary::generate(&series, &config)?;
        println!("{name}: {}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
