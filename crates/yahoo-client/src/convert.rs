//! Conversion of raw Yahoo module JSON into the normalized section payloads.
//!
//! All functions are pure so they can be tested against fixture JSON.
//! Numeric fields arrive either as plain scalars or as `{raw, fmt}`
//! wrappers; wrappers are unwrapped to their raw value, except date fields
//! where the formatted string is the useful representation.

use insight_core::{InsightError, SectionKind, SectionPayload, TableData};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// quoteSummary module id per section. Price history is served by the
/// chart API instead and never goes through this table.
pub(crate) fn module_name(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Profile => "assetProfile",
        SectionKind::IncomeStatement => "incomeStatementHistory",
        SectionKind::BalanceSheet => "balanceSheetHistory",
        SectionKind::CashFlow => "cashflowStatementHistory",
        SectionKind::MajorHolders => "majorHoldersBreakdown",
        SectionKind::InstitutionalHolders => "institutionOwnership",
        SectionKind::FundHolders => "fundOwnership",
        SectionKind::InsiderPurchases => "netSharePurchaseActivity",
        SectionKind::Recommendations => "recommendationTrend",
        SectionKind::UpgradesDowngrades => "upgradeDowngradeHistory",
        SectionKind::PriceHistory => "chart",
    }
}

/// Normalize one quoteSummary module into its section payload.
pub(crate) fn convert_module(
    kind: SectionKind,
    value: &Value,
) -> Result<SectionPayload, InsightError> {
    match kind {
        SectionKind::Profile | SectionKind::MajorHolders | SectionKind::InsiderPurchases => {
            scalar_mapping(value)
        }
        SectionKind::IncomeStatement => records_table(value, "incomeStatementHistory", "endDate"),
        SectionKind::BalanceSheet => records_table(value, "balanceSheetStatements", "endDate"),
        SectionKind::CashFlow => records_table(value, "cashflowStatements", "endDate"),
        SectionKind::InstitutionalHolders | SectionKind::FundHolders => {
            records_table(value, "ownershipList", "organization")
        }
        SectionKind::Recommendations => records_table(value, "trend", "period"),
        SectionKind::UpgradesDowngrades => records_table(value, "history", "epochGradeDate"),
        SectionKind::PriceHistory => Err(InsightError::InvalidData(
            "price history is not a quoteSummary module".to_string(),
        )),
    }
}

/// Flatten a dict-shaped module into a key → scalar mapping.
///
/// Nested arrays/objects (e.g. `companyOfficers`) are dropped; `maxAge`
/// is provider bookkeeping, not data.
fn scalar_mapping(value: &Value) -> Result<SectionPayload, InsightError> {
    let object = value
        .as_object()
        .ok_or_else(|| InsightError::InvalidData("expected a key/value object".to_string()))?;

    let mut mapping = BTreeMap::new();
    for (key, entry) in object {
        if key == "maxAge" {
            continue;
        }
        match cell_value(key, entry) {
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
            scalar => {
                mapping.insert(key.clone(), scalar);
            }
        }
    }

    if mapping.is_empty() {
        return Err(InsightError::MissingData(
            "module contains no scalar fields".to_string(),
        ));
    }

    Ok(SectionPayload::Mapping(mapping))
}

/// Build a split-style table from a module's record list.
///
/// `index_key` names the field used as the row index; the remaining
/// fields become columns, sorted so the layout is deterministic.
fn records_table(
    value: &Value,
    list_key: &str,
    index_key: &str,
) -> Result<SectionPayload, InsightError> {
    let records = value
        .get(list_key)
        .and_then(Value::as_array)
        .ok_or_else(|| InsightError::MissingData(format!("module has no {} list", list_key)))?;

    if records.is_empty() {
        return Err(InsightError::MissingData(format!("{} list is empty", list_key)));
    }

    let mut column_set = BTreeSet::new();
    for record in records {
        if let Some(object) = record.as_object() {
            for key in object.keys() {
                if key != index_key && key != "maxAge" {
                    column_set.insert(key.clone());
                }
            }
        }
    }
    let columns: Vec<String> = column_set.into_iter().collect();

    let mut index = Vec::with_capacity(records.len());
    let mut data = Vec::with_capacity(records.len());
    for record in records {
        index.push(index_label(record.get(index_key)));
        let row = columns
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .map(|entry| cell_value(column, entry))
                    .unwrap_or(Value::Null)
            })
            .collect();
        data.push(row);
    }

    Ok(SectionPayload::Table(TableData::new(index, columns, data)))
}

/// Row-index label for a record. Formatted dates win over epoch values.
fn index_label(entry: Option<&Value>) -> String {
    match entry {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(epoch_to_date)
            .unwrap_or_else(|| n.to_string()),
        Some(Value::Object(object)) => {
            if let Some(fmt) = object.get("fmt").and_then(Value::as_str) {
                fmt.to_string()
            } else if let Some(raw) = object.get("raw").and_then(Value::as_i64) {
                epoch_to_date(raw)
            } else {
                String::new()
            }
        }
        _ => String::new(),
    }
}

/// Unwrap one cell. `{raw, fmt}` wrappers yield the raw value, except
/// date-like fields where the formatted string is kept.
fn cell_value(key: &str, entry: &Value) -> Value {
    match entry {
        Value::Object(object) => {
            let prefers_fmt = key.ends_with("Date") || key == "period";
            if prefers_fmt {
                if let Some(fmt) = object.get("fmt") {
                    return fmt.clone();
                }
            }
            if let Some(raw) = object.get("raw") {
                return raw.clone();
            }
            if let Some(fmt) = object.get("fmt") {
                return fmt.clone();
            }
            Value::Null
        }
        other => other.clone(),
    }
}

/// Build the 1-year close-price table from a chart API result.
///
/// The epoch-second index becomes plain `YYYY-MM-DD` strings; only the
/// closing-price series is retained. Null closes (market holidays in the
/// middle of a series) keep their row so index and data stay aligned.
pub(crate) fn close_history_table(result: &Value) -> Result<SectionPayload, InsightError> {
    let timestamps = result
        .get("timestamp")
        .and_then(Value::as_array)
        .ok_or_else(|| InsightError::MissingData("chart result has no timestamps".to_string()))?;

    let closes = result
        .pointer("/indicators/quote/0/close")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            InsightError::MissingData("chart result has no close series".to_string())
        })?;

    let mut index = Vec::with_capacity(timestamps.len());
    let mut data = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.iter().zip(closes.iter()) {
        let secs = ts
            .as_i64()
            .ok_or_else(|| InsightError::InvalidData("non-numeric timestamp".to_string()))?;
        index.push(epoch_to_date(secs));
        data.push(vec![close.clone()]);
    }

    Ok(SectionPayload::Table(TableData::new(
        index,
        vec!["Close".to_string()],
        data,
    )))
}

fn epoch_to_date(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_quote_summary_kind_has_a_module() {
        for kind in SectionKind::ALL {
            if kind != SectionKind::PriceHistory {
                assert!(!module_name(kind).is_empty());
            }
        }
    }

    #[test]
    fn profile_flattens_to_scalar_mapping() {
        let module = json!({
            "sector": "Technology",
            "fullTimeEmployees": 164000,
            "auditRisk": 4,
            "companyOfficers": [{"name": "Somebody", "age": 55}],
            "maxAge": 86400
        });

        let payload = convert_module(SectionKind::Profile, &module).unwrap();
        match payload {
            SectionPayload::Mapping(mapping) => {
                assert_eq!(mapping["sector"], json!("Technology"));
                assert_eq!(mapping["fullTimeEmployees"], json!(164000));
                assert!(!mapping.contains_key("companyOfficers"));
                assert!(!mapping.contains_key("maxAge"));
            }
            SectionPayload::Table(_) => panic!("profile must be a mapping"),
        }
    }

    #[test]
    fn major_holders_unwraps_raw_values() {
        let module = json!({
            "insidersPercentHeld": {"raw": 0.00072, "fmt": "0.07%"},
            "institutionsPercentHeld": {"raw": 0.61683, "fmt": "61.68%"},
            "institutionsCount": {"raw": 6842, "fmt": "6.84k", "longFmt": "6,842"},
            "maxAge": 1
        });

        let payload = convert_module(SectionKind::MajorHolders, &module).unwrap();
        match payload {
            SectionPayload::Mapping(mapping) => {
                assert_eq!(mapping["insidersPercentHeld"], json!(0.00072));
                assert_eq!(mapping["institutionsCount"], json!(6842));
            }
            SectionPayload::Table(_) => panic!("major holders must be a mapping"),
        }
    }

    #[test]
    fn income_statement_becomes_split_table() {
        let module = json!({
            "incomeStatementHistory": [
                {
                    "endDate": {"raw": 1695945600, "fmt": "2023-09-30"},
                    "totalRevenue": {"raw": 383285000000i64, "fmt": "383.29B"},
                    "netIncome": {"raw": 96995000000i64, "fmt": "97B"},
                    "maxAge": 1
                },
                {
                    "endDate": {"raw": 1664150400, "fmt": "2022-09-24"},
                    "totalRevenue": {"raw": 394328000000i64, "fmt": "394.33B"},
                    "maxAge": 1
                }
            ],
            "maxAge": 86400
        });

        let payload = convert_module(SectionKind::IncomeStatement, &module).unwrap();
        match payload {
            SectionPayload::Table(table) => {
                assert_eq!(table.index, vec!["2023-09-30", "2022-09-24"]);
                assert_eq!(table.columns, vec!["netIncome", "totalRevenue"]);
                assert_eq!(table.data[0], vec![json!(96995000000i64), json!(383285000000i64)]);
                // second row has no netIncome — hole stays aligned
                assert_eq!(table.data[1], vec![json!(null), json!(394328000000i64)]);
            }
            SectionPayload::Mapping(_) => panic!("income statement must be a table"),
        }
    }

    #[test]
    fn ownership_table_keeps_formatted_report_dates() {
        let module = json!({
            "ownershipList": [
                {
                    "organization": "Vanguard Group Inc",
                    "reportDate": {"raw": 1719705600, "fmt": "2024-06-30"},
                    "pctHeld": {"raw": 0.0885, "fmt": "8.85%"},
                    "position": {"raw": 1356536826i64, "fmt": "1.36B"},
                    "maxAge": 1
                }
            ],
            "maxAge": 86400
        });

        let payload = convert_module(SectionKind::InstitutionalHolders, &module).unwrap();
        match payload {
            SectionPayload::Table(table) => {
                assert_eq!(table.index, vec!["Vanguard Group Inc"]);
                assert_eq!(table.columns, vec!["pctHeld", "position", "reportDate"]);
                let report_date = &table.data[0][2];
                assert_eq!(report_date, &json!("2024-06-30"));
            }
            SectionPayload::Mapping(_) => panic!("ownership must be a table"),
        }
    }

    #[test]
    fn grade_history_index_is_a_date_string() {
        let module = json!({
            "history": [
                {
                    "epochGradeDate": 1717027200,
                    "firm": "Example Securities",
                    "toGrade": "Buy",
                    "fromGrade": "Hold",
                    "action": "up"
                }
            ],
            "maxAge": 86400
        });

        let payload = convert_module(SectionKind::UpgradesDowngrades, &module).unwrap();
        match payload {
            SectionPayload::Table(table) => {
                assert_eq!(table.index, vec!["2024-05-30"]);
                assert_eq!(
                    table.columns,
                    vec!["action", "firm", "fromGrade", "toGrade"]
                );
            }
            SectionPayload::Mapping(_) => panic!("grade history must be a table"),
        }
    }

    #[test]
    fn recommendation_trend_indexed_by_period() {
        let module = json!({
            "trend": [
                {"period": "0m", "strongBuy": 11, "buy": 21, "hold": 6, "sell": 0, "strongSell": 0},
                {"period": "-1m", "strongBuy": 10, "buy": 24, "hold": 7, "sell": 1, "strongSell": 0}
            ],
            "maxAge": 86400
        });

        let payload = convert_module(SectionKind::Recommendations, &module).unwrap();
        match payload {
            SectionPayload::Table(table) => {
                assert_eq!(table.index, vec!["0m", "-1m"]);
                assert_eq!(
                    table.columns,
                    vec!["buy", "hold", "sell", "strongBuy", "strongSell"]
                );
                assert_eq!(table.data[0], vec![json!(21), json!(6), json!(0), json!(11), json!(0)]);
            }
            SectionPayload::Mapping(_) => panic!("recommendations must be a table"),
        }
    }

    #[test]
    fn close_history_keeps_only_close_column_with_date_index() {
        let result = json!({
            "timestamp": [1704153600, 1704240000, 1704326400],
            "indicators": {
                "quote": [
                    {
                        "open": [186.0, 184.2, 182.1],
                        "close": [185.64, 184.25, null],
                        "volume": [82488700, 58414500, 71983600]
                    }
                ]
            }
        });

        let payload = close_history_table(&result).unwrap();
        match payload {
            SectionPayload::Table(table) => {
                assert_eq!(table.columns, vec!["Close"]);
                assert_eq!(table.index, vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
                assert_eq!(table.data[0], vec![json!(185.64)]);
                assert_eq!(table.data[2], vec![json!(null)]);
            }
            SectionPayload::Mapping(_) => panic!("price history must be a table"),
        }
    }

    #[test]
    fn empty_record_list_is_missing_data() {
        let module = json!({"trend": [], "maxAge": 86400});
        let err = convert_module(SectionKind::Recommendations, &module).unwrap_err();
        assert!(matches!(err, InsightError::MissingData(_)));
    }

    #[test]
    fn non_object_module_is_invalid_data() {
        let module = json!("not an object");
        let err = convert_module(SectionKind::Profile, &module).unwrap_err();
        assert!(matches!(err, InsightError::InvalidData(_)));
    }
}
