use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One of the fixed data categories gathered for a ticker.
///
/// `ALL` defines the canonical gathering and assembly order; every request
/// produces exactly one section per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Profile,
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    MajorHolders,
    InstitutionalHolders,
    FundHolders,
    InsiderPurchases,
    Recommendations,
    UpgradesDowngrades,
    PriceHistory,
}

impl SectionKind {
    pub const ALL: [SectionKind; 11] = [
        SectionKind::Profile,
        SectionKind::IncomeStatement,
        SectionKind::BalanceSheet,
        SectionKind::CashFlow,
        SectionKind::MajorHolders,
        SectionKind::InstitutionalHolders,
        SectionKind::FundHolders,
        SectionKind::InsiderPurchases,
        SectionKind::Recommendations,
        SectionKind::UpgradesDowngrades,
        SectionKind::PriceHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Profile => "profile",
            SectionKind::IncomeStatement => "income_statement",
            SectionKind::BalanceSheet => "balance_sheet",
            SectionKind::CashFlow => "cash_flow",
            SectionKind::MajorHolders => "major_holders",
            SectionKind::InstitutionalHolders => "institutional_holders",
            SectionKind::FundHolders => "fund_holders",
            SectionKind::InsiderPurchases => "insider_purchases",
            SectionKind::Recommendations => "recommendations",
            SectionKind::UpgradesDowngrades => "upgrades_downgrades",
            SectionKind::PriceHistory => "price_history",
        }
    }

    /// Connective phrase that introduces this section inside the context blob.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Profile => "Here are the details of the company:",
            SectionKind::IncomeStatement => {
                "Here is the data related to the income statement:"
            }
            SectionKind::BalanceSheet => "Here is the data related to the balance sheet:",
            SectionKind::CashFlow => "Here is the data related to the cash flow:",
            SectionKind::MajorHolders => "Here are the major holders of the company:",
            SectionKind::InstitutionalHolders => {
                "Here are the institutional holders of the company:"
            }
            SectionKind::FundHolders => "Here are the mutual fund holders of the company:",
            SectionKind::InsiderPurchases => "Here are the insider purchases of the company:",
            SectionKind::Recommendations => "Here are the recommendations for the company:",
            SectionKind::UpgradesDowngrades => {
                "Here are the upgrades and downgrades for the company:"
            }
            SectionKind::PriceHistory => "Here is the price history of the company:",
        }
    }
}

/// Row/column-oriented table that keeps index values and column labels
/// recoverable after serialization ("split" layout: index array, column
/// array, value matrix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

impl TableData {
    pub fn new(index: Vec<String>, columns: Vec<String>, data: Vec<Vec<Value>>) -> Self {
        Self {
            index,
            columns,
            data,
        }
    }
}

/// Normalized payload of one fetched section.
///
/// Scalar/dict sections become a `Mapping`; tabular sections become a
/// `Table`. The `BTreeMap` keeps mapping serialization deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionPayload {
    Table(TableData),
    Mapping(BTreeMap<String, Value>),
}

/// One named data category for one ticker, for one request.
///
/// Either fully fetched (`payload` present) or unavailable — never
/// partially populated.
#[derive(Debug, Clone)]
pub struct DataSection {
    pub kind: SectionKind,
    pub payload: Option<SectionPayload>,
}

impl DataSection {
    pub fn ready(kind: SectionKind, payload: SectionPayload) -> Self {
        Self {
            kind,
            payload: Some(payload),
        }
    }

    pub fn unavailable(kind: SectionKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn available(&self) -> bool {
        self.payload.is_some()
    }
}

/// Canonical text form of one section. `text` is empty when the section
/// was unavailable; it is never absent.
#[derive(Debug, Clone, Serialize)]
pub struct SerializedSection {
    pub kind: SectionKind,
    pub text: String,
}
