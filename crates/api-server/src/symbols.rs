//! Static display-symbol → provider-ticker directory.
//!
//! Loaded once at process start from a CSV reference file and read-only
//! for the process lifetime.

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub ticker: String,
}

#[derive(Debug, Default)]
pub struct SymbolDirectory {
    entries: Vec<SymbolEntry>,
}

impl SymbolDirectory {
    /// Load the directory from a CSV file whose first two columns are the
    /// display symbol and the provider ticker.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&raw))
    }

    /// Parse CSV symbol data.
    ///
    /// Headers and fields are whitespace-trimmed (the reference file ships
    /// with a literal `"SYMBOL \n"` header). Malformed or blank rows are
    /// skipped, not fatal.
    pub fn parse(csv_data: &str) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping malformed symbol row: {}", e);
                    continue;
                }
            };

            let symbol = record.get(0).unwrap_or("").trim().to_string();
            let ticker = record.get(1).unwrap_or("").trim().to_string();
            if symbol.is_empty() || ticker.is_empty() {
                continue;
            }

            entries.push(SymbolEntry { symbol, ticker });
        }

        Self { entries }
    }

    /// Resolve a display symbol to its provider ticker.
    pub fn resolve(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
            .map(|entry| entry.ticker.as_str())
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_header_and_field_whitespace() {
        let csv = "SYMBOL \n,Ticker_NS\n\
                   Reliance Industries,RELIANCE.NS\n\
                   Apple Inc , AAPL \n";

        let directory = SymbolDirectory::parse(csv);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.resolve("Apple Inc"), Some("AAPL"));
        assert_eq!(directory.resolve("Reliance Industries"), Some("RELIANCE.NS"));
    }

    #[test]
    fn parse_skips_blank_and_partial_rows() {
        let csv = "SYMBOL,Ticker_NS\n\
                   ,AAPL\n\
                   Tata Motors,\n\
                   Infosys,INFY.NS\n";

        let directory = SymbolDirectory::parse(csv);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.resolve("Infosys"), Some("INFY.NS"));
    }

    #[test]
    fn resolve_is_case_insensitive_and_misses_cleanly() {
        let csv = "SYMBOL,Ticker_NS\nInfosys,INFY.NS\n";
        let directory = SymbolDirectory::parse(csv);
        assert_eq!(directory.resolve("INFOSYS"), Some("INFY.NS"));
        assert_eq!(directory.resolve("Unknown Co"), None);
    }

    #[test]
    fn parse_empty_input_yields_empty_directory() {
        let directory = SymbolDirectory::parse("SYMBOL,Ticker_NS\n");
        assert!(directory.is_empty());
    }
}
