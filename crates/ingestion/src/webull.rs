//! Webull trade record export.
//!
//! The export starts with a fixed header row. Columns are looked up by name,
//! so the parser tolerates reordering, but acceptance still requires the exact
//! header text the broker writes today.

use crate::datetime::{parse_wall_clock, parse_with_offset, split_gmt_suffix, TimeConvention};
use crate::importer::Importer;
use crate::tokenizer::{non_blank_lines, split_fields, split_header, strip_quotes};
use std::collections::HashMap;
use tradeconv_core::{parse_decimal, Error, ReferenceZone, Result, Side, TradeRecord};

/// Exact header row of a Webull export.
pub const WEBULL_HEADER: &str = "Symbol,Name,Currency,Type,Trade Date,Time,Buy/Sell,Quantity,Trade Price,Gross Amount,Net Amount,Comm/Fee/Tax,GST,Exchange";

mod column {
    pub const SYMBOL: &str = "Symbol";
    pub const NAME: &str = "Name";
    pub const CURRENCY: &str = "Currency";
    pub const TYPE: &str = "Type";
    pub const TRADE_DATE: &str = "Trade Date";
    pub const TIME: &str = "Time";
    pub const BUY_SELL: &str = "Buy/Sell";
    pub const QUANTITY: &str = "Quantity";
    pub const TRADE_PRICE: &str = "Trade Price";
    pub const COMM_FEE_TAX: &str = "Comm/Fee/Tax";
    pub const EXCHANGE: &str = "Exchange";
}

const DATE_FORMAT: &str = "%Y/%m/%d";

/// Column name to position, built from the header row.
struct ColumnMap(HashMap<String, usize>);

impl ColumnMap {
    fn from_header(line: &str) -> Self {
        Self(
            split_header(line)
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, i))
                .collect(),
        )
    }

    /// Quote-stripped value of `column` in a tokenized row.
    fn value<'a>(&self, fields: &'a [String], column: &'static str) -> Result<&'a str> {
        self.0
            .get(column)
            .and_then(|&i| fields.get(i))
            .map(|v| strip_quotes(v))
            .ok_or_else(|| Error::Other(format!("missing value for column '{column}'")))
    }
}

/// Importer for Webull CSV exports.
#[derive(Debug, Clone)]
pub struct WebullImporter {
    zone: ReferenceZone,
    convention: TimeConvention,
}

impl WebullImporter {
    /// Create an importer bound to one time convention.
    pub fn new(zone: ReferenceZone, convention: TimeConvention) -> Self {
        Self { zone, convention }
    }

    fn parse_row(&self, columns: &ColumnMap, line: &str) -> Result<TradeRecord> {
        let fields = split_fields(line);
        let get = |column: &'static str| columns.value(&fields, column);

        let date = get(column::TRADE_DATE)?;
        let time = get(column::TIME)?;
        let (clock, offset) = split_gmt_suffix(time);
        let timestamp = match self.convention {
            TimeConvention::WallClock => parse_wall_clock(date, clock, DATE_FORMAT)?,
            TimeConvention::UtcOffset => {
                let offset = offset.ok_or_else(|| Error::invalid_field("time offset", time))?;
                parse_with_offset(date, clock, offset, DATE_FORMAT, &self.zone)?
            }
        };

        TradeRecord::builder()
            .symbol(get(column::SYMBOL)?)
            .name(get(column::NAME)?)
            .currency(get(column::CURRENCY)?)
            .instrument_type(get(column::TYPE)?)
            .timestamp(timestamp)
            .side(Side::parse_name(get(column::BUY_SELL)?)?)
            .quantity(parse_decimal("quantity", get(column::QUANTITY)?)?)
            .price(parse_decimal("price", get(column::TRADE_PRICE)?)?)
            .fee(parse_decimal("fee", get(column::COMM_FEE_TAX)?)?)
            .exchange(get(column::EXCHANGE)?)
            .build()
    }
}

impl Importer for WebullImporter {
    fn name(&self) -> &'static str {
        "Webull"
    }

    fn accepts(&self, content: &str) -> bool {
        non_blank_lines(content)
            .next()
            .is_some_and(|(_, line)| line == WEBULL_HEADER)
    }

    fn parse(&self, content: &str) -> Result<Vec<TradeRecord>> {
        let mut lines = non_blank_lines(content);
        let Some((_, header)) = lines.next() else {
            return Ok(Vec::new());
        };
        let columns = ColumnMap::from_header(header);

        lines
            .map(|(number, line)| self.parse_row(&columns, line).map_err(|e| e.at_line(number)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ROW: &str =
        "AAPL,Apple Inc,USD,ETF,2025/03/10,09:31:00,Buy,10,150.25,1502.50,1500.00,2.50,0,NASDAQ";

    fn wall_clock() -> WebullImporter {
        WebullImporter::new(ReferenceZone::eastern(), TimeConvention::WallClock)
    }

    fn utc_offset() -> WebullImporter {
        WebullImporter::new(ReferenceZone::eastern(), TimeConvention::UtcOffset)
    }

    fn file(rows: &[&str]) -> String {
        let mut content = String::from(WEBULL_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    #[test]
    fn test_accepts_exact_header_only() {
        let importer = wall_clock();
        assert!(importer.accepts(&file(&[ROW])));
        assert!(importer.accepts(&format!("\u{feff}\n{}", file(&[]))));
        assert!(!importer.accepts(&file(&[ROW]).replace("Trade Price", "Price")));
        assert!(!importer.accepts(&file(&[ROW]).replace("Symbol,Name", "Name,Symbol")));
        assert!(!importer.accepts("10/03/25,09:31:00,AAPL,B,100,150.25,x"));
        assert!(!importer.accepts(""));
    }

    #[test]
    fn test_parse_reference_row() {
        let records = wall_clock().parse(&file(&[ROW])).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.symbol().as_str(), "AAPL");
        assert_eq!(r.name(), "Apple Inc");
        assert_eq!(r.currency(), "USD");
        assert_eq!(r.instrument_type(), "ETF");
        assert_eq!(r.side(), Side::Buy);
        assert_relative_eq!(r.quantity(), 10.0);
        assert_relative_eq!(r.price(), 150.25);
        assert_relative_eq!(r.fee(), 2.50);
        assert_relative_eq!(r.commission(), 0.0);
        assert_eq!(r.exchange(), "NASDAQ");
        assert_eq!(r.timestamp().to_string(), "2025-03-10 09:31:00");
    }

    #[test]
    fn test_quoted_values_and_blank_lines() {
        let row = r#""TSLA","Tesla, Inc","USD","Stock","2025/03/11","'14:05:10,GMT-04:00'","Sell","0.5","250.10","125.05","124.00","1.05","0","NASDAQ""#;
        let content = format!("{WEBULL_HEADER}\n\n{row}\n\n");
        let records = wall_clock().parse(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Tesla, Inc");
        assert_eq!(records[0].side(), Side::Sell);
        assert_relative_eq!(records[0].quantity(), 0.5);
        assert_eq!(records[0].timestamp().to_string(), "2025-03-11 14:05:10");
    }

    #[test]
    fn test_utc_offset_convention_converts() {
        let row = r#"AAPL,Apple Inc,USD,ETF,2025/01/15,"09:31:00,GMT-04:00",Buy,10,150.25,1502.50,1500.00,2.50,0,NASDAQ"#;
        let records = utc_offset().parse(&file(&[row])).unwrap();
        assert_eq!(records[0].timestamp().to_string(), "2025-01-15 08:31:00");

        let records = wall_clock().parse(&file(&[row])).unwrap();
        assert_eq!(records[0].timestamp().to_string(), "2025-01-15 09:31:00");
    }

    #[test]
    fn test_utc_offset_convention_requires_offset() {
        let err = utc_offset().parse(&file(&[ROW])).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_lowercase_symbol_fails_file() {
        let bad = ROW.replacen("AAPL", "aapl", 1);
        let err = wall_clock().parse(&file(&[ROW, bad.as_str()])).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
        assert!(err.to_string().contains("symbol"));
    }

    #[test]
    fn test_unknown_side_fails_file() {
        let bad = ROW.replace(",Buy,", ",Hold,");
        assert!(wall_clock().parse(&file(&[bad.as_str()])).is_err());
    }

    #[test]
    fn test_short_row_fails_file() {
        let err = wall_clock().parse(&file(&["AAPL,Apple Inc,USD"])).unwrap_err();
        assert!(err.to_string().contains("missing value"));
    }

    #[test]
    fn test_reordered_columns_parse_by_name() {
        let content = "Name,Symbol,Currency,Type,Trade Date,Time,Buy/Sell,Quantity,Trade Price,Comm/Fee/Tax,Exchange\n\
                       Apple Inc,AAPL,USD,ETF,2025/03/10,09:31,Sell,3,10,0.1,NYSE\n";
        let records = wall_clock().parse(content).unwrap();
        assert_eq!(records[0].symbol().as_str(), "AAPL");
        assert_eq!(records[0].timestamp().to_string(), "2025-03-10 09:31:00");
    }

    #[test]
    fn test_import_str_header_only_file() {
        let records = wall_clock().import_str(&file(&[])).unwrap();
        assert_eq!(records.map(|r| r.len()), Some(0));
    }
}
