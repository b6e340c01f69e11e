//! Warrior Trading simulator exports.
//!
//! Two layouts exist. The newer one has a header row naming its columns; the
//! older one has no header and exactly seven positional fields per line. The
//! simulator only trades whole shares in US dollars.

use crate::datetime::{parse_wall_clock, parse_with_offset};
use crate::importer::Importer;
use crate::tokenizer::{non_blank_lines, split_header};
use std::collections::HashMap;
use tradeconv_core::{
    parse_decimal, parse_whole_number, Error, ReferenceZone, Result, Side, TradeRecord,
};

/// Currency assumed for every simulator fill.
pub const SIMULATOR_CURRENCY: &str = "USD";

/// Field count of a positional line.
pub const POSITIONAL_FIELDS: usize = 7;

/// Offset the positional export's clock is assumed to be in.
pub const POSITIONAL_OFFSET: &str = "-04:00";

const HEADER_DATE_FORMAT: &str = "%m/%d/%y";
const POSITIONAL_DATE_FORMAT: &str = "%d/%m/%y";

const DATE: &str = "Date";
const TIME: &str = "Time";
const SYMBOL: &str = "Symbol";
const SIDE: &str = "Side";
const QUANTITY: &str = "Quantity";
const PRICE: &str = "Price";
const REQUIRED_COLUMNS: [&str; 6] = [DATE, TIME, SYMBOL, SIDE, QUANTITY, PRICE];

/// Raw string fields of one simulator fill.
struct SimFill<'a> {
    date: &'a str,
    time: &'a str,
    symbol: &'a str,
    side: &'a str,
    quantity: &'a str,
    price: &'a str,
}

impl SimFill<'_> {
    fn into_record(self, timestamp: chrono::NaiveDateTime) -> Result<TradeRecord> {
        TradeRecord::builder()
            .symbol(self.symbol)
            .currency(SIMULATOR_CURRENCY)
            .timestamp(timestamp)
            .side(Side::parse_code(self.side)?)
            .quantity(parse_whole_number("quantity", self.quantity)?)
            .price(parse_decimal("price", self.price)?)
            .build()
    }
}

/// Importer for the simulator export with a header row.
///
/// Columns are found by name. Times are reference-zone wall-clock time and
/// dates are month-first.
#[derive(Debug, Clone, Default)]
pub struct SimulatorImporter;

impl SimulatorImporter {
    pub fn new() -> Self {
        Self
    }

    /// Column positions, or `None` if a required column is missing.
    fn columns(header: &str) -> Option<HashMap<&'static str, usize>> {
        let names = split_header(header);
        REQUIRED_COLUMNS
            .iter()
            .map(|&column| {
                names
                    .iter()
                    .position(|name| name == column)
                    .map(|i| (column, i))
            })
            .collect()
    }

    fn parse_line(columns: &HashMap<&'static str, usize>, line: &str) -> Result<TradeRecord> {
        let parts: Vec<&str> = line.split(',').collect();
        let get = |column: &'static str| {
            columns
                .get(column)
                .and_then(|&i| parts.get(i).copied())
                .ok_or_else(|| Error::Other(format!("missing value for column '{column}'")))
        };

        let fill = SimFill {
            date: get(DATE)?,
            time: get(TIME)?,
            symbol: get(SYMBOL)?,
            side: get(SIDE)?,
            quantity: get(QUANTITY)?,
            price: get(PRICE)?,
        };
        let timestamp = parse_wall_clock(fill.date, fill.time, HEADER_DATE_FORMAT)?;
        fill.into_record(timestamp)
    }
}

impl Importer for SimulatorImporter {
    fn name(&self) -> &'static str {
        "WarriorTradingSim"
    }

    fn accepts(&self, content: &str) -> bool {
        let mut lines = non_blank_lines(content);
        let Some(columns) = lines.next().and_then(|(_, header)| Self::columns(header)) else {
            return false;
        };
        lines
            .next()
            .is_some_and(|(_, line)| Self::parse_line(&columns, line).is_ok())
    }

    fn parse(&self, content: &str) -> Result<Vec<TradeRecord>> {
        let mut lines = non_blank_lines(content);
        let Some((number, header)) = lines.next() else {
            return Ok(Vec::new());
        };
        let columns = Self::columns(header)
            .ok_or_else(|| Error::parse(number, "header is missing a required column"))?;

        lines
            .map(|(number, line)| Self::parse_line(&columns, line).map_err(|e| e.at_line(number)))
            .collect()
    }
}

/// Importer for the header-less positional simulator export:
/// `date,time,symbol,side,quantity,price,<unused>`.
///
/// Dates are day-first and the clock is read as `-04:00`, then converted into
/// the reference zone.
#[derive(Debug, Clone)]
pub struct SimulatorPositionalImporter {
    zone: ReferenceZone,
}

impl SimulatorPositionalImporter {
    pub fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    fn parse_line(&self, line: &str) -> Result<TradeRecord> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != POSITIONAL_FIELDS {
            return Err(Error::Other(format!(
                "expected {POSITIONAL_FIELDS} fields, found {}",
                parts.len()
            )));
        }

        let fill = SimFill {
            date: parts[0],
            time: parts[1],
            symbol: parts[2],
            side: parts[3],
            quantity: parts[4],
            price: parts[5],
        };
        let timestamp = parse_with_offset(
            fill.date,
            fill.time,
            POSITIONAL_OFFSET,
            POSITIONAL_DATE_FORMAT,
            &self.zone,
        )?;
        fill.into_record(timestamp)
    }
}

impl Importer for SimulatorPositionalImporter {
    fn name(&self) -> &'static str {
        "WarriorTradingSimPositional"
    }

    /// Every line must have the positional field count and the first line
    /// must parse.
    fn accepts(&self, content: &str) -> bool {
        let mut lines = non_blank_lines(content).peekable();
        let Some(&(_, first)) = lines.peek() else {
            return false;
        };
        lines.all(|(_, line)| line.split(',').count() == POSITIONAL_FIELDS)
            && self.parse_line(first).is_ok()
    }

    fn parse(&self, content: &str) -> Result<Vec<TradeRecord>> {
        non_blank_lines(content)
            .map(|(number, line)| self.parse_line(line).map_err(|e| e.at_line(number)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER_FILE: &str = "Date,Time,Symbol,Side,Quantity,Price,Route\n\
                               03/10/25,09:31:00,AAPL,B,100,150.25,ARCA\n\
                               03/10/25,09:45:12,AAPL,S,100,151.00,ARCA\n\
                               03/10/25,10:02:00,TSLA,SS,50,250.5,ARCA\n";

    const POSITIONAL_FILE: &str = "10/03/25,09:31:00,AAPL,B,100,150.25,x\n\
                                   \n\
                                   10/03/25,15:59:00,AAPL,S,100,151,x\n";

    #[test]
    fn test_header_variant_parses_by_name() {
        let importer = SimulatorImporter::new();
        assert!(importer.accepts(HEADER_FILE));

        let records = importer.parse(HEADER_FILE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp().to_string(), "2025-03-10 09:31:00");
        assert_eq!(records[0].currency(), "USD");
        assert_eq!(records[1].side(), Side::Sell);
        assert_eq!(records[2].side(), Side::Sell);
        assert_relative_eq!(records[2].price(), 250.5);
    }

    #[test]
    fn test_header_variant_reordered_columns() {
        let content = "Symbol,Price,Quantity,Side,Time,Date\nMSFT,400.1,5,B,13:00:00,12/31/24\n";
        let records = SimulatorImporter::new().import_str(content).unwrap().unwrap();
        assert_eq!(records[0].symbol().as_str(), "MSFT");
        assert_eq!(records[0].timestamp().to_string(), "2024-12-31 13:00:00");
    }

    #[test]
    fn test_header_variant_rejects_other_dialects() {
        let importer = SimulatorImporter::new();
        assert!(!importer.accepts(POSITIONAL_FILE));
        assert!(!importer.accepts("Date,Time,Symbol,Side,Quantity,Price\n"));
        assert!(!importer.accepts(
            "Date,Time,Symbol,Side,Quantity,Price\n03/10/25,09:31:00,AAPL,X,100,1,\n"
        ));
        assert!(!importer.accepts(crate::webull::WEBULL_HEADER));
    }

    #[test]
    fn test_header_variant_fractional_quantity_fails_file() {
        let content = "Date,Time,Symbol,Side,Quantity,Price\n\
                       03/10/25,09:31:00,AAPL,B,100,150.25\n\
                       03/10/25,09:32:00,AAPL,S,0.5,150.25\n";
        let importer = SimulatorImporter::new();
        assert!(importer.accepts(content));
        let err = importer.parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_spelled_out_sides_reject_line() {
        let positional = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        let content = "10/03/25,09:31:00,AAPL,B,100,150.25,x\n\
                       10/03/25,09:32:00,AAPL,Buy,100,150.25,x\n";
        let err = positional.parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert!(!positional.accepts("10/03/25,09:31:00,AAPL,sell,100,150.25,x\n"));

        let header = SimulatorImporter::new();
        let content = "Date,Time,Symbol,Side,Quantity,Price\n\
                       03/10/25,09:31:00,AAPL,BUY,100,150.25\n";
        assert!(!header.accepts(content));
        assert!(header.parse(content).is_err());
    }

    #[test]
    fn test_positional_parses_with_offset() {
        let importer = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        assert!(importer.accepts(POSITIONAL_FILE));

        let records = importer.parse(POSITIONAL_FILE).unwrap();
        assert_eq!(records.len(), 2);
        // 10 March 2025 is after the DST switch, so -04:00 is local time.
        assert_eq!(records[0].timestamp().to_string(), "2025-03-10 09:31:00");
        assert_eq!(records[1].timestamp().to_string(), "2025-03-10 15:59:00");
        assert_relative_eq!(records[0].quantity(), 100.0);
    }

    #[test]
    fn test_positional_winter_dates_shift_an_hour() {
        let importer = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        let records = importer.parse("15/01/25,09:31:00,AAPL,B,100,150.25,x\n").unwrap();
        assert_eq!(records[0].timestamp().to_string(), "2025-01-15 08:31:00");
    }

    #[test]
    fn test_positional_six_fields_anywhere_rejects() {
        let importer = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        let short_first = "10/03/25,09:31:00,AAPL,B,100,150.25\n";
        let short_later = "10/03/25,09:31:00,AAPL,B,100,150.25,x\n\
                           10/03/25,09:32:00,AAPL,S,100,150.25\n";
        assert!(!importer.accepts(short_first));
        assert!(!importer.accepts(short_later));
        assert!(importer.import_str(short_later).unwrap().is_none());
    }

    #[test]
    fn test_positional_rejects_header_files() {
        let importer = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        assert!(!importer.accepts(HEADER_FILE));
        assert!(!importer.accepts(crate::webull::WEBULL_HEADER));
        assert!(!importer.accepts(""));
    }

    #[test]
    fn test_positional_bad_symbol_on_later_line_fails_file() {
        let importer = SimulatorPositionalImporter::new(ReferenceZone::eastern());
        let content = "10/03/25,09:31:00,AAPL,B,100,150.25,x\n\
                       10/03/25,09:32:00,aapl,S,100,150.25,x\n";
        assert!(importer.accepts(content));
        let err = importer.parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
