//! Core data types for the trade converter.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Pattern every ticker must match.
pub const TICKER_PATTERN: &str = r"^[A-Z]{1,8}$";

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TICKER_PATTERN).expect("ticker pattern is a valid regex"));

/// Validated ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse a ticker. No case folding: `aapl` is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        if TICKER_RE.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(Error::invalid_field("symbol", input))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse a simulator side code.
    ///
    /// Codes are exact: `B` is a buy, `S` and `SS` (short sell) are sells.
    pub fn parse_code(token: &str) -> Result<Self> {
        match token {
            "B" => Ok(Side::Buy),
            "S" | "SS" => Ok(Side::Sell),
            _ => Err(Error::invalid_field("side", token)),
        }
    }

    /// Parse a spelled-out side as written by broker exports, in any case.
    pub fn parse_name(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if token.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(Error::invalid_field("side", token))
        }
    }

    /// Textual name used by exporters.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a decimal using the invariant format (`.` separator, no grouping).
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid_field(field, raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_field(field, raw))
    }
}

/// Parse a whole number, as used by formats that only trade integral lots.
pub fn parse_whole_number(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<i64>()
        .map(|v| v as f64)
        .map_err(|_| Error::invalid_field(field, raw))
}

/// Canonical trade record produced by every importer.
///
/// Records are only created through [`TradeRecordBuilder::build`], so a value
/// of this type always satisfies the field invariants. The timestamp is
/// wall-clock time in the reference zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    symbol: Symbol,
    name: String,
    currency: String,
    instrument_type: String,
    timestamp: NaiveDateTime,
    side: Side,
    quantity: f64,
    price: f64,
    commission: f64,
    fee: f64,
    exchange: String,
}

impl TradeRecord {
    /// Start building a record.
    pub fn builder() -> TradeRecordBuilder {
        TradeRecordBuilder::default()
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn instrument_type(&self) -> &str {
        &self.instrument_type
    }

    /// Reference-zone wall-clock time of the execution.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn commission(&self) -> f64 {
        self.commission
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Calendar date of the trading session this record belongs to.
    #[inline]
    pub fn session_date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Composite key used to collapse duplicate records.
    pub fn dedupe_key(&self) -> DedupeKey {
        DedupeKey {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            currency: self.currency.clone(),
            instrument_type: self.instrument_type.clone(),
            timestamp: self.timestamp,
            side: self.side,
            quantity: OrderedFloat(self.quantity),
            price: OrderedFloat(self.price),
            fee: OrderedFloat(self.fee),
            exchange: self.exchange.clone(),
        }
    }
}

/// Fields that decide whether two records describe the same execution.
///
/// Commission is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    pub symbol: Symbol,
    pub name: String,
    pub currency: String,
    pub instrument_type: String,
    pub timestamp: NaiveDateTime,
    pub side: Side,
    pub quantity: OrderedFloat<f64>,
    pub price: OrderedFloat<f64>,
    pub fee: OrderedFloat<f64>,
    pub exchange: String,
}

/// Validating builder for [`TradeRecord`].
#[derive(Debug, Clone, Default)]
pub struct TradeRecordBuilder {
    symbol: Option<String>,
    name: String,
    currency: String,
    instrument_type: String,
    timestamp: Option<NaiveDateTime>,
    side: Option<Side>,
    quantity: Option<f64>,
    price: Option<f64>,
    commission: f64,
    fee: f64,
    exchange: String,
}

impl TradeRecordBuilder {
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn instrument_type(mut self, instrument_type: impl Into<String>) -> Self {
        self.instrument_type = instrument_type.into();
        self
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn commission(mut self, commission: f64) -> Self {
        self.commission = commission;
        self
    }

    pub fn fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }

    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Validate every field and produce the record.
    pub fn build(self) -> Result<TradeRecord> {
        let symbol = Symbol::parse(self.symbol.as_deref().unwrap_or_default())?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| Error::invalid_field("timestamp", ""))?;
        let side = self.side.ok_or_else(|| Error::invalid_field("side", ""))?;
        let quantity = finite("quantity", self.quantity)?;
        let price = finite("price", self.price)?;
        let commission = finite("commission", Some(self.commission))?;
        let fee = finite("fee", Some(self.fee))?;

        Ok(TradeRecord {
            symbol,
            name: self.name,
            currency: self.currency,
            instrument_type: self.instrument_type,
            timestamp,
            side,
            quantity,
            price,
            commission,
            fee,
            exchange: self.exchange,
        })
    }
}

fn finite(field: &'static str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(Error::invalid_field(field, v.to_string())),
        None => Err(Error::invalid_field(field, "")),
    }
}
