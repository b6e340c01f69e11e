//! Tradervue generic import format.
//!
//! Nine columns, one fill per line. Tradervue only knows commission and
//! transaction fees, so ECN fees are always written as zero.

use crate::exporter::{format_number, Exporter};
use std::io::{self, Write};
use tradeconv_core::TradeRecord;

/// Header row of every Tradervue file.
pub const TRADERVUE_HEADER: &str =
    "Date,Time,Symbol,Quantity,Price,Side,Commission,TransFee,ECNFee";

const TIME_FORMAT: &str = "%H:%M:%S";

/// How the date column is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `MM/dd/yyyy`.
    MonthFirst,
    /// `d/M/yyyy`.
    DayFirst,
}

impl DateLayout {
    fn format(self) -> &'static str {
        match self {
            DateLayout::MonthFirst => "%m/%d/%Y",
            DateLayout::DayFirst => "%-d/%-m/%Y",
        }
    }
}

/// Writer for Tradervue's generic CSV import.
#[derive(Debug, Clone)]
pub struct TradervueExporter {
    layout: DateLayout,
}

impl TradervueExporter {
    /// US layout, the one Tradervue expects by default.
    pub fn month_first() -> Self {
        Self {
            layout: DateLayout::MonthFirst,
        }
    }

    /// Day-first layout for accounts set to a non-US locale.
    pub fn day_first() -> Self {
        Self {
            layout: DateLayout::DayFirst,
        }
    }

    /// Render one record as a CSV line, without the line terminator.
    pub fn format_line(&self, record: &TradeRecord) -> String {
        let ts = record.timestamp();
        format!(
            "{},{},{},{},{},{},{},{},0",
            ts.format(self.layout.format()),
            ts.format(TIME_FORMAT),
            record.symbol(),
            format_number(record.quantity()),
            format_number(record.price()),
            record.side(),
            format_number(record.commission()),
            format_number(record.fee()),
        )
    }
}

impl Exporter for TradervueExporter {
    fn name(&self) -> &str {
        match self.layout {
            DateLayout::MonthFirst => "Tradervue",
            DateLayout::DayFirst => "TradervueDayFirst",
        }
    }

    fn write(&self, out: &mut dyn Write, records: &[TradeRecord]) -> io::Result<()> {
        writeln!(out, "{TRADERVUE_HEADER}")?;
        for record in records {
            writeln!(out, "{}", self.format_line(record))?;
        }
        Ok(())
    }
}
