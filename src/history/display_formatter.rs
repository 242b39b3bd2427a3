use super::types::HistoryRow;
use crate::config::TradeHistorySettings;
use crate::orderbook::display_formatter::format_decimal;

pub const HISTORY_HEADERS: [&str; 10] = [
    "Symbol", "Date", "Type", "Side", "Price", "Amount", "Filled", "Total", "Status", "Action",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryColumn {
    Symbol,
    Date,
    Type,
    Side,
    Price,
    Amount,
    Filled,
    Total,
    Status,
    Action,
}

impl HistoryColumn {
    pub const ALL: [HistoryColumn; 10] = [
        HistoryColumn::Symbol,
        HistoryColumn::Date,
        HistoryColumn::Type,
        HistoryColumn::Side,
        HistoryColumn::Price,
        HistoryColumn::Amount,
        HistoryColumn::Filled,
        HistoryColumn::Total,
        HistoryColumn::Status,
        HistoryColumn::Action,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn header(&self) -> &'static str {
        HISTORY_HEADERS[*self as usize]
    }
}

pub fn format_cell(row: &HistoryRow<'_>, column: HistoryColumn, settings: &TradeHistorySettings) -> String {
    let record = row.record;
    match column {
        HistoryColumn::Symbol => record.symbol.clone(),
        HistoryColumn::Date => record.timestamp.format(&settings.date_format).to_string(),
        HistoryColumn::Type => record.order_type.to_string(),
        HistoryColumn::Side => record.side.to_string(),
        HistoryColumn::Price => format!("${}", format_decimal(record.price, settings.price_precision)),
        HistoryColumn::Amount => record.amount.normalize().to_string(),
        HistoryColumn::Filled => format!("{}%", record.filled_percent.normalize()),
        HistoryColumn::Total => {
            let total = format_decimal(record.total, settings.total_precision);
            match record.quote_asset() {
                Some(quote) => format!("{} {}", total, quote),
                None => total,
            }
        }
        HistoryColumn::Status => record.status.to_string(),
        HistoryColumn::Action => {
            if row.cancelable {
                "Cancel".to_string()
            } else {
                String::new()
            }
        }
    }
}

pub fn format_row(row: &HistoryRow<'_>, settings: &TradeHistorySettings) -> Vec<String> {
    HistoryColumn::ALL
        .iter()
        .map(|&column| format_cell(row, column, settings))
        .collect()
}
