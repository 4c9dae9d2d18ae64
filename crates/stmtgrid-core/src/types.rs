//! Basic types for the transaction grid

use serde::{Deserialize, Serialize};

/// Grid column, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Description,
    Amount,
    TransactionType,
    Balance,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Date,
        Column::Description,
        Column::Amount,
        Column::TransactionType,
        Column::Balance,
    ];

    /// Field name, as used in query strings and JSON
    pub fn field(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Description => "description",
            Column::Amount => "amount",
            Column::TransactionType => "transaction_type",
            Column::Balance => "balance",
        }
    }

    /// Column header shown in the grid and CSV
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Description => "Description",
            Column::Amount => "Amount",
            Column::TransactionType => "Transaction Type",
            Column::Balance => "Balance",
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .find(|c| c.field() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Invalid column: {}", s))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

impl SortDirection {
    /// Direction after clicking the header of the column already sorted
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}
