//! Domain models for the accounts database.
//!
//! These models are storage-agnostic. Accounts are read-only projections
//! built fresh for every result row.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primary key type for accounts.
pub type AccountId = u64;

/// A user account as stored in the `accounts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub fav_color: String,
    /// Empty when the stored array is empty or NULL.
    pub fav_numbers: Vec<i64>,
    /// Free-form JSON document; `Value::Null` when the column is NULL.
    pub properties: Value,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers = self
            .fav_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "Account #{}", self.id)?;
        writeln!(f, "  Name:        {}", self.name)?;
        writeln!(f, "  Email:       {}", self.email)?;
        writeln!(f, "  Active:      {}", self.active)?;
        writeln!(f, "  Fav color:   {}", self.fav_color)?;
        writeln!(f, "  Fav numbers: [{}]", numbers)?;
        writeln!(f, "  Properties:  {}", self.properties)?;
        write!(f, "  Created at:  {}", self.created_at.to_rfc3339())
    }
}

/// Conjunctive filter for account listings.
///
/// Every field left at its default places no constraint on the query, so
/// `AccountFilter::default()` matches all accounts. Empty sets are treated
/// the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Match accounts whose name is any of these.
    #[serde(default)]
    pub names: Vec<String>,
    /// Match accounts with this active flag.
    #[serde(default)]
    pub active: Option<bool>,
    /// Match accounts whose favorite color is any of these.
    #[serde(default)]
    pub fav_colors: Vec<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_fav_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fav_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// True when no field constrains the query.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.active.is_none() && self.fav_colors.is_empty()
    }
}
