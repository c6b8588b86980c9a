//! Dynamic WHERE clause construction.
//!
//! Filters are turned into a list of `(predicate, parameter)` pairs. Predicate
//! text only ever contains column names chosen by this crate and dialect
//! placeholders; caller-supplied values travel exclusively as bound parameters.

use serde::Serialize;

use crate::db::AccountFilter;

/// Column list shared by every account query, in row-decoding order.
pub const ACCOUNT_COLUMNS: &str =
    "id, name, email, active, fav_color, fav_numbers, properties, created_at";

/// SQL dialect used to render placeholders and membership predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `$1, $2, ...` placeholders and `col = ANY($n)` membership.
    Postgres,
    /// `?` placeholders and membership against a JSON array parameter.
    Sqlite,
}

impl Dialect {
    fn placeholder(self, position: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", position),
            Dialect::Sqlite => "?".to_string(),
        }
    }

    fn equals(self, column: &str, position: usize) -> String {
        format!("{} = {}", column, self.placeholder(position))
    }

    fn member_of(self, column: &str, position: usize) -> String {
        match self {
            Dialect::Postgres => format!("{} = ANY({})", column, self.placeholder(position)),
            Dialect::Sqlite => format!(
                "{} IN (SELECT value FROM json_each({}))",
                column,
                self.placeholder(position)
            ),
        }
    }
}

/// A value bound to one placeholder of a generated clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    /// Bound as a single array parameter, whatever its length.
    TextSet(Vec<String>),
}

/// Accumulates predicates and their parameters in insertion order.
#[derive(Debug, Clone)]
pub struct WhereBuilder {
    dialect: Dialect,
    predicates: Vec<String>,
    params: Vec<FilterValue>,
}

impl WhereBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            predicates: Vec::new(),
            params: Vec::new(),
        }
    }

    fn next_position(&self) -> usize {
        self.params.len() + 1
    }

    /// Add `column = value`.
    pub fn eq(mut self, column: &'static str, value: FilterValue) -> Self {
        let predicate = self.dialect.equals(column, self.next_position());
        self.predicates.push(predicate);
        self.params.push(value);
        self
    }

    /// Add a membership test against `values`. An empty set adds nothing.
    pub fn any_of(mut self, column: &'static str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        let predicate = self.dialect.member_of(column, self.next_position());
        self.predicates.push(predicate);
        self.params.push(FilterValue::TextSet(values.to_vec()));
        self
    }

    /// Add `column = value` only when a value is present.
    pub fn eq_opt(self, column: &'static str, value: Option<FilterValue>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    pub fn build(self) -> WhereClause {
        WhereClause {
            predicates: self.predicates,
            params: self.params,
        }
    }
}

/// Finished conjunction of predicates plus the values to bind, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    predicates: Vec<String>,
    params: Vec<FilterValue>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    /// Render as ` WHERE a AND b`, or an empty string when unconstrained.
    pub fn to_sql(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }
}

/// Build the WHERE clause for an account filter.
///
/// Field order is fixed: names, active, then favorite colors.
pub fn build_account_where(filter: &AccountFilter, dialect: Dialect) -> WhereClause {
    WhereBuilder::new(dialect)
        .any_of("name", &filter.names)
        .eq_opt("active", filter.active.map(FilterValue::Bool))
        .any_of("fav_color", &filter.fav_colors)
        .build()
}

/// Full SELECT for a filtered account listing, ordered by id.
pub fn select_accounts_sql(clause: &WhereClause) -> String {
    format!(
        "SELECT {} FROM accounts{} ORDER BY id",
        ACCOUNT_COLUMNS,
        clause.to_sql()
    )
}

/// WHERE clause selecting a single account by primary key.
pub fn build_id_where(id: i64, dialect: Dialect) -> WhereClause {
    WhereBuilder::new(dialect)
        .eq("id", FilterValue::Int(id))
        .build()
}

/// SELECT for a single row; no ordering needed on a primary key lookup.
pub fn select_account_sql(clause: &WhereClause) -> String {
    format!("SELECT {} FROM accounts{}", ACCOUNT_COLUMNS, clause.to_sql())
}
