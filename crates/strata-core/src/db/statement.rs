use crate::error::InternalError;
use std::fmt;

///
/// SqlStatement
///
/// Immutable SQL text plus a flag asking the executor to run it outside any
/// ambient transaction (e.g. `CREATE DATABASE`).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlStatement {
    sql: String,
    suppress_transaction: bool,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>) -> Result<Self, InternalError> {
        let sql = sql.into();
        if sql.trim().is_empty() {
            return Err(InternalError::statement_invariant("sql statement is empty"));
        }

        Ok(Self {
            sql,
            suppress_transaction: false,
        })
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub const fn suppress_transaction(&self) -> bool {
        self.suppress_transaction
    }

    pub const fn set_suppress_transaction(&mut self, suppress: bool) {
        self.suppress_transaction = suppress;
    }

    #[must_use]
    pub const fn with_suppress_transaction(mut self, suppress: bool) -> Self {
        self.suppress_transaction = suppress;
        self
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
