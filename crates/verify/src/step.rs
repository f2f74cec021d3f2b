//! The fixed catalogue of checks, in execution order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    SqlConnect,
    SqlLiteral,
    SqlCount,
    OrmConnect,
    OrmLiteral,
    OrmCount,
    OrmInsert,
    CrossClientRead,
    OrmUpdate,
    Cleanup,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Self::SqlConnect,
        Self::SqlLiteral,
        Self::SqlCount,
        Self::OrmConnect,
        Self::OrmLiteral,
        Self::OrmCount,
        Self::OrmInsert,
        Self::CrossClientRead,
        Self::OrmUpdate,
        Self::Cleanup,
    ];

    /// 1-based position in the run.
    pub fn number(&self) -> u8 {
        match self {
            Self::SqlConnect => 1,
            Self::SqlLiteral => 2,
            Self::SqlCount => 3,
            Self::OrmConnect => 4,
            Self::OrmLiteral => 5,
            Self::OrmCount => 6,
            Self::OrmInsert => 7,
            Self::CrossClientRead => 8,
            Self::OrmUpdate => 9,
            Self::Cleanup => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SqlConnect => "SQL client connection",
            Self::SqlLiteral => "simple SQL query",
            Self::SqlCount => "SQL data retrieval",
            Self::OrmConnect => "ORM client connection",
            Self::OrmLiteral => "simple ORM query",
            Self::OrmCount => "ORM data retrieval",
            Self::OrmInsert => "ORM data insertion",
            Self::CrossClientRead => "SQL retrieval of new record",
            Self::OrmUpdate => "ORM data update",
            Self::Cleanup => "test data cleanup",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Capabilities listed in the closing summary of a successful run.
pub const CAPABILITIES: [&str; 7] = [
    "SQL client connection",
    "SQL data retrieval",
    "ORM client connection",
    "ORM data retrieval",
    "ORM data insertion",
    "ORM data update",
    "Cross-client compatibility",
];
