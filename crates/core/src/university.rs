//! University domain values shared by both database clients.
//!
//! Holds the admission-test enum stored in `universities.test_required`
//! and the naming scheme for the disposable verification fixture.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Test requirement
// ---------------------------------------------------------------------------

/// Admission test a university requires, stored as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TestRequirement {
    None,
    Nat,
    Ecat,
    Mdcat,
    Sat,
    Gat,
    EntryTest,
}

impl TestRequirement {
    pub const ALL: [TestRequirement; 7] = [
        Self::None,
        Self::Nat,
        Self::Ecat,
        Self::Mdcat,
        Self::Sat,
        Self::Gat,
        Self::EntryTest,
    ];

    /// Parse a value read from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "None" => Ok(Self::None),
            "NAT" => Ok(Self::Nat),
            "ECAT" => Ok(Self::Ecat),
            "MDCAT" => Ok(Self::Mdcat),
            "SAT" => Ok(Self::Sat),
            "GAT" => Ok(Self::Gat),
            "Entry Test" => Ok(Self::EntryTest),
            other => Err(CoreError::InvalidValue {
                field: "test_required",
                value: other.to_string(),
            }),
        }
    }

    /// The string stored in the `test_required` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Nat => "NAT",
            Self::Ecat => "ECAT",
            Self::Mdcat => "MDCAT",
            Self::Sat => "SAT",
            Self::Gat => "GAT",
            Self::EntryTest => "Entry Test",
        }
    }
}

impl fmt::Display for TestRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TestRequirement {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&value)
    }
}

impl From<TestRequirement> for String {
    fn from(value: TestRequirement) -> Self {
        value.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Verification fixture
// ---------------------------------------------------------------------------

pub const FIXTURE_LOCATION: &str = "Test City";
pub const FIXTURE_UPDATED_LOCATION: &str = "Updated Test City";
pub const FIXTURE_WEBSITE: &str = "https://test.edu.pk";

/// Unique name pair for one verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureNames {
    pub name: String,
    pub short_name: String,
}

impl FixtureNames {
    /// Derive the pair from a timestamp (millisecond resolution) so repeated
    /// runs do not collide on the unique `name`/`short_name` columns.
    pub fn at(now: Timestamp) -> Self {
        let millis = now.timestamp_millis();
        Self {
            name: format!("Test University {millis}"),
            short_name: format!("TEST{millis}"),
        }
    }

    pub fn now() -> Self {
        Self::at(chrono::Utc::now())
    }
}
