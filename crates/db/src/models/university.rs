//! University entity model and DTOs.

use nucap_core::error::CoreError;
use nucap_core::types::{DbId, Timestamp};
use nucap_core::university::{
    FixtureNames, TestRequirement, FIXTURE_LOCATION, FIXTURE_WEBSITE,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A university row from the `universities` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct University {
    pub id: DbId,
    pub name: String,
    pub short_name: String,
    pub location: String,
    pub website: Option<String>,
    #[sqlx(try_from = "String")]
    pub test_required: TestRequirement,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new university.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUniversity {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub short_name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(url)]
    pub website: Option<String>,
    pub test_required: TestRequirement,
    pub is_active: bool,
}

impl CreateUniversity {
    /// The disposable row a verification run inserts and later deletes.
    pub fn fixture(names: FixtureNames) -> Self {
        Self {
            name: names.name,
            short_name: names.short_name,
            location: FIXTURE_LOCATION.to_string(),
            website: Some(FIXTURE_WEBSITE.to_string()),
            test_required: TestRequirement::None,
            is_active: true,
        }
    }

    /// Run field validation, mapping failures into [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

/// DTO for updating an existing university. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUniversity {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub test_required: Option<TestRequirement>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn names() -> FixtureNames {
        FixtureNames {
            name: "Test University 1".to_string(),
            short_name: "TEST1".to_string(),
        }
    }

    #[test]
    fn fixture_passes_validation() {
        let input = CreateUniversity::fixture(names());
        assert!(input.check().is_ok());
        assert_eq!(input.location, "Test City");
        assert_eq!(input.test_required, TestRequirement::None);
        assert!(input.is_active);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut input = CreateUniversity::fixture(names());
        input.name.clear();
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_short_name_is_rejected() {
        let mut input = CreateUniversity::fixture(names());
        input.short_name = "X".repeat(51);
        assert_matches!(input.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn website_must_be_a_url() {
        let mut input = CreateUniversity::fixture(names());
        input.website = Some("not a url".to_string());
        assert_matches!(input.check(), Err(CoreError::Validation(_)));

        input.website = None;
        assert!(input.check().is_ok());
    }
}
