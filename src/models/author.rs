use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{double_option, is_valid_date};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            birth_date: model.birth_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Validated input for AuthorStore::create
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
}

/// Raw POST /authors body. Required fields are optional here so presence is
/// checked in one validation pass instead of by the deserializer.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
}

impl CreateAuthorRequest {
    pub fn validate(self) -> Result<NewAuthor, String> {
        let first_name = match self.first_name {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err("firstName is required".to_string()),
        };
        let last_name = match self.last_name {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err("lastName is required".to_string()),
        };
        if let Some(date) = &self.birth_date
            && !is_valid_date(date)
        {
            return Err(format!("Invalid birthDate: {}", date));
        }

        Ok(NewAuthor {
            first_name,
            last_name,
            bio: self.bio,
            birth_date: self.birth_date,
        })
    }
}

/// Fields applied by AuthorStore::update; an outer `None` leaves the column
/// untouched, `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<Option<String>>,
    pub birth_date: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub birth_date: Option<Option<String>>,
}

impl UpdateAuthorRequest {
    pub fn validate(self) -> Result<AuthorPatch, String> {
        if let Some(v) = &self.first_name
            && v.trim().is_empty()
        {
            return Err("firstName must not be empty".to_string());
        }
        if let Some(v) = &self.last_name
            && v.trim().is_empty()
        {
            return Err("lastName must not be empty".to_string());
        }
        if let Some(Some(date)) = &self.birth_date
            && !is_valid_date(date)
        {
            return Err(format!("Invalid birthDate: {}", date));
        }

        Ok(AuthorPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            birth_date: self.birth_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_first_and_last_name() {
        let req = CreateAuthorRequest {
            first_name: Some("John".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = CreateAuthorRequest {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        let input = req.validate().unwrap();
        assert_eq!(input.first_name, "John");
        assert_eq!(input.last_name, "Doe");
    }

    #[test]
    fn create_rejects_malformed_birth_date() {
        let req = CreateAuthorRequest {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            birth_date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: UpdateAuthorRequest = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.birth_date, None);

        let patch: UpdateAuthorRequest =
            serde_json::from_str(r#"{"bio": "wrote things"}"#).unwrap();
        assert_eq!(patch.bio, Some(Some("wrote things".to_string())));
    }
}
