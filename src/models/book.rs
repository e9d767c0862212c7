use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{double_option, is_valid_date};

/// Hyphenated ISBN group structure accepted on create and update
pub static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{1,5}-\d{1,7}-\d{1,7}-\d$").expect("invalid ISBN regex"));

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub isbn: String,
    pub published_date: Option<String>,
    pub genre: Option<String>,
    pub author_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Enumerated genres accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Thriller,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Thriller => "Thriller",
        }
    }

    pub fn parse(value: &str) -> Option<Genre> {
        match value {
            "Fantasy" => Some(Genre::Fantasy),
            "Science Fiction" => Some(Genre::ScienceFiction),
            "Thriller" => Some(Genre::Thriller),
            _ => None,
        }
    }
}

// DTO for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub author_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            isbn: model.isbn,
            published_date: model.published_date,
            genre: model.genre,
            author_id: model.author_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Validated input for BookStore::create
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    pub published_date: Option<String>,
    pub genre: Option<Genre>,
    pub author_id: i32,
}

/// Raw POST /books body; presence and formats are checked in validate()
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub published_date: Option<String>,
    pub genre: Option<String>,
    pub author_id: Option<i32>,
}

impl CreateBookRequest {
    pub fn validate(self) -> Result<NewBook, String> {
        let title = match self.title {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err("title is required".to_string()),
        };
        let isbn = match self.isbn {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err("isbn is required".to_string()),
        };
        if !ISBN_PATTERN.is_match(&isbn) {
            return Err(format!("Invalid ISBN format: {}", isbn));
        }
        let genre = match self.genre {
            Some(g) => match Genre::parse(&g) {
                Some(genre) => Some(genre),
                None => return Err(format!("Unknown genre: {}", g)),
            },
            None => None,
        };
        if let Some(date) = &self.published_date
            && !is_valid_date(date)
        {
            return Err(format!("Invalid publishedDate: {}", date));
        }
        let author_id = match self.author_id {
            Some(id) => id,
            None => return Err("authorId is required".to_string()),
        };

        Ok(NewBook {
            title,
            isbn,
            published_date: self.published_date,
            genre,
            author_id,
        })
    }
}

/// Fields applied by BookStore::update
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub published_date: Option<Option<String>>,
    pub genre: Option<Option<Genre>>,
    pub author_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub published_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub genre: Option<Option<String>>,
    pub author_id: Option<i32>,
}

impl UpdateBookRequest {
    pub fn validate(self) -> Result<BookPatch, String> {
        if let Some(v) = &self.title
            && v.trim().is_empty()
        {
            return Err("title must not be empty".to_string());
        }
        if let Some(isbn) = &self.isbn
            && !ISBN_PATTERN.is_match(isbn)
        {
            return Err(format!("Invalid ISBN format: {}", isbn));
        }
        let genre = match self.genre {
            Some(Some(g)) => match Genre::parse(&g) {
                Some(genre) => Some(Some(genre)),
                None => return Err(format!("Unknown genre: {}", g)),
            },
            Some(None) => Some(None),
            None => None,
        };
        if let Some(Some(date)) = &self.published_date
            && !is_valid_date(date)
        {
            return Err(format!("Invalid publishedDate: {}", date));
        }

        Ok(BookPatch {
            title: self.title,
            isbn: self.isbn,
            published_date: self.published_date,
            genre,
            author_id: self.author_id,
        })
    }
}
