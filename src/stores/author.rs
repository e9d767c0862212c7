//! Author store

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, PageRequest, Paginated};
use crate::models::Author;
use crate::models::author::{ActiveModel, AuthorPatch, Column, Entity as AuthorEntity, NewAuthor};

#[derive(Clone)]
pub struct AuthorStore {
    db: DatabaseConnection,
}

impl AuthorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let author = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            bio: Set(input.bio),
            birth_date: Set(input.birth_date),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;
        Ok(Author::from(result))
    }

    /// List authors, most recently created first. `search` matches as a
    /// case-insensitive substring against first OR last name.
    pub async fn find_all(
        &self,
        page: PageRequest,
        search: Option<String>,
    ) -> Result<Paginated<Author>, DomainError> {
        tracing::debug!("List authors - page={}, limit={}, search={:?}", page.page, page.limit, search);

        let mut query = AuthorEntity::find();

        if let Some(q) = &search
            && !q.is_empty()
        {
            // LIKE is case-insensitive for ASCII on SQLite
            let pattern = crate::stores::substring_pattern(q);
            let cond = Condition::any()
                .add(Column::FirstName.like(pattern.clone()))
                .add(Column::LastName.like(pattern));
            query = query.filter(cond);
        }

        let query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await?;
        // A page past the end yields an empty vec, not an error
        let records = paginator.fetch_page(page.index()).await?;

        Ok(Paginated {
            total,
            page: page.page,
            limit: page.limit,
            data: records.into_iter().map(Author::from).collect(),
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(author.map(Author::from))
    }

    /// Apply a partial patch; unspecified fields are left unchanged.
    pub async fn update(&self, id: i32, patch: AuthorPatch) -> Result<Option<Author>, DomainError> {
        let Some(existing) = AuthorEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(first_name) = patch.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(bio) = patch.bio {
            active.bio = Set(bio);
        }
        if let Some(birth_date) = patch.birth_date {
            active.birth_date = Set(birth_date);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(Some(Author::from(result)))
    }

    /// Remove an author and return the prior record. Books referencing the
    /// author are left in place (dangling references are allowed).
    pub async fn delete(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let Some(existing) = AuthorEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let prior = Author::from(existing.clone());
        existing.delete(&self.db).await?;
        Ok(Some(prior))
    }
}
