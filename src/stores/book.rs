//! Book store
//!
//! Same CRUD contract as the author store, plus the cross-entity checks on
//! create: the referenced author must exist and the ISBN must be unique.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{BookQuery, DomainError, PageRequest, Paginated};
use crate::models::Book;
use crate::models::book::{ActiveModel, BookPatch, Column, Entity as BookEntity, NewBook};
use crate::stores::AuthorStore;

#[derive(Clone)]
pub struct BookStore {
    db: DatabaseConnection,
    authors: AuthorStore,
}

impl BookStore {
    pub fn new(db: DatabaseConnection, authors: AuthorStore) -> Self {
        Self { db, authors }
    }

    pub async fn create(&self, input: NewBook) -> Result<Book, DomainError> {
        // Referential check: the author must exist at creation time
        if self.authors.find_by_id(input.author_id).await?.is_none() {
            return Err(DomainError::AuthorNotFound);
        }

        // The pre-check produces the precise error; the unique index on isbn
        // is the backstop for creates that race past it.
        let duplicate = BookEntity::find()
            .filter(Column::Isbn.eq(input.isbn.clone()))
            .one(&self.db)
            .await?;
        if duplicate.is_some() {
            return Err(DomainError::DuplicateIsbn);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let book = ActiveModel {
            title: Set(input.title),
            isbn: Set(input.isbn),
            published_date: Set(input.published_date),
            genre: Set(input.genre.map(|g| g.as_str().to_string())),
            author_id: Set(input.author_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        match book.insert(&self.db).await {
            Ok(model) => Ok(Book::from(model)),
            Err(e) if is_unique_violation(&e) => Err(DomainError::DuplicateIsbn),
            Err(e) => Err(e.into()),
        }
    }

    /// List books, most recently created first. Exact-match filters on genre
    /// and author id combine with a substring search on title OR isbn.
    pub async fn find_all(
        &self,
        page: PageRequest,
        filter: BookQuery,
    ) -> Result<Paginated<Book>, DomainError> {
        tracing::debug!(
            "List books - page={}, limit={}, genre={:?}, author_id={:?}, search={:?}",
            page.page,
            page.limit,
            filter.genre,
            filter.author_id,
            filter.search
        );

        let mut query = BookEntity::find();

        if let Some(genre) = &filter.genre {
            query = query.filter(Column::Genre.eq(genre.as_str()));
        }

        if let Some(author_id) = filter.author_id {
            query = query.filter(Column::AuthorId.eq(author_id));
        }

        if let Some(q) = &filter.search
            && !q.is_empty()
        {
            let pattern = crate::stores::substring_pattern(q);
            let cond = Condition::any()
                .add(Column::Title.like(pattern.clone()))
                .add(Column::Isbn.like(pattern));
            query = query.filter(cond);
        }

        let query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await?;
        let records = paginator.fetch_page(page.index()).await?;

        Ok(Paginated {
            total,
            page: page.page,
            limit: page.limit,
            data: records.into_iter().map(Book::from).collect(),
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    /// Apply a partial patch. The referenced author is not re-verified here;
    /// the check is a creation-time contract only.
    pub async fn update(&self, id: i32, patch: BookPatch) -> Result<Option<Book>, DomainError> {
        let Some(existing) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(isbn) = patch.isbn {
            active.isbn = Set(isbn);
        }
        if let Some(published_date) = patch.published_date {
            active.published_date = Set(published_date);
        }
        if let Some(genre) = patch.genre {
            active.genre = Set(genre.map(|g| g.as_str().to_string()));
        }
        if let Some(author_id) = patch.author_id {
            active.author_id = Set(author_id);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(Book::from(model))),
            Err(e) if is_unique_violation(&e) => Err(DomainError::DuplicateIsbn),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(existing) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let prior = Book::from(existing.clone());
        existing.delete(&self.db).await?;
        Ok(Some(prior))
    }
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    matches!(
        e.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
