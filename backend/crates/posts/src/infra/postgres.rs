//! PostgreSQL Post Repository

use kernel::id::{PostId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostText;
use crate::error::PostResult;

/// PostgreSQL-backed post store
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the posts table if it does not exist yet
    pub async fn ensure_schema(&self) -> PostResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id BIGSERIAL PRIMARY KEY,
                owner_id BIGINT NOT NULL REFERENCES users (id),
                text TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    owner_id: i64,
    text: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::from_raw(self.id),
            owner_id: UserId::from_raw(self.owner_id),
            text: PostText::from_db(self.text),
        }
    }
}

impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: NewPost) -> PostResult<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (owner_id, text) VALUES ($1, $2) RETURNING id",
        )
        .bind(new_post.owner_id.as_i64())
        .bind(new_post.text.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(new_post.into_post(PostId::from_raw(id)))
    }

    async fn find_by_id(&self, post_id: PostId) -> PostResult<Option<Post>> {
        let row: Option<PostRow> =
            sqlx::query_as("SELECT id, owner_id, text FROM posts WHERE id = $1")
                .bind(post_id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> PostResult<Vec<Post>> {
        let rows: Vec<PostRow> =
            sqlx::query_as("SELECT id, owner_id, text FROM posts WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id.as_i64())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn delete(&self, post_id: PostId) -> PostResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
