//! Repository for the `roles` lookup table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::role::Role;

/// Columns selected by every role query.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Read access to the seeded role set.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (`"admin"`, `"editor"`).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a role id to its name.
    pub async fn name_of(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        Ok(Self::find_by_id(pool, id).await?.map(|role| role.name))
    }
}
