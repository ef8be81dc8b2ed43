//! SQLite repositories
//!
//! Types (CourseOverview, User, etc.) should be imported from `crate::data::types`.
//! List operations push the compiled filter down as a parameterized `WHERE`.

pub mod course;
pub mod site_metrics;
pub mod user;

pub use course::{list_courses, upsert_course};
pub use site_metrics::{list_site_daily_metrics, upsert_site_daily_metrics};
pub use user::{list_users, upsert_user};

use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

use crate::data::filters::{ColumnForm, FilterQuery, FilterValue, SqlParams};

/// Append the filter condition and ordering to a base `SELECT`
fn build_select<F>(base: &str, filter: &FilterQuery, mapper: F, order_by: &str) -> (String, SqlParams)
where
    F: Fn(&str, ColumnForm) -> &str,
{
    let mut params = SqlParams::default();
    let mut sql = base.to_string();
    if let Some(condition) = filter.to_sql(&mut params, mapper) {
        sql.push_str(" WHERE ");
        sql.push_str(&condition);
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(order_by);
    (sql, params)
}

/// Bind collected filter values in placeholder order
fn bind_params<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &SqlParams,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for value in &params.values {
        query = match value {
            FilterValue::Text(s) => query.bind(s.clone()),
            FilterValue::Bool(b) => query.bind(*b),
            FilterValue::Date(d) => query.bind(*d),
        };
    }
    query
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Single-connection in-memory pool with the current schema applied
    pub async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    pub fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
