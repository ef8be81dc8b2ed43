//! User repository for SQLite operations
//!
//! Users are read together with their optional profile through a `LEFT JOIN`,
//! so profile fields are filterable like user columns.

use sqlx::{SqliteConnection, SqlitePool};

use super::{bind_params, build_select};
use crate::data::filters::{ColumnForm, FilterQuery};
use crate::data::sqlite::SqliteError;
use crate::data::types::{User, UserProfile};

const SELECT_USERS: &str = "SELECT u.id, u.username, u.email, u.is_active, u.is_staff, \
     u.is_superuser, u.date_joined, p.user_id IS NOT NULL, p.name, p.country \
     FROM users u LEFT JOIN user_profiles p ON p.user_id = u.id";

type UserTuple = (
    i64,
    String,
    String,
    bool,
    bool,
    bool,
    i64,
    bool,
    Option<String>,
    Option<String>,
);

/// Map a record source field to its column in `SELECT_USERS`
fn user_column(source_field: &str, form: ColumnForm) -> &str {
    match (source_field, form) {
        ("profile.country", ColumnForm::Lowercase) => "p.country_lower",
        ("profile.country", ColumnForm::Stored) => "p.country",
        ("username", ColumnForm::Lowercase) => "u.username_lower",
        ("username", ColumnForm::Stored) => "u.username",
        ("email", ColumnForm::Lowercase) => "u.email_lower",
        ("email", ColumnForm::Stored) => "u.email",
        ("is_active", _) => "u.is_active",
        ("is_staff", _) => "u.is_staff",
        ("is_superuser", _) => "u.is_superuser",
        (other, _) => other,
    }
}

/// Insert or update a user and its profile.
///
/// A user without a profile loses any previously stored profile. Run it
/// inside a transaction so both rows land together.
pub async fn upsert_user(conn: &mut SqliteConnection, user: &User) -> Result<(), SqliteError> {
    sqlx::query(
        r#"
        INSERT INTO users
            (id, username, email, is_active, is_staff, is_superuser, date_joined,
             username_lower, email_lower)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            username = excluded.username,
            email = excluded.email,
            is_active = excluded.is_active,
            is_staff = excluded.is_staff,
            is_superuser = excluded.is_superuser,
            date_joined = excluded.date_joined,
            username_lower = excluded.username_lower,
            email_lower = excluded.email_lower
        "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.is_active)
    .bind(user.is_staff)
    .bind(user.is_superuser)
    .bind(user.date_joined)
    .bind(user.username.to_lowercase())
    .bind(user.email.to_lowercase())
    .execute(&mut *conn)
    .await?;

    match &user.profile {
        Some(profile) => {
            sqlx::query(
                r#"
                INSERT INTO user_profiles (user_id, name, country, country_lower)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(user_id) DO UPDATE SET
                    name = excluded.name,
                    country = excluded.country,
                    country_lower = excluded.country_lower
                "#,
            )
            .bind(user.id)
            .bind(&profile.name)
            .bind(&profile.country)
            .bind(profile.country.as_deref().map(str::to_lowercase))
            .execute(&mut *conn)
            .await?;
        }
        None => {
            sqlx::query("DELETE FROM user_profiles WHERE user_id = ?")
                .bind(user.id)
                .execute(&mut *conn)
                .await?;
        }
    }

    Ok(())
}

/// List users matching the filter, ordered by ID
pub async fn list_users(pool: &SqlitePool, filter: &FilterQuery) -> Result<Vec<User>, SqliteError> {
    let (sql, params) = build_select(SELECT_USERS, filter, user_column, "u.id");

    let rows = bind_params(sqlx::query_as::<_, UserTuple>(&sql), &params)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                username,
                email,
                is_active,
                is_staff,
                is_superuser,
                date_joined,
                has_profile,
                name,
                country,
            )| User {
                id,
                username,
                email,
                is_active,
                is_staff,
                is_superuser,
                date_joined,
                profile: has_profile.then(|| UserProfile {
                    name: name.unwrap_or_default(),
                    country,
                }),
            },
        )
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{FilterError, USER_FILTER};
    use crate::data::sqlite::repositories::test_support::{params, setup_test_pool};

    fn user(id: i64, username: &str, active: bool, staff: bool, country: Option<&str>) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_active: active,
            is_staff: staff,
            is_superuser: false,
            date_joined: 1_577_836_800 + id,
            profile: country.map(|c| UserProfile {
                name: username.to_uppercase(),
                country: Some(c.to_string()),
            }),
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = setup_test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        for u in [
            user(1, "alice", true, false, Some("US")),
            user(2, "bob", false, false, Some("us")),
            user(3, "carol", true, true, Some("CA")),
            user(4, "dave", true, false, None),
        ] {
            upsert_user(&mut tx, &u).await.unwrap();
        }
        tx.commit().await.unwrap();
        pool
    }

    async fn usernames(pool: &SqlitePool, pairs: &[(&str, &str)]) -> Vec<String> {
        let filter = USER_FILTER.compile(&params(pairs)).unwrap();
        list_users(pool, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect()
    }

    #[tokio::test]
    async fn test_list_users_with_profiles() {
        let pool = seeded_pool().await;
        let all = list_users(&pool, &FilterQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], user(1, "alice", true, false, Some("US")));
        assert!(all[3].profile.is_none());
    }

    #[tokio::test]
    async fn test_is_active_spellings() {
        let pool = seeded_pool().await;
        let a = usernames(&pool, &[("is_active", "true")]).await;
        let b = usernames(&pool, &[("is_active", "1")]).await;
        assert_eq!(a, vec!["alice", "carol", "dave"]);
        assert_eq!(a, b);
        assert_eq!(usernames(&pool, &[("is_active", "False")]).await, vec!["bob"]);
    }

    #[tokio::test]
    async fn test_is_active_invalid_value() {
        let err = USER_FILTER
            .compile(&params(&[("is_active", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_country_through_profile() {
        let pool = seeded_pool().await;
        assert_eq!(usernames(&pool, &[("country", "us")]).await, vec!["alice", "bob"]);
        assert_eq!(usernames(&pool, &[("country", "Ca")]).await, vec!["carol"]);
        assert!(usernames(&pool, &[("country", "FR")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_staff_exact_boolean() {
        let pool = seeded_pool().await;
        assert_eq!(usernames(&pool, &[("is_staff", "1")]).await, vec!["carol"]);
        assert_eq!(
            usernames(&pool, &[("is_staff", "false"), ("is_active", "true")]).await,
            vec!["alice", "dave"]
        );
    }

    #[tokio::test]
    async fn test_username_and_email_contains() {
        let pool = seeded_pool().await;
        assert_eq!(usernames(&pool, &[("username", "A")]).await, vec!["alice", "carol", "dave"]);
        assert_eq!(
            usernames(&pool, &[("username", "A"), ("email", "dav")]).await,
            vec!["dave"]
        );
    }

    #[tokio::test]
    async fn test_unknown_parameter_ignored() {
        let pool = seeded_pool().await;
        assert_eq!(
            usernames(&pool, &[("country", "US"), ("foo", "bar")]).await,
            usernames(&pool, &[("country", "US")]).await
        );
    }

    #[tokio::test]
    async fn test_upsert_drops_profile() {
        let pool = seeded_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        upsert_user(&mut conn, &user(1, "alice", true, false, None))
            .await
            .unwrap();
        drop(conn);
        assert_eq!(usernames(&pool, &[("country", "us")]).await, vec!["bob"]);
    }

    #[tokio::test]
    async fn test_non_ascii_case_folding() {
        let pool = seeded_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut zoe = user(5, "ZOË", true, false, Some("ÅLAND"));
        zoe.email = "Zoë@École.fr".into();
        upsert_user(&mut conn, &zoe).await.unwrap();
        drop(conn);

        assert_eq!(usernames(&pool, &[("username", "zoë")]).await, vec!["ZOË"]);
        assert_eq!(usernames(&pool, &[("email", "ÉCOLE")]).await, vec!["ZOË"]);
        assert_eq!(usernames(&pool, &[("country", "åland")]).await, vec!["ZOË"]);
    }
}
