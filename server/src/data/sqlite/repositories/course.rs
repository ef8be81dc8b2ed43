//! Course overview repository for SQLite operations

use sqlx::{SqliteConnection, SqlitePool};

use super::{bind_params, build_select};
use crate::data::filters::{ColumnForm, FilterQuery};
use crate::data::sqlite::SqliteError;
use crate::data::types::CourseOverview;

const SELECT_COURSES: &str = "SELECT id, display_name, org, number, display_org_with_default, \
     display_number_with_default FROM course_overviews";

type CourseTuple = (String, Option<String>, String, String, String, String);

/// Map a record source field to its column in the requested form
fn course_column(source_field: &str, form: ColumnForm) -> &str {
    match (source_field, form) {
        ("display_name", ColumnForm::Lowercase) => "display_name_lower",
        ("display_org_with_default", ColumnForm::Lowercase) => "display_org_with_default_lower",
        ("display_number_with_default", ColumnForm::Lowercase) => {
            "display_number_with_default_lower"
        }
        (other, _) => other,
    }
}

/// Insert a course, replacing any existing row with the same key
pub async fn upsert_course(
    conn: &mut SqliteConnection,
    course: &CourseOverview,
) -> Result<(), SqliteError> {
    sqlx::query(
        r#"
        INSERT INTO course_overviews
            (id, display_name, org, number, display_org_with_default, display_number_with_default,
             display_name_lower, display_org_with_default_lower, display_number_with_default_lower)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            display_name = excluded.display_name,
            org = excluded.org,
            number = excluded.number,
            display_org_with_default = excluded.display_org_with_default,
            display_number_with_default = excluded.display_number_with_default,
            display_name_lower = excluded.display_name_lower,
            display_org_with_default_lower = excluded.display_org_with_default_lower,
            display_number_with_default_lower = excluded.display_number_with_default_lower
        "#,
    )
    .bind(&course.id)
    .bind(&course.display_name)
    .bind(&course.org)
    .bind(&course.number)
    .bind(&course.display_org_with_default)
    .bind(&course.display_number_with_default)
    .bind(course.display_name.as_deref().map(str::to_lowercase))
    .bind(course.display_org_with_default.to_lowercase())
    .bind(course.display_number_with_default.to_lowercase())
    .execute(conn)
    .await?;

    Ok(())
}

/// List courses matching the filter, in insertion order
pub async fn list_courses(
    pool: &SqlitePool,
    filter: &FilterQuery,
) -> Result<Vec<CourseOverview>, SqliteError> {
    let (sql, params) = build_select(SELECT_COURSES, filter, course_column, "rowid");

    let rows = bind_params(sqlx::query_as::<_, CourseTuple>(&sql), &params)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                display_name,
                org,
                number,
                display_org_with_default,
                display_number_with_default,
            )| CourseOverview {
                id,
                display_name,
                org,
                number,
                display_org_with_default,
                display_number_with_default,
            },
        )
        .collect())
}
