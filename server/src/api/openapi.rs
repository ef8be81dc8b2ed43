//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{courses, filters, health, site_metrics, users};
use crate::data::filters::{ComparisonKind, ValueType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Figures API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Filtered reporting over courses, users and site metrics"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "courses", description = "Course summaries"),
        (name = "users", description = "User accounts"),
        (name = "site-daily-metrics", description = "Per-site daily metrics"),
        (name = "filters", description = "Filter schema discovery")
    ),
    paths(
        health::health,
        courses::list_courses,
        users::list_users,
        site_metrics::list_site_daily_metrics,
        filters::get_filter_schema,
    ),
    components(schemas(
        health::HealthResponse,
        courses::types::CourseDto,
        users::types::UserDto,
        site_metrics::types::SiteDailyMetricsDto,
        filters::FilterFieldDto,
        filters::FilterSchemaResponse,
        ComparisonKind,
        ValueType,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Figures API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;
