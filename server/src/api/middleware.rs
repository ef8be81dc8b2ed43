//! HTTP middleware (CORS, 404 handler)

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::response::IntoResponse;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::ApiError;
use crate::core::config::is_all_interfaces;

/// Allowed origins configuration
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Create allowed origins from host and port configuration
    pub fn new(host: &str, port: u16) -> Self {
        let mut origins = Vec::new();
        let is_all = is_all_interfaces(host);

        // Loopback and wildcard binds accept both loopback spellings
        let base_hosts: Vec<&str> = if is_all || host == "127.0.0.1" || host == "localhost" {
            vec!["localhost", "127.0.0.1"]
        } else {
            vec![host]
        };

        for h in &base_hosts {
            origins.push(format!("http://{}:{}", h, port));
            origins.push(format!("http://{}", h));
        }

        if is_all && let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                origins.push(format!("http://{}:{}", ip, port));
            }
        }

        Self { origins }
    }

    fn as_header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }
}

/// Create CORS layer. The API is read-only.
pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.as_header_values()))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ])
}

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!(
        method = %req.method(),
        uri = %req.uri(),
        user_agent = ?req.headers().get(header::USER_AGENT),
        "[404] No route"
    );

    ApiError::not_found(
        "NOT_FOUND",
        format!("No route for {} {}", req.method(), req.uri().path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_localhost() {
        let allowed = AllowedOrigins::new("127.0.0.1", 8020);
        assert!(allowed.origins.contains(&"http://localhost:8020".to_string()));
        assert!(allowed.origins.contains(&"http://127.0.0.1:8020".to_string()));
        assert!(!allowed.origins.contains(&"http://evil.example:8020".to_string()));
    }

    #[test]
    fn test_allowed_origins_specific_host() {
        let allowed = AllowedOrigins::new("10.0.0.5", 9000);
        assert_eq!(
            allowed.origins,
            vec!["http://10.0.0.5:9000".to_string(), "http://10.0.0.5".to_string()]
        );
        assert_eq!(allowed.as_header_values().len(), 2);
    }

    #[test]
    fn test_allowed_origins_all_interfaces_includes_loopback() {
        let allowed = AllowedOrigins::new("0.0.0.0", 8020);
        assert!(allowed.origins.contains(&"http://localhost:8020".to_string()));
    }
}
