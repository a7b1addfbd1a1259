use poem::middleware::Cors;

use super::{env_lookup, non_blank};

const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://localhost:3000,http://localhost:8080";

/// Initialize CORS middleware for cross-origin requests
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///
/// The API is read-mostly: GET and POST only, JSON bodies.
pub fn init_cors() -> Cors {
    let origins = allowed_origins(&env_lookup);

    Cors::new()
        .allow_origins(origins)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"])
}

fn allowed_origins(lookup: &impl Fn(&str) -> Option<String>) -> Vec<String> {
    non_blank(lookup, "CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;

    #[test]
    fn should_split_and_trim_configured_origins() {
        let lookup = map_lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://a.example, https://b.example,",
        )]);

        assert_eq!(
            allowed_origins(&lookup),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn should_fall_back_to_local_origins() {
        assert_eq!(allowed_origins(&map_lookup(&[])).len(), 3);
    }
}
