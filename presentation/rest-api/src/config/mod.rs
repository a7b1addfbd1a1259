pub mod app_config;
pub mod cors_config;
pub mod dataset_config;
pub mod llm_config;
pub mod recommendation_config;
pub mod server_config;

use std::str::FromStr;

/// Reads a variable through `lookup`, keeping `default` when it is missing or
/// does not parse.
pub(crate) fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a variable through `lookup`, treating blank values as missing.
pub(crate) fn non_blank(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_numbers_and_keep_default_on_garbage() {
        let lookup = map_lookup(&[("A", " 42 "), ("B", "lots")]);

        assert_eq!(parse_or(&lookup, "A", 7u32), 42);
        assert_eq!(parse_or(&lookup, "B", 7u32), 7);
        assert_eq!(parse_or(&lookup, "C", 7u32), 7);
    }

    #[test]
    fn should_treat_blank_values_as_missing() {
        let lookup = map_lookup(&[("KEY", "   "), ("OTHER", " value ")]);

        assert_eq!(non_blank(&lookup, "KEY"), None);
        assert_eq!(non_blank(&lookup, "OTHER"), Some("value".to_string()));
    }
}
