pub const API_URL_ENV: &str = "GRID_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Base URL of the grid endpoint: `GRID_API_URL` when set and non-empty.
pub fn api_base_url() -> String {
    api_base_url_from(|key| std::env::var(key).ok())
}

pub(crate) fn api_base_url_from<F>(env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env(API_URL_ENV)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(api_base_url_from(|_| None), DEFAULT_API_URL);
        assert_eq!(api_base_url_from(|_| Some("  ".into())), DEFAULT_API_URL);
    }

    #[test]
    fn env_value_wins() {
        let url = api_base_url_from(|key| {
            (key == API_URL_ENV).then(|| "https://grids.example.com ".to_string())
        });
        assert_eq!(url, "https://grids.example.com");
    }
}
