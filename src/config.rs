pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone, PartialEq, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Reads `QUIZGEN_API_URL` as baked in at build time (there is no process
    /// environment inside the browser).
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("QUIZGEN_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_URL
        } else {
            trimmed
        };
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let cfg = ApiConfig::with_base_url("https://quiz.example.com/api//");
        assert_eq!(cfg.base_url, "https://quiz.example.com/api");
        assert_eq!(cfg.endpoint("/generate"), "https://quiz.example.com/api/generate");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(ApiConfig::with_base_url("   ").base_url, DEFAULT_API_URL);
        assert_eq!(
            ApiConfig::default().endpoint("quizzes/3"),
            "http://localhost:8000/api/quizzes/3"
        );
    }
}
