use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of a movie API call as sent by clients.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRequest {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MovieRequest {
    pub fn search(movie: impl Into<String>) -> Self {
        Self { action: "search".into(), movie: Some(movie.into()), link: None }
    }

    pub fn add(movie: impl Into<String>, link: impl Into<String>) -> Self {
        Self { action: "add".into(), movie: Some(movie.into()), link: Some(link.into()) }
    }
}

/// Tagged response body returned by the movie API.
///
/// Serialized as `{"status": "...", ...}`, e.g. `{"status":"found","link":"..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MovieResponse {
    Found { link: String },
    NotFound,
    Success { message: String },
    Error { message: String },
}

impl MovieResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_status_tags() {
        let v = serde_json::to_value(MovieResponse::NotFound).unwrap();
        assert_eq!(v, serde_json::json!({"status": "not_found"}));

        let v = serde_json::to_value(MovieResponse::Found { link: "http://a/b".into() }).unwrap();
        assert_eq!(v, serde_json::json!({"status": "found", "link": "http://a/b"}));

        let parsed: MovieResponse =
            serde_json::from_str(r#"{"status":"error","message":"Invalid action"}"#).unwrap();
        assert_eq!(parsed, MovieResponse::error("Invalid action"));
    }

    #[test]
    fn request_omits_missing_fields() {
        let v = serde_json::to_value(MovieRequest::search("Inception")).unwrap();
        assert_eq!(v, serde_json::json!({"action": "search", "movie": "Inception"}));
    }
}
