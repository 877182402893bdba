use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

use common::types::MovieResponse;
use service::errors::ActionError;

pub static SEARCH_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("movie_links_search_total", "Total search calls")
        .expect("register search_total")
});

pub static SEARCH_HITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("movie_links_search_hits_total", "Searches that found a link")
        .expect("register search_hits_total")
});

pub static ADD_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("movie_links_add_total", "Successful add calls")
        .expect("register add_total")
});

pub static REQUEST_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("movie_links_request_errors_total", "Calls answered with an error status")
        .expect("register request_errors_total")
});

pub fn record(outcome: &Result<MovieResponse, ActionError>) {
    match outcome {
        Ok(MovieResponse::Found { .. }) => {
            SEARCH_TOTAL.inc();
            SEARCH_HITS_TOTAL.inc();
        }
        Ok(MovieResponse::NotFound) => SEARCH_TOTAL.inc(),
        Ok(MovieResponse::Success { .. }) => ADD_TOTAL.inc(),
        Ok(MovieResponse::Error { .. }) | Err(_) => REQUEST_ERRORS_TOTAL.inc(),
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_count_as_searches() {
        let searches = SEARCH_TOTAL.get();
        let hits = SEARCH_HITS_TOTAL.get();
        record(&Ok(MovieResponse::Found { link: "http://x".into() }));
        assert!(SEARCH_TOTAL.get() >= searches + 1);
        assert!(SEARCH_HITS_TOTAL.get() >= hits + 1);

        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("movie_links_search_hits_total"));
    }
}
