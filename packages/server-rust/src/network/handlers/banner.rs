//! Plain-text banner served at `/` and `/api`.

/// Banner text.
pub const BANNER: &str = "Task 5.1P - Containerization";

/// Returns the service banner.
pub async fn banner_handler() -> &'static str {
    BANNER
}
