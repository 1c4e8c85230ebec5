//! Defines the template and route handler for the 500 page.
//!
//! Rendered whenever a request fails for a reason the user cannot fix, such
//! as a storage fault or a poisoned connection lock.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_internal_server_error_page() -> Response {
    get_internal_server_error_response()
}

pub fn get_internal_server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view(
            "Internal Server Error",
            "500",
            "Sorry, something went wrong on our end.",
            "Head back to the dashboard and retry; details are in debug.log.",
        ),
    )
        .into_response()
}
