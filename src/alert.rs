//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as small banners that HTMX swaps into the alert
//! container at the bottom of every page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error alert with a short headline and optional details.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert markup.
    pub fn into_markup(self) -> Markup {
        html!(
            div
                class="flex items-center p-4 mb-4 rounded-lg shadow
                    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
                role="alert"
            {
                div class="text-sm font-medium"
                {
                    (self.message)

                    @if !self.details.is_empty() {
                        span class="block font-normal" { (self.details) }
                    }
                }
            }
        )
    }

    /// Render the alert as a response with the given status code.
    pub fn respond(self, status_code: StatusCode) -> Response {
        (status_code, self.into_markup()).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::http::StatusCode;

    use super::Alert;

    #[test]
    fn error_alert_contains_message_and_details() {
        let markup = Alert::error("Could not save", "The category1 field must not be empty.")
            .into_markup();

        let rendered = markup.into_string();
        assert!(rendered.contains("Could not save"));
        assert!(rendered.contains("The category1 field must not be empty."));
    }

    #[test]
    fn respond_sets_status_code() {
        let response = Alert::error("Could not save", "").respond(StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
