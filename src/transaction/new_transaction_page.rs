//! Defines the route handler for the page with the new transaction form.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    transaction::MAX_TEXT_FIELD_LENGTH,
};

/// Renders the page for creating a transaction.
///
/// The `required` and `maxlength` attributes mirror the checks done at the
/// database gateway, so most mistakes are caught before a round trip.
pub async fn get_new_transaction_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md bg-white rounded-lg shadow dark:border dark:bg-gray-800 dark:border-gray-700 p-6"
            {
                h2 class="text-xl font-bold mb-4" { "New Transaction" }

                form
                    hx-post=(endpoints::TRANSACTIONS_API)
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "日付" }

                        input
                            name="date"
                            id="date"
                            type="date"
                            value=(today)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    (text_field("title", "内容"))
                    (text_field("account_name", "口座"))
                    (text_field("category1", "分類1"))
                    (text_field("category2", "分類2"))

                    div
                    {
                        label for="purchased_number" class=(FORM_LABEL_STYLE) { "数量" }

                        input
                            name="purchased_number"
                            id="purchased_number"
                            type="number"
                            step="1"
                            min="0"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="unit_price" class=(FORM_LABEL_STYLE) { "単価" }

                        input
                            name="unit_price"
                            id="unit_price"
                            type="number"
                            step="any"
                            min="0"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="total_price" class=(FORM_LABEL_STYLE) { "金額" }

                        input
                            name="total_price"
                            id="total_price"
                            type="number"
                            step="1"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button
                        type="submit"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Save"
                    }
                }
            }
        }
    );

    base("New Transaction", &[], &content).into_response()
}

/// A required text input with its label.
fn text_field(name: &str, label: &str) -> Markup {
    html!(
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                name=(name)
                id=(name)
                type="text"
                maxlength=(MAX_TEXT_FIELD_LENGTH)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    )
}
