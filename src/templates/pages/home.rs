// templates/pages/home.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

/// Search form. `zip` pre-fills the field when re-rendering after an error.
pub fn search_form(zip: &str) -> Markup {
    html! {
        form method="get" action="/search" {
            label for="zip" { "ZIP code" }
            " "
            input
                type="text"
                id="zip"
                name="zip"
                value=(zip)
                inputmode="numeric"
                pattern="[0-9]{5}"
                maxlength="5"
                placeholder="63122"
                required;
            " "
            button type="submit" { "Analyze" }
        }
    }
}

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {},
        html! {
            h1 { "Rental investment scout" }

            (card("Search a ZIP code", html! {
                p {
                    "Pulls current rentals and for-sale listings, builds a rent summary by "
                    "property type, beds and baths, and ranks every sale by cap rate."
                }
                (search_form(""))
            }))
        },
    )
}
