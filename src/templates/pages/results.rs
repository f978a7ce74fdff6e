// templates/pages/results.rs

use crate::analysis::RentSummaryRow;
use crate::format::currency;
use crate::pipeline::SearchResults;
use crate::templates::components::{card, listing_map, map_assets, property_card};
use crate::templates::desktop_layout;
use crate::templates::pages::search_form;
use maud::{html, Markup};

pub fn results_page(results: &SearchResults) -> Markup {
    let zip = results.location.as_str();

    desktop_layout(
        &format!("Results for {zip}"),
        map_assets(),
        html! {
            h1 { "Results for " (zip) }
            p class="muted" {
                (results.rentals.len()) " rentals, "
                (results.investments.len()) " listings for sale. Searched "
                (results.searched_at.format("%Y-%m-%d %H:%M UTC"))
                "."
            }
            @if results.skipped_rentals + results.skipped_sales > 0 {
                p class="muted" {
                    (results.skipped_rentals + results.skipped_sales)
                    " malformed listing(s) were skipped."
                }
            }
            (search_form(zip))

            (downloads(zip, results.searched_at.timestamp()))

            (card("Rent summary", rent_table(&results.rent_summary)))

            (card("Map", listing_map(&results.map)))

            h2 { "Listings by cap rate" }
            @if results.investments.is_empty() {
                p class="muted" { "No for-sale listings found." }
            } @else {
                div class="cards" {
                    @for record in &results.investments {
                        (property_card(record))
                    }
                }
            }
        },
    )
}

/// Export links carry the page's search time so the server can log which
/// page a download came from; the export itself fetches fresh listings.
fn downloads(zip: &str, searched: i64) -> Markup {
    let query = format!("zip={zip}&searched={searched}");
    html! {
        p class="downloads" {
            "Download (fetches current listings): "
            a href={ "/export/rent-summary.csv?" (query) } { "Rent summary (CSV)" }
            a href={ "/export/rent-summary.xlsx?" (query) } { "Rent summary (XLSX)" }
            a href={ "/export/investments.csv?" (query) } { "Investments (CSV)" }
            a href={ "/export/investments.xlsx?" (query) } { "Investments (XLSX)" }
        }
    }
}

fn rent_table(rows: &[RentSummaryRow]) -> Markup {
    if rows.is_empty() {
        return html! { p class="muted" { "No rental data for this area." } };
    }

    html! {
        table {
            thead {
                tr {
                    th { "Property type" }
                    th { "Beds" }
                    th { "Baths" }
                    th { "Count" }
                    th { "Min" }
                    th { "Median" }
                    th { "Max" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td { (row.property_type) }
                        td { (row.beds) }
                        td { (row.baths) }
                        td class="num" { (row.count) }
                        td class="num" { (currency(row.min_rent)) }
                        td class="num" { (currency(row.median_rent)) }
                        td class="num" { (currency(row.max_rent)) }
                    }
                }
            }
        }
    }
}
