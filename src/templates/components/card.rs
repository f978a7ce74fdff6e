use crate::analysis::InvestmentRecord;
use crate::format::{currency, percent, whole_number};
use crate::listings::NA;
use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// One ranked for-sale listing.
pub fn property_card(record: &InvestmentRecord) -> Markup {
    html! {
        article class="card" {
            @if record.primary_image != NA {
                img src=(record.primary_image) alt=(record.address) loading="lazy";
            }
            h3 { (record.address) }
            p class="muted" { (record.city) ", " (record.state) " " (record.zip) }
            p { strong { (currency(record.listing_price)) } }
            p {
                (record.beds) " bd · " (record.baths) " ba · "
                (whole_number(record.sqft)) " sq ft"
            }
            p class="muted" { (record.property_type) " · " (record.status) }
            table {
                tr { td { "Median rent" } td class="num" { (currency(record.median_rent)) } }
                tr { td { "Annual rent" } td class="num" { (currency(record.estimated_annual_rent)) } }
                tr { td { "NOI" } td class="num" { (currency(record.noi)) } }
                tr { td { "Cap rate" } td class="num" { (percent(record.cap_rate)) } }
            }
            @if record.listing_url != NA {
                p { a href=(record.listing_url) target="_blank" rel="noopener" { "View listing" } }
            }
        }
    }
}
