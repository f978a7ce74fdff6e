use crate::analysis::InvestmentRecord;
use crate::format::{currency, percent};
use crate::geo::MapView;
use maud::{html, Markup, PreEscaped};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const DEFAULT_ZOOM: u8 = 12;

#[derive(Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    address: &'a str,
    price: String,
    cap_rate: String,
    url: &'a str,
}

/// Leaflet stylesheet and script, for the page head.
pub fn map_assets() -> Markup {
    html! {
        link rel="stylesheet" href=(LEAFLET_CSS);
        script src=(LEAFLET_JS) {}
    }
}

/// A Leaflet map of the geocoded listings, or a notice when none resolved.
pub fn listing_map(view: &MapView<InvestmentRecord>) -> Markup {
    let Some(center) = view.center else {
        return html! {
            p class="muted" { "No listing addresses could be placed on the map." }
        };
    };

    let markers: Vec<Marker> = view
        .points
        .iter()
        .map(|p| Marker {
            lat: p.coordinate.latitude,
            lon: p.coordinate.longitude,
            address: &p.record.address,
            price: currency(p.record.listing_price),
            cap_rate: percent(p.record.cap_rate),
            url: &p.record.listing_url,
        })
        .collect();

    let script = format!(
        "(function(){{\
var map=L.map('map').setView([{lat},{lon}],{zoom});\
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png',{{maxZoom:19,attribution:'&copy; OpenStreetMap contributors'}}).addTo(map);\
var esc=function(s){{var d=document.createElement('div');d.textContent=s;return d.innerHTML;}};\
{markers}.forEach(function(m){{\
L.marker([m.lat,m.lon]).addTo(map).bindPopup('<b>'+esc(m.address)+'</b><br>'+esc(m.price)+' · cap '+esc(m.cap_rate)+'<br><a target=\"_blank\" href=\"'+esc(m.url)+'\">View listing</a>');\
}});}})();",
        lat = center.latitude,
        lon = center.longitude,
        zoom = DEFAULT_ZOOM,
        markers = script_json(&markers),
    );

    html! {
        div id="map" {}
        @if view.unresolved > 0 {
            p class="muted" { (view.unresolved) " listing(s) could not be located." }
        }
        script { (PreEscaped(script)) }
    }
}

/// JSON safe to embed inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}
