use crate::domain::Locations;
use maud::{html, Markup};

/// Sidebar location selector. `filtered=1` marks an explicit submission so
/// that unchecking everything selects nothing instead of the defaults.
pub fn location_form(
    action: &str,
    cities: &[String],
    selected: &Locations,
    brand: Option<&str>,
) -> Markup {
    html! {
        h4 { "Select Location" }
        form action=(action) method="get" {
            input type="hidden" name="filtered" value="1";
            @if let Some(brand) = brand {
                input type="hidden" name="brand" value=(brand);
            }
            @for city in cities {
                div {
                    label {
                        input type="checkbox" name="location" value=(city) checked[selected.contains(city)];
                        " " (city)
                    }
                }
            }
            @if cities.is_empty() {
                p class="empty" { "No locations loaded." }
            }
            button type="submit" style="margin-top: 0.75rem;" { "Apply" }
        }
    }
}
