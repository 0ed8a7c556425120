use crate::domain::views::{BrandDistribution, DealershipRating};
use crate::domain::Locations;
use crate::templates::components::{card, location_form, rating_bars, rating_donut, stacked_distribution};
use crate::templates::{desktop_layout, Tab};
use chrono::NaiveDate;
use maud::{html, Markup};

pub struct BrandPanel {
    pub brand: String,
    pub ratings: Vec<DealershipRating>,
    pub recent: Vec<(u8, usize)>,
}

pub struct OverviewVm {
    pub cities: Vec<String>,
    pub selected: Locations,
    pub panels: Vec<BrandPanel>,
    pub distribution: Vec<BrandDistribution>,
    pub as_of: NaiveDate,
    pub total_reviews: usize,
}

pub fn overview_page(vm: &OverviewVm) -> Markup {
    desktop_layout(
        "Customer Reviews Overview",
        Tab::Overview,
        location_form("/", &vm.cities, &vm.selected, None),
        html! {
            p class="empty" {
                (vm.total_reviews) " reviews loaded, recency measured from " (vm.as_of.to_string()) "."
            }

            h2 { "Overall Ratings Comparison" }
            div class="columns" {
                @for panel in &vm.panels {
                    (card(&panel.brand, rating_bars(&panel.ratings)))
                }
            }

            h2 { "Within 3 Months Ratings Percentage" }
            (stacked_distribution(&vm.distribution))

            h2 { "Within 3 Months Ratings Comparison" }
            div class="columns" {
                @for panel in &vm.panels {
                    (card(&panel.brand, rating_donut(&panel.recent)))
                }
            }
        },
    )
}
