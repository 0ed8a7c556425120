use crate::domain::views::LowScoreReview;
use crate::domain::Locations;
use crate::templates::components::location_form;
use crate::templates::{desktop_layout, Tab};
use maud::{html, Markup};

pub struct HighlightedVm {
    pub cities: Vec<String>,
    pub selected: Locations,
    pub brands: Vec<String>,
    pub brand: String,
    pub reviews: Vec<LowScoreReview>,
    /// Query string (without '?') reproducing the current selection.
    pub query: String,
}

pub fn highlighted_page(vm: &HighlightedVm) -> Markup {
    desktop_layout(
        "Highlighted Reviews",
        Tab::Highlighted,
        location_form("/reviews", &vm.cities, &vm.selected, Some(&vm.brand)),
        html! {
            h2 { "Highlighted Reviews (3 stars or lower)" }

            form action="/reviews" method="get" {
                input type="hidden" name="filtered" value="1";
                @for city in vm.selected.iter() {
                    input type="hidden" name="location" value=(city);
                }
                select name="brand" {
                    @for b in &vm.brands {
                        option value=(b) selected[b == &vm.brand] { (b) }
                    }
                }
                " "
                button type="submit" { "Show" }
                " "
                a href=(format!("/reviews/export?{}", vm.query)) { "Download xlsx" }
            }

            p { (vm.reviews.len()) " reviews" }

            @if vm.reviews.is_empty() {
                p class="empty" { "No low-score reviews for this brand in the selected locations." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Dealership" }
                            th { "Review" }
                            th { "Owner Answer" }
                            th { "Rating" }
                            th { "Date" }
                        }
                    }
                    tbody {
                        @for r in &vm.reviews {
                            tr {
                                td { (r.name) }
                                td { (r.review_text.as_deref().unwrap_or("")) }
                                td { (r.owner_answer.as_deref().unwrap_or("")) }
                                td { (r.review_rating) }
                                td { (r.review_datetime.format("%Y-%m-%d").to_string()) }
                            }
                        }
                    }
                }
            }
        },
    )
}
