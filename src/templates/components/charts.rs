// Static HTML/CSS charts. No scripts.

use crate::domain::views::{BrandDistribution, DealershipRating};
use maud::{html, Markup};

const BAR_LOW: (u8, u8, u8) = (0xbc, 0xbc, 0xbc);
const BAR_HIGH: (u8, u8, u8) = (0xde, 0x09, 0x09);

// Index = rating - 1.
const STACK_COLORS: [&str; 5] = ["#ffbaba", "#ff7b7b", "#ff5252", "#ff0000", "#a70000"];
const DONUT_COLORS: [&str; 5] = ["#e81000", "#f76055", "#ff9189", "#ffcaca", "#ffdbdb"];

const MAX_RATING: f64 = 5.0;

fn rating_color(palette: &[&'static str; 5], rating: u8) -> &'static str {
    palette[(rating.clamp(1, 5) - 1) as usize]
}

/// Linear blend between the grey and red ends of the bar scale.
fn bar_color(value: f64, min: f64, max: f64) -> String {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(BAR_LOW.0, BAR_HIGH.0),
        mix(BAR_LOW.1, BAR_HIGH.1),
        mix(BAR_LOW.2, BAR_HIGH.2)
    )
}

/// Horizontal bars, one per dealership, in the order given.
pub fn rating_bars(ratings: &[DealershipRating]) -> Markup {
    let min = ratings.first().map(|r| r.mean_rating).unwrap_or(0.0);
    let max = ratings.last().map(|r| r.mean_rating).unwrap_or(0.0);

    html! {
        @if ratings.is_empty() {
            p class="empty" { "No dealerships in the selected locations." }
        }
        @for r in ratings {
            div class="bar-row" {
                span class="bar-label" { (r.name) }
                div class="bar-track" {
                    div class="bar" style=(format!(
                        "width: {:.1}%; background: {};",
                        r.mean_rating / MAX_RATING * 100.0,
                        bar_color(r.mean_rating, min, max)
                    )) {}
                }
                span { (format!("{:.1}", r.mean_rating)) }
            }
        }
    }
}

/// 100%-stacked bar per brand.
pub fn stacked_distribution(dists: &[BrandDistribution]) -> Markup {
    html! {
        @if dists.is_empty() {
            p class="empty" { "No recent reviews in the selected locations." }
        } @else {
            @for d in dists {
                div class="bar-row" {
                    span class="bar-label" style="width: 6rem;" { (d.brand) }
                    div class="stack bar-track" {
                        @for (rating, count, percent) in &d.shares {
                            @if *count > 0 {
                                span
                                    title=(format!("{rating} stars: {count}"))
                                    style=(format!("width: {percent:.2}%; background: {};", rating_color(&STACK_COLORS, *rating)))
                                { (format!("{percent:.0}%")) }
                            }
                        }
                    }
                }
            }
            div class="legend" {
                @for rating in 1..=5u8 {
                    span {
                        span class="swatch" style=(format!("background: {};", rating_color(&STACK_COLORS, rating))) {}
                        (rating) " ★"
                    }
                }
            }
        }
    }
}

/// Donut of recent rating counts, as returned by `rating_distribution_pie`.
pub fn rating_donut(counts: &[(u8, usize)]) -> Markup {
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    let mut stops = Vec::with_capacity(counts.len());
    let mut start = 0.0;
    for (rating, count) in counts {
        let end = start + *count as f64 * 100.0 / total.max(1) as f64;
        stops.push(format!(
            "{} {start:.2}% {end:.2}%",
            rating_color(&DONUT_COLORS, *rating)
        ));
        start = end;
    }

    html! {
        @if total == 0 {
            p class="empty" { "No recent reviews." }
        } @else {
            div class="donut" style=(format!("background: conic-gradient({});", stops.join(", "))) {}
            div class="legend" {
                @for (rating, count) in counts {
                    span {
                        span class="swatch" style=(format!("background: {};", rating_color(&DONUT_COLORS, *rating))) {}
                        (format!("{rating} ★ {:.0}%", *count as f64 * 100.0 / total as f64))
                    }
                }
            }
        }
    }
}
