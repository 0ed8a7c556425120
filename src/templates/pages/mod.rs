pub mod highlighted;
pub mod overview;

pub use highlighted::{highlighted_page, HighlightedVm};
pub use overview::{overview_page, BrandPanel, OverviewVm};
