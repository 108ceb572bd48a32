// Presentation layer: chart and tab view models derived from a complete
// analysis. Nothing here feeds back into the analysis itself.

pub mod charts;
pub mod tabs;
