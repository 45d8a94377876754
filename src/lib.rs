#![doc = "Backcountry trail analysis public API"]
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod io;
pub mod summary;

#[doc(inline)]
pub use analysis::{RunOutput, filter_disruptors, run_analysis};

#[doc(inline)]
pub use config::AnalysisConfig;

#[doc(inline)]
pub use error::AnalysisError;

#[doc(inline)]
pub use feature::{BackcountrySegment, DisruptorFeature, DisruptorKind, TrailFeature};

#[doc(inline)]
pub use summary::{SummaryTotals, TrailSummary};
