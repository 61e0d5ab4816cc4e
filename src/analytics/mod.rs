//! Pure aggregation functions over the generated tables.
//!
//! Every function here is total: empty input yields empty or zero-valued
//! output, never an error. The one documented degeneracy is the z-score /
//! percentile math, which goes NaN on single-row or zero-variance inputs
//! (see `stats`); callers are expected to tolerate that.

pub mod flow;
pub mod gex;
pub mod heatmap;
pub mod kpi;
pub mod narrative;
pub mod stats;
pub mod strikes;
pub mod unusual;

pub use flow::{flow_by_minute, FlowMinute};
pub use gex::{compute_gex, GexStrike, GexSummary};
pub use heatmap::{sweep_heatmap, SweepHeatmap};
pub use kpi::{kpi_summary, KpiSummary};
pub use narrative::narrative_summary;
pub use strikes::{top_strikes, StrikePremium};
pub use unusual::{unusual_scores, UnusualScore};
