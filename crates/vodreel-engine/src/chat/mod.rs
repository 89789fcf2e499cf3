//! Chat signal pipeline.
//!
//! Per-second chat metrics flow through a fixed chain:
//!
//! ```text
//! messages -> mps -> baseline -> spikes ─┐
//! messages -> emote density/repeats ─────┼─> combined score -> smoothed -> aligned
//! messages -> keyword hits ──────────────┘
//! ```
//!
//! Every stage consumes and produces plain sample vectors so the pipeline
//! crate can persist each one as its own artifact.

pub mod activity;
pub mod align;
pub mod baseline;
pub mod combine;
pub mod emote;
pub mod keyword;
pub mod smooth;
pub mod spike;

pub use activity::messages_per_second;
pub use align::align_to_video;
pub use baseline::rolling_baseline;
pub use combine::combine_chat_scores;
pub use emote::{emote_density, emote_scores, repeated_emotes};
pub use keyword::{keyword_hits, keyword_scores};
pub use smooth::smooth_chat_scores;
pub use spike::{detect_spikes, log_chat_metrics_summary};
