//! Secondary advice derived from a computed result.

mod checklist;
mod tips;

pub use checklist::document_checklist;
pub use tips::{Tip, TipCategory, regime_summary, smart_tips};
