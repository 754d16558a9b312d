pub mod compute;
pub mod error;
pub mod filter;
pub mod selection;

pub use compute::{
    CardMetrics, DEFAULT_CHART_MARGIN, NumberFormat, PairedRow, Share, card_metrics,
    chart_series, format_fraction, format_number, macro_split, paired_rows, percent, upper_limit,
};
pub use error::{Result, SelectionError};
pub use filter::{canonical_food, canonical_group, exists, foods_in_groups, search_foods};
pub use selection::{
    FixedInstance, Frame, InstanceChange, NoSelectionReason, Notice, Resolution, SelectionEvent,
    SessionState, SlotSelection, dispatch, dispatch_at, dispatch_settled, resolve, valid_selection,
};
