#![forbid(unsafe_code)]

//! Widgets for the ranked bar chart.
//!
//! [`WindowedList`] keeps only the rows near the viewport materialized.
//! [`ScrollController`] owns the list and the scrollbar and turns wheel,
//! drag and track input into a single scroll offset. [`HeaderRow`] and
//! [`TooltipService`] complete the chart chrome.

pub mod header;
pub mod pointer;
pub mod row;
pub mod scroll;
pub mod text;
pub mod tooltip;
pub mod windowed_list;

pub use header::HeaderRow;
pub use pointer::PointerResult;
pub use row::{BarRowFactory, RowContext, RowFactory, RowGeometry, RowRecord, TooltipPayload};
pub use scroll::{DragPhase, ScrollController, ScrollError, ScrollbarMetrics};
pub use tooltip::{TooltipService, TooltipStyle};
pub use windowed_list::{CachePolicy, WindowError, WindowedList, WindowedListConfig};
