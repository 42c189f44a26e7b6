#![forbid(unsafe_code)]

//! Pointer handling outcomes and the hit ids registered by chart widgets.

use rankbar_render::HitId;

/// Hit id of every row group (`HitRegion::Content`, data = row index).
pub const ROWS_HIT_ID: HitId = HitId::new(1);
/// Hit id of a truncated row name (`HitRegion::Tooltip`, data = row index).
pub const ROW_NAME_HIT_ID: HitId = HitId::new(2);
/// Hit id of a progress bar with tooltip content (`HitRegion::Tooltip`).
pub const ROW_BAR_HIT_ID: HitId = HitId::new(3);
/// Hit id of the scrollbar parts (`HitRegion::Scrollbar`).
pub const SCROLLBAR_HIT_ID: HitId = HitId::new(4);
/// Hit id of the header (`HitRegion::Header`, data = column index).
pub const HEADER_HIT_ID: HitId = HitId::new(5);

/// Result of feeding a pointer event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResult {
    /// The event was not for this widget.
    Ignored,
    /// A scroll input was applied.
    Scrolled,
    /// A thumb drag started; the widget now captures the pointer.
    DragStarted,
    /// The thumb drag ended and the pointer was released.
    DragEnded,
    /// A hover highlight was switched on or off.
    HoverChanged,
    /// A tooltip was shown or moved.
    TooltipShown,
    /// A tooltip was hidden.
    TooltipHidden,
}

impl PointerResult {
    /// Whether the event was consumed.
    #[inline]
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
