#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native input (DOM events, winit, terminal mouse
//! reports) into [`PointerEvent`] values and forward them to the chart.
//!
//! # Design Notes
//!
//! - Coordinates are surface units relative to the chart's top-left corner.
//! - `Click` is a separate kind: hosts emit it after a matching down/up pair,
//!   the same way browsers synthesize `click`.
//! - Wheel deltas are in surface units, positive = scroll content down.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button (wheel click).
    Middle,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
    /// Pointer moved (with or without a button held).
    Moved,
    /// Press and release on the same target.
    Click(PointerButton),
    /// Wheel scrolled vertically.
    Wheel {
        /// Scroll distance in surface units.
        delta_y: f64,
    },
    /// Pointer left the surface.
    Leave,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Primary-button release.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Moved, x, y)
    }

    /// Primary-button click.
    #[must_use]
    pub const fn click(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Click(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn wheel(x: f64, y: f64, delta_y: f64) -> Self {
        Self::new(PointerEventKind::Wheel { delta_y }, x, y)
    }

    #[must_use]
    pub const fn leave() -> Self {
        Self::new(PointerEventKind::Leave, -1.0, -1.0)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the event was emitted by the primary button.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Down(PointerButton::Primary)
                | PointerEventKind::Up(PointerButton::Primary)
                | PointerEventKind::Click(PointerButton::Primary)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(
            PointerEvent::down(1.0, 2.0).kind,
            PointerEventKind::Down(PointerButton::Primary)
        );
        assert_eq!(
            PointerEvent::wheel(0.0, 0.0, 120.0).kind,
            PointerEventKind::Wheel { delta_y: 120.0 }
        );
        assert_eq!(PointerEvent::moved(3.0, 4.0).position(), Point::new(3.0, 4.0));
    }

    #[test]
    fn modifiers_default_to_none() {
        let ev = PointerEvent::click(0.0, 0.0);
        assert_eq!(ev.modifiers, Modifiers::NONE);
        let ev = ev.with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
        assert!(!ev.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn primary_detection() {
        assert!(PointerEvent::down(0.0, 0.0).is_primary());
        assert!(!PointerEvent::moved(0.0, 0.0).is_primary());
        let right = PointerEvent::new(PointerEventKind::Down(PointerButton::Secondary), 0.0, 0.0);
        assert!(!right.is_primary());
    }
}
