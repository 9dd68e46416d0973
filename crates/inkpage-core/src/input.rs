//! Pointer input normalization: pressure, palm rejection and pan detection.

use crate::stroke::DEFAULT_PRESSURE;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One raw pointer event as delivered by the host.
///
/// Optional fields are absent when the device does not report them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pointer_id: i64,
    /// Position in client (page) coordinates.
    pub client: Point,
    /// Reported pressure, `None` when unsupported.
    pub pressure: Option<f64>,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub pointer_type: PointerType,
    /// Contact geometry (width, height) in CSS pixels.
    pub contact: Option<Size>,
}

impl PointerSample {
    /// Create a primary-button mouse sample with no pressure data.
    pub fn new(pointer_id: i64, client: Point) -> Self {
        Self {
            pointer_id,
            client,
            pressure: None,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
            pointer_type: PointerType::Mouse,
            contact: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn with_contact(mut self, contact: Size) -> Self {
        self.contact = Some(contact);
        self
    }
}

/// Pointer event type for unified mouse/pen/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    /// Pointer left the canvas; finishes an active gesture like `Up`.
    Leave(PointerSample),
    /// Gesture interrupted by the platform; finishes like `Up`.
    Cancel(PointerSample),
}

impl PointerEvent {
    pub fn sample(&self) -> &PointerSample {
        match self {
            PointerEvent::Down(s)
            | PointerEvent::Move(s)
            | PointerEvent::Up(s)
            | PointerEvent::Leave(s)
            | PointerEvent::Cancel(s) => s,
        }
    }
}

/// Scale reported pressure by `sensitivity`.
///
/// Missing or zero pressure (mouse, some touch screens) becomes
/// [`DEFAULT_PRESSURE`] before scaling. The result is clamped to `[0, 1]`.
pub fn normalize_pressure(reported: Option<f64>, sensitivity: f64) -> f64 {
    let raw = match reported {
        Some(p) if p > 0.0 && p.is_finite() => p,
        _ => DEFAULT_PRESSURE,
    };
    (raw * sensitivity).clamp(0.0, 1.0)
}

/// Heuristic palm detection from contact geometry.
///
/// A touch whose contact is wider or taller than `threshold` is treated as a
/// resting palm. Only touch events with contact data can match.
pub fn is_palm(sample: &PointerSample, threshold: f64) -> bool {
    if sample.pointer_type != PointerType::Touch {
        return false;
    }
    sample
        .contact
        .is_some_and(|c| c.width > threshold || c.height > threshold)
}

/// Middle button, or primary button with Alt held, pans the view.
pub fn is_pan_trigger(sample: &PointerSample) -> bool {
    match sample.button {
        PointerButton::Middle => true,
        PointerButton::Primary => sample.modifiers.alt,
        PointerButton::Secondary => false,
    }
}
