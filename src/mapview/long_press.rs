//! Long-press gesture recognition on the map canvas.
//!
//! A long press fires once when the primary pointer is held down for at
//! least `timeout` seconds without moving more than `move_threshold`
//! pixels. Releasing earlier or moving further cancels it.

use super::MapView;
use eframe::egui::Pos2;

/// Default hold duration in seconds.
pub const DEFAULT_TIMEOUT: f64 = 0.5;
/// Default movement tolerance in pixels.
pub const DEFAULT_MOVE_THRESHOLD: f32 = 5.0;

/// Primary pointer state at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Seconds since an arbitrary epoch (egui input time).
    pub time: f64,
    pub pos: Option<Pos2>,
    pub down: bool,
}

/// A recognized long press at a canvas position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPressEvent {
    pub pos: Pos2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    Pressing { origin: Pos2, since: f64 },
    /// Fired or cancelled; waits for release.
    Done,
}

pub type LongPressCallback = Box<dyn FnMut(&MapView, LongPressEvent)>;

pub struct LongPressHandler {
    pub timeout: f64,
    pub move_threshold: f32,
    state: PressState,
    callback: LongPressCallback,
}

impl LongPressHandler {
    pub fn new(callback: impl FnMut(&MapView, LongPressEvent) + 'static) -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            move_threshold: DEFAULT_MOVE_THRESHOLD,
            state: PressState::Idle,
            callback: Box::new(callback),
        }
    }

    /// Whether a press is currently being timed.
    pub fn is_pressing(&self) -> bool {
        matches!(self.state, PressState::Pressing { .. })
    }

    /// Feeds a pointer sample and invokes the callback if it completes a
    /// long press.
    pub fn on_pointer(&mut self, map_view: &MapView, sample: PointerSample) {
        if let Some(event) = self.recognize(sample) {
            (self.callback)(map_view, event);
        }
    }

    fn recognize(&mut self, sample: PointerSample) -> Option<LongPressEvent> {
        match (self.state, sample.down, sample.pos) {
            (_, false, _) => {
                self.state = PressState::Idle;
                None
            }
            (PressState::Idle, true, Some(pos)) => {
                self.state = PressState::Pressing {
                    origin: pos,
                    since: sample.time,
                };
                None
            }
            (PressState::Pressing { origin, since }, true, pos) => {
                let moved = pos.is_none_or(|p| p.distance(origin) > self.move_threshold);
                if moved {
                    self.state = PressState::Done;
                    None
                } else if sample.time - since >= self.timeout {
                    self.state = PressState::Done;
                    Some(LongPressEvent { pos: origin })
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, x: f32, down: bool) -> PointerSample {
        PointerSample {
            time,
            pos: Some(Pos2::new(x, 10.0)),
            down,
        }
    }

    fn handler() -> LongPressHandler {
        LongPressHandler::new(|_, _| {})
    }

    #[test]
    fn test_fires_after_timeout() {
        let mut h = handler();
        assert_eq!(h.recognize(sample(0.0, 10.0, true)), None);
        assert!(h.is_pressing());
        assert_eq!(h.recognize(sample(0.3, 10.0, true)), None);
        assert_eq!(
            h.recognize(sample(0.5, 12.0, true)),
            Some(LongPressEvent {
                pos: Pos2::new(10.0, 10.0)
            })
        );
    }

    #[test]
    fn test_fires_once_per_press() {
        let mut h = handler();
        h.recognize(sample(0.0, 10.0, true));
        assert!(h.recognize(sample(0.6, 10.0, true)).is_some());
        assert!(h.recognize(sample(1.2, 10.0, true)).is_none());

        h.recognize(sample(1.3, 10.0, false));
        h.recognize(sample(1.4, 10.0, true));
        assert!(h.recognize(sample(2.0, 10.0, true)).is_some());
    }

    #[test]
    fn test_release_cancels() {
        let mut h = handler();
        h.recognize(sample(0.0, 10.0, true));
        h.recognize(sample(0.2, 10.0, false));
        assert!(!h.is_pressing());
        assert!(h.recognize(sample(0.6, 10.0, true)).is_none());
    }

    #[test]
    fn test_movement_cancels() {
        let mut h = handler();
        h.recognize(sample(0.0, 10.0, true));
        assert!(h.recognize(sample(0.1, 30.0, true)).is_none());
        assert!(h.recognize(sample(0.7, 10.0, true)).is_none());
    }
}
