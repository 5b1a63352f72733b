//! ISR-debounced push-button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up. GPIO fires on
//! falling edge; the ISR records the raw timestamp into an atomic, and the
//! `tick()` method (called from the main loop every pass) runs the
//! debounce state machine.
//!
//! A falling edge starts a 50 ms debounce window.  Edges inside the window
//! are contact bounce and are absorbed.  When the window closes the line
//! must still read pressed; otherwise the edge was release bounce and is
//! discarded.  Each physical press therefore yields exactly one
//! [`ButtonEvent::Press`].

use core::sync::atomic::{AtomicU32, Ordering};

const DEBOUNCE_MS: u32 = 50;

/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
/// Written by the ISR, read by the main loop.
static BUTTON_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Settling { since_ms: u32 },
}

pub struct ButtonDriver {
    // Only sampled on the node; the simulator has no line to read.
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
    state: DebounceState,
    last_isr_ms: u32,
}

impl ButtonDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: DebounceState::Idle,
            last_isr_ms: 0,
        }
    }

    /// Call from the main loop on every pass.
    /// `now_ms` is the current monotonic time in milliseconds.
    pub fn tick(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let isr_ms = BUTTON_ISR_TIMESTAMP.load(Ordering::Acquire);
        self.step(isr_ms, now_ms, self.is_pressed_hw())
    }

    /// Debounce step for an explicit edge timestamp and line level.
    ///
    /// `isr_ms` is the latest falling-edge timestamp (0 = never);
    /// `pressed` is the line level at `now_ms`.
    pub fn step(&mut self, isr_ms: u32, now_ms: u32, pressed: bool) -> Option<ButtonEvent> {
        let new_edge = isr_ms != 0 && isr_ms != self.last_isr_ms;
        if new_edge {
            self.last_isr_ms = isr_ms;
        }

        match self.state {
            DebounceState::Idle => {
                if new_edge {
                    self.state = DebounceState::Settling { since_ms: isr_ms };
                }
                None
            }

            DebounceState::Settling { since_ms } => {
                if now_ms.wrapping_sub(since_ms) < DEBOUNCE_MS {
                    return None;
                }
                self.state = DebounceState::Idle;
                pressed.then_some(ButtonEvent::Press)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn is_pressed_hw(&self) -> bool {
        !crate::drivers::hw_init::gpio_read(self.gpio)
    }

    // The simulator only injects presses, never release bounce.
    #[cfg(not(target_os = "espidf"))]
    fn is_pressed_hw(&self) -> bool {
        true
    }
}

/// ISR handler, registered on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
/// Timestamp 0 is reserved for "no edge yet" and is nudged to 1.
pub fn button_isr_handler(now_ms: u32) {
    BUTTON_ISR_TIMESTAMP.store(now_ms.max(1), Ordering::Release);
}
