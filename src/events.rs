//! Interrupt-driven event queue.
//!
//! Events are produced by:
//! - the button GPIO edge (via the debounced [`ButtonDriver`](crate::drivers::button::ButtonDriver))
//! - sensor cadence timers (via the [`SensorScheduler`](crate::scheduler::SensorScheduler))
//!
//! and consumed by the main loop, which hands each one to
//! [`NodeService::handle`](crate::app::service::NodeService::handle) in FIFO
//! order.  Handlers run to completion; nothing is preempted.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button edge │────▶│              │     │              │
//! │ Accel timer │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Baro timer  │────▶│  (lock-free) │     │  (consumer)  │
//! │ Batt timer  │────▶│              │     │              │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use crate::app::inputs::NodeInput;

/// Maximum number of pending events (one slot is kept free).
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Producers write, main loop reads.  Slots are atomics so the ring needs
// no `static mut`; head/tail carry the SPSC ordering.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
static EVENT_BUFFER: [AtomicU8; EVENT_QUEUE_CAP] = [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR / timer-task context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: NodeInput) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full, drop event.
    }

    EVENT_BUFFER[head as usize].store(event.code(), Ordering::Relaxed);
    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<NodeInput> {
    loop {
        let tail = EVENT_TAIL.load(Ordering::Relaxed);
        let head = EVENT_HEAD.load(Ordering::Acquire);

        if tail == head {
            return None; // Empty.
        }

        let raw = EVENT_BUFFER[tail as usize].load(Ordering::Relaxed);
        EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

        // Unknown codes cannot be produced by `push_event`; skip if seen.
        if let Some(event) = NodeInput::from_code(raw) {
            return Some(event);
        }
    }
}

/// Drain all pending events into a callback.
/// Processes events in FIFO order.
pub fn drain_events(mut handler: impl FnMut(NodeInput)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}
