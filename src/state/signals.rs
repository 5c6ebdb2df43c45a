//! Signal Bus - Single-writer store for scroll, pointer and clock.
//!
//! The bus owns three reactive signals and is the only thing that ever
//! writes them. Environment events (scroll, pointer move, resize) are
//! staged as they arrive; [`SignalBus::sample`] commits the latest staged
//! value of each signal once per frame, so a burst of a hundred scroll
//! events costs one signal write.
//!
//! # Example
//!
//! ```ignore
//! use reveal_motion::state::{SignalBus, Viewport};
//!
//! let mut bus = SignalBus::new(Viewport::new(1280.0, 720.0));
//!
//! // Event handlers
//! bus.push_scroll(420.0);
//! bus.push_pointer_px(640.0, 360.0);
//!
//! // Animation frame
//! bus.sample(0.016);
//! let frame = bus.snapshot();
//! assert_eq!(frame.scroll_y, 420.0);
//! ```

use spark_signals::{derived, signal, Signal};
use tracing::trace;

use super::viewport::Viewport;
use crate::motion::mapper;
use crate::types::{Pointer, Vec2};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Plain copy of every signal for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSnapshot {
    /// Document scroll offset in pixels (may be negative during overscroll)
    pub scroll_y: f64,
    /// Normalized pointer position
    pub pointer: Pointer,
    /// Monotonic clock in seconds
    pub clock: f64,
    /// Visible window size
    pub viewport: Viewport,
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            pointer: Pointer::CENTER,
            clock: 0.0,
            viewport: Viewport::default(),
        }
    }
}

// =============================================================================
// STAGED EVENTS
// =============================================================================

#[derive(Debug, Default)]
struct Staged {
    scroll_y: Option<f64>,
    pointer: Option<Pointer>,
    viewport: Option<Viewport>,
}

impl Staged {
    fn is_empty(&self) -> bool {
        self.scroll_y.is_none() && self.pointer.is_none() && self.viewport.is_none()
    }
}

// =============================================================================
// SIGNAL BUS
// =============================================================================

/// Owner and sole writer of the environment signals.
pub struct SignalBus {
    scroll_y: Signal<f64>,
    pointer: Signal<Pointer>,
    clock: Signal<f64>,
    viewport: Signal<Viewport>,
    staged: Staged,
    frames: u64,
    commits: u64,
}

impl SignalBus {
    /// Create a bus with scroll 0, pointer centered and clock 0.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scroll_y: signal(0.0),
            pointer: signal(Pointer::CENTER),
            clock: signal(0.0),
            viewport: signal(viewport),
            staged: Staged::default(),
            frames: 0,
            commits: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Inbound events
    // -------------------------------------------------------------------------

    /// Record a scroll event. Non-finite offsets are dropped.
    pub fn push_scroll(&mut self, scroll_y: f64) {
        if scroll_y.is_finite() {
            self.staged.scroll_y = Some(scroll_y);
        }
    }

    /// Record a pointer event in normalized coordinates.
    pub fn push_pointer(&mut self, pointer: Pointer) {
        self.staged.pointer = Some(Pointer::new(pointer.x, pointer.y));
    }

    /// Record a pointer event in viewport pixels.
    ///
    /// Normalized against the most recent viewport (staged or committed).
    pub fn push_pointer_px(&mut self, px: f64, py: f64) {
        let viewport = self.staged.viewport.unwrap_or_else(|| self.viewport.get());
        self.staged.pointer = Some(viewport.normalize_pointer(px, py));
    }

    /// Record a resize event.
    pub fn push_resize(&mut self, viewport: Viewport) {
        self.staged.viewport = Some(viewport);
    }

    // -------------------------------------------------------------------------
    // Frame sampling
    // -------------------------------------------------------------------------

    /// Commit staged events and advance the clock. Call once per frame.
    ///
    /// The clock never moves backwards; an earlier or non-finite `now`
    /// leaves it where it is.
    pub fn sample(&mut self, now: f64) -> SignalSnapshot {
        self.frames += 1;

        if !self.staged.is_empty() {
            let staged = std::mem::take(&mut self.staged);
            if let Some(viewport) = staged.viewport {
                self.viewport.set(viewport);
                self.commits += 1;
            }
            if let Some(scroll_y) = staged.scroll_y {
                self.scroll_y.set(scroll_y);
                self.commits += 1;
            }
            if let Some(pointer) = staged.pointer {
                self.pointer.set(pointer);
                self.commits += 1;
            }
        }

        if now.is_finite() && now > self.clock.get() {
            self.clock.set(now);
        }

        let snapshot = self.snapshot();
        trace!(
            frame = self.frames,
            scroll_y = snapshot.scroll_y,
            clock = snapshot.clock,
            "sampled signals"
        );
        snapshot
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer.get()
    }

    pub fn clock(&self) -> f64 {
        self.clock.get()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Copy of every committed signal.
    pub fn snapshot(&self) -> SignalSnapshot {
        SignalSnapshot {
            scroll_y: self.scroll_y.get(),
            pointer: self.pointer.get(),
            clock: self.clock.get(),
            viewport: self.viewport.get(),
        }
    }

    /// Read-only handle that can be handed to any number of consumers.
    pub fn reader(&self) -> SignalReader {
        SignalReader {
            scroll_y: self.scroll_y.clone(),
            pointer: self.pointer.clone(),
            clock: self.clock.clone(),
            viewport: self.viewport.clone(),
        }
    }

    /// Number of frames sampled so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of individual signal writes so far.
    pub fn commits(&self) -> u64 {
        self.commits
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

// =============================================================================
// READER
// =============================================================================

/// Read-only view of the bus signals.
///
/// Cloning is cheap; every clone observes the same underlying signals.
#[derive(Clone)]
pub struct SignalReader {
    scroll_y: Signal<f64>,
    pointer: Signal<Pointer>,
    clock: Signal<f64>,
    viewport: Signal<Viewport>,
}

impl SignalReader {
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer.get()
    }

    pub fn clock(&self) -> f64 {
        self.clock.get()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Reactive scroll parallax: recomputes whenever the scroll signal changes.
    pub fn derive_parallax(&self, factor: f64) -> DerivedValue<f64> {
        let scroll_y = self.scroll_y.clone();
        let parallax = derived(move || mapper::parallax_offset(scroll_y.get(), factor));
        DerivedValue::new(move || parallax.get())
    }

    /// Reactive pointer parallax: recomputes whenever the pointer signal changes.
    pub fn derive_pointer_offset(&self, strength: f64) -> DerivedValue<Vec2> {
        let pointer = self.pointer.clone();
        let offset = derived(move || mapper::pointer_offset(pointer.get(), strength));
        DerivedValue::new(move || offset.get())
    }
}

/// A value derived from bus signals, recomputed only when they change.
pub struct DerivedValue<T> {
    read: Box<dyn Fn() -> T>,
}

impl<T> DerivedValue<T> {
    fn new(read: impl Fn() -> T + 'static) -> Self {
        Self {
            read: Box::new(read),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        (self.read)()
    }
}

// =============================================================================
// TESTS
// =============================================================================
