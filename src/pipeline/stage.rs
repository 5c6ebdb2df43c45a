//! Stage - The per-frame driver.
//!
//! A stage owns the signal bus, the intersection tracker, one reveal
//! sequencer per mounted section, the particle fields and the parallax
//! layers. The host calls [`Stage::tick`] once per animation frame and
//! paints the returned [`FrameOutput`].
//!
//! # Frame order
//!
//! ```text
//! sample signals → tracker update → sequencers → parallax layers → particle fields
//! ```
//!
//! Transitions computed by the tracker in a frame are consumed by the
//! sequencers in that same frame, before any styles are produced.
//!
//! # Example
//!
//! ```ignore
//! use reveal_motion::pipeline::{SectionSpec, Stage};
//! use reveal_motion::reveal::{ChildSpec, Timeline};
//! use reveal_motion::viewport::RegionOptions;
//!
//! let mut stage = Stage::new(Viewport::new(1280.0, 720.0));
//! let about = stage.mount_section(
//!     SectionSpec::new(
//!         RegionOptions::section(0.25),
//!         Timeline::new(0.2).children(ChildSpec::fade_in_up(30.0), 3),
//!     )
//!     .with_geometry(Rect::new(0.0, 900.0, 1280.0, 700.0)),
//! )?;
//!
//! // Scroll handler
//! stage.signals_mut().push_scroll(window_scroll_y);
//!
//! // Animation frame
//! let frame = stage.tick(now);
//! paint(&frame);
//!
//! // Section leaves the page
//! stage.unmount_section(about);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::layer::ParallaxLayer;
use crate::error::Result;
use crate::particles::{
    ParticleField, ParticleFieldConfig, ParticleVisual, RandomSource, SeededRandom, ThreadRandom,
};
use crate::reveal::{RevealSequencer, SequenceState, Timeline};
use crate::state::{SignalBus, SignalReader, Viewport};
use crate::theme::SectionTheme;
use crate::types::{Rect, StyleChannels, Transform};
use crate::viewport::{IntersectionTracker, RegionId, RegionOptions};

// =============================================================================
// IDS
// =============================================================================

/// Handle to a mounted particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Handle to a mounted parallax layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

// =============================================================================
// SECTION SPEC
// =============================================================================

/// Everything one page section animates.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub options: RegionOptions,
    pub geometry: Option<Rect>,
    pub timeline: Timeline,
    /// Background particle field, disposed with the section
    pub particles: Option<ParticleFieldConfig>,
    /// Decorative layers, removed with the section
    pub layers: Vec<ParallaxLayer>,
}

impl SectionSpec {
    pub fn new(options: RegionOptions, timeline: Timeline) -> Self {
        Self {
            options,
            geometry: None,
            timeline,
            particles: None,
            layers: Vec::new(),
        }
    }

    pub fn with_geometry(mut self, rect: Rect) -> Self {
        self.geometry = Some(rect);
        self
    }

    pub fn with_particles(mut self, config: ParticleFieldConfig) -> Self {
        self.particles = Some(config);
        self
    }

    /// Particle background in `theme`'s colors.
    pub fn with_theme(self, theme: &SectionTheme, quantity: usize, stationary: bool) -> Self {
        self.with_particles(theme.particles(quantity, stationary))
    }

    pub fn with_layer(mut self, layer: ParallaxLayer) -> Self {
        self.layers.push(layer);
        self
    }
}

// =============================================================================
// FRAME OUTPUT
// =============================================================================

/// Reveal styles of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFrame {
    pub id: RegionId,
    pub in_view: bool,
    pub state: SequenceState,
    /// One style per timeline child, in order
    pub children: Vec<Transform>,
    /// Channels any child animates
    pub channels: StyleChannels,
}

/// Style of one parallax layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerFrame {
    pub id: LayerId,
    pub transform: Transform,
    pub channels: StyleChannels,
}

/// Particle visuals of one running field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFrame {
    pub id: FieldId,
    pub visuals: Vec<ParticleVisual>,
}

/// Everything the render surface paints for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub clock: f64,
    pub regions: Vec<RegionFrame>,
    pub layers: Vec<LayerFrame>,
    pub fields: Vec<FieldFrame>,
}

impl FrameOutput {
    pub fn region(&self, id: RegionId) -> Option<&RegionFrame> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerFrame> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldFrame> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Total particle visuals across every field.
    pub fn particle_count(&self) -> usize {
        self.fields.iter().map(|f| f.visuals.len()).sum()
    }
}

// =============================================================================
// STAGE
// =============================================================================

struct Section {
    sequencer: RevealSequencer,
    channels: StyleChannels,
    field: Option<FieldId>,
    layers: Vec<LayerId>,
}

/// Owner of every animated thing on a page.
pub struct Stage {
    bus: SignalBus,
    tracker: IntersectionTracker,
    sections: BTreeMap<RegionId, Section>,
    fields: BTreeMap<FieldId, ParticleField>,
    layers: BTreeMap<LayerId, ParallaxLayer>,
    next_field: u32,
    next_layer: u32,
    rng: Box<dyn RandomSource>,
}

impl Stage {
    /// Stage whose particle fields differ on every run.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_random(viewport, Box::new(ThreadRandom::new()))
    }

    /// Stage generating particle fields from `rng`.
    pub fn with_random(viewport: Viewport, rng: Box<dyn RandomSource>) -> Self {
        Self {
            bus: SignalBus::new(viewport),
            tracker: IntersectionTracker::new(),
            sections: BTreeMap::new(),
            fields: BTreeMap::new(),
            layers: BTreeMap::new(),
            next_field: 0,
            next_layer: 0,
            rng,
        }
    }

    /// Deterministic stage for tests and recordings.
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::with_random(viewport, Box::new(SeededRandom::new(seed)))
    }

    // -------------------------------------------------------------------------
    // Signals
    // -------------------------------------------------------------------------

    /// Inbound event sink.
    pub fn signals_mut(&mut self) -> &mut SignalBus {
        &mut self.bus
    }

    pub fn signals(&self) -> &SignalBus {
        &self.bus
    }

    pub fn reader(&self) -> SignalReader {
        self.bus.reader()
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Mount a section: tracked region, reveal sequencer, optional particle
    /// field and layers.
    ///
    /// Nothing is mounted if any part of `spec` fails validation.
    pub fn mount_section(&mut self, spec: SectionSpec) -> Result<RegionId> {
        spec.options.validate()?;
        spec.timeline.validate()?;

        let field = match spec.particles {
            Some(config) => Some(ParticleField::new(config, self.rng.as_mut())?),
            None => None,
        };

        let id = self.tracker.mount(spec.options);
        self.tracker.set_geometry(id, spec.geometry);

        let field = field.map(|f| self.insert_field(f));
        let layers = spec
            .layers
            .into_iter()
            .map(|mut layer| {
                layer.attach(id);
                self.insert_layer(layer)
            })
            .collect();

        debug!(region = %id, children = spec.timeline.len(), "section mounted");
        self.sections.insert(
            id,
            Section {
                channels: spec.timeline.channels(),
                sequencer: RevealSequencer::new(spec.timeline),
                field,
                layers,
            },
        );
        Ok(id)
    }

    /// Unmount a section, cancelling its reveal and disposing its field and
    /// layers. Returns `false` for an unknown id.
    pub fn unmount_section(&mut self, id: RegionId) -> bool {
        let Some(mut section) = self.sections.remove(&id) else {
            return false;
        };
        section.sequencer.cancel();
        if let Some(field) = section.field {
            self.dispose_field(field);
        }
        for layer in &section.layers {
            self.layers.remove(layer);
        }
        self.tracker.unmount(id);
        debug!(region = %id, "section unmounted");
        true
    }

    /// Update a section's document-space bounds (`None` = not laid out).
    pub fn set_geometry(&mut self, id: RegionId, rect: Option<Rect>) {
        self.tracker.set_geometry(id, rect);
    }

    pub fn sequencer(&self, id: RegionId) -> Option<&RevealSequencer> {
        self.sections.get(&id).map(|s| &s.sequencer)
    }

    /// Particle field owned by a section.
    pub fn section_field(&self, id: RegionId) -> Option<FieldId> {
        self.sections.get(&id).and_then(|s| s.field)
    }

    pub fn tracker(&self) -> &IntersectionTracker {
        &self.tracker
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    // -------------------------------------------------------------------------
    // Free-standing fields and layers
    // -------------------------------------------------------------------------

    /// Mount a particle field that belongs to no section and start it.
    pub fn mount_field(&mut self, config: ParticleFieldConfig) -> Result<FieldId> {
        let field = ParticleField::new(config, self.rng.as_mut())?;
        Ok(self.insert_field(field))
    }

    /// Dispose and forget a field. Returns `false` for an unknown id.
    pub fn dispose_field(&mut self, id: FieldId) -> bool {
        match self.fields.remove(&id) {
            Some(mut field) => {
                field.dispose();
                true
            }
            None => false,
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&ParticleField> {
        self.fields.get(&id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Add a layer that belongs to no section.
    pub fn add_layer(&mut self, layer: ParallaxLayer) -> LayerId {
        self.insert_layer(layer)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn insert_field(&mut self, mut field: ParticleField) -> FieldId {
        let id = FieldId(self.next_field);
        self.next_field += 1;
        field.start(self.bus.clock());
        self.fields.insert(id, field);
        id
    }

    fn insert_layer(&mut self, layer: ParallaxLayer) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(id, layer);
        id
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Run one frame at `now` (seconds) and return what to paint.
    pub fn tick(&mut self, now: f64) -> FrameOutput {
        let signals = self.bus.sample(now);
        let clock = signals.clock;

        // Tracker first: sequencers must see this frame's transitions
        let transitions = self.tracker.update(signals.scroll_y, &signals.viewport);
        for (id, transition) in transitions {
            if let Some(section) = self.sections.get_mut(&id) {
                section.sequencer.on_transition(transition, clock);
            }
        }

        let tracker = &self.tracker;
        let regions = self
            .sections
            .iter_mut()
            .map(|(&id, section)| {
                let state = section.sequencer.advance(clock);
                RegionFrame {
                    id,
                    in_view: tracker.is_in_view(id),
                    state,
                    children: section.sequencer.transforms(clock),
                    channels: section.channels,
                }
            })
            .collect();

        let layers = self
            .layers
            .iter()
            .map(|(&id, layer)| {
                let geometry = layer
                    .section()
                    .and_then(|s| tracker.region(s))
                    .and_then(|r| r.geometry());
                LayerFrame {
                    id,
                    transform: layer.transform(&signals, geometry),
                    channels: layer.channels(),
                }
            })
            .collect();

        let fields = self
            .fields
            .iter_mut()
            .filter_map(|(&id, field)| field.frame(clock).map(|visuals| FieldFrame { id, visuals }))
            .collect();

        FrameOutput {
            clock,
            regions,
            layers,
            fields,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
