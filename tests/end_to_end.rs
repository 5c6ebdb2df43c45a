//! End-to-end scenarios for the frame pipeline.
//!
//! Drives a small landing page (hero field, two themed sections) through
//! scroll, pointer and unmount sequences the way a host page would.
//!
//! Run with: cargo test --test end_to_end

use reveal_motion::motion::Easing;
use reveal_motion::particles::{FieldState, ParticleField, ParticleFieldConfig, SeededRandom};
use reveal_motion::pipeline::{LayerDrive, ParallaxLayer, SectionSpec, Stage};
use reveal_motion::reveal::{ChildSpec, RevealSequencer, SequenceState, Timeline};
use reveal_motion::state::Viewport;
use reveal_motion::theme;
use reveal_motion::types::{Rect, Rgba};
use reveal_motion::viewport::{visible_fraction, IntersectionTracker, RegionOptions};

const VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// PARTICLE DISPOSAL
// =============================================================================

#[test]
fn test_disposed_field_issues_no_updates() {
    let config = ParticleFieldConfig {
        quantity: 15,
        stationary: false,
        ..Default::default()
    };
    let mut field = ParticleField::new(config, &mut SeededRandom::new(15)).unwrap();
    field.start(0.0);

    for frame in 0..120 {
        let visuals = field.frame(frame as f64 / 60.0).unwrap();
        assert_eq!(visuals.len(), 15);
    }
    assert_eq!(field.updates_issued(), 120);

    field.dispose();
    for frame in 120..240 {
        assert!(field.frame(frame as f64 / 60.0).is_none());
    }
    assert_eq!(field.state(), FieldState::Disposed);
    assert_eq!(field.updates_issued(), 120);
    assert!(field.is_empty());
}

#[test]
fn test_unmounted_section_stops_its_field() {
    let mut stage = Stage::with_seed(VIEWPORT, 15);
    let spec = SectionSpec::new(RegionOptions::section(0.25), Timeline::default())
        .with_geometry(Rect::new(0.0, 0.0, 1000.0, 800.0))
        .with_particles(ParticleFieldConfig::drifting(15, Rgba::WHITE));
    let id = stage.mount_section(spec).unwrap();
    let field = stage.section_field(id).unwrap();

    for frame in 0..30 {
        let out = stage.tick(frame as f64 / 60.0);
        assert_eq!(out.field(field).unwrap().visuals.len(), 15);
    }

    stage.unmount_section(id);
    assert!(stage.field(field).is_none());
    for frame in 30..60 {
        let out = stage.tick(frame as f64 / 60.0);
        assert!(out.fields.is_empty());
        assert!(out.regions.is_empty());
    }
}

// =============================================================================
// INTERSECTION
// =============================================================================

#[test]
fn test_fraction_sequence_retriggerable_and_once() {
    let fractions = [0.0, 0.05, 0.3, 0.6, 0.3, 0.05, 0.0];
    let mut tracker = IntersectionTracker::new();
    let again = tracker.mount(RegionOptions::section(0.25));
    let once = tracker.mount(RegionOptions::section(0.25).with_trigger_once(true));

    let mut again_seq = Vec::new();
    let mut once_seq = Vec::new();
    for f in fractions {
        tracker.observe(again, f);
        tracker.observe(once, f);
        again_seq.push(tracker.is_in_view(again));
        once_seq.push(tracker.is_in_view(once));
    }

    assert_eq!(again_seq, [false, false, false, true, true, false, false]);
    assert_eq!(once_seq, [false, false, false, true, true, true, true]);
}

#[test]
fn test_tall_region_uses_fraction_of_viewport() {
    let tall = Some(Rect::new(0.0, 1000.0, 1000.0, 3000.0));
    assert_eq!(visible_fraction(tall, 0.0, &VIEWPORT, 0.0), 0.0);
    assert!(close(visible_fraction(tall, 500.0, &VIEWPORT, 0.0), 0.375));
    assert_eq!(visible_fraction(tall, 1000.0, &VIEWPORT, 0.0), 1.0);
    assert_eq!(visible_fraction(tall, 2500.0, &VIEWPORT, 0.0), 1.0);
}

#[test]
fn test_reveal_once_block_with_margin() {
    let mut stage = Stage::with_seed(VIEWPORT, 1);
    let timeline = Timeline::new(0.1).child(ChildSpec::fade_in_up(30.0));
    let id = stage
        .mount_section(
            SectionSpec::new(RegionOptions::once(100.0), timeline)
                .with_geometry(Rect::new(0.0, 1000.0, 1000.0, 400.0)),
        )
        .unwrap();

    // Viewport bottom at 1050, shrunk to 950: nothing visible yet
    stage.signals_mut().push_scroll(250.0);
    assert!(!stage.tick(0.0).region(id).unwrap().in_view);

    stage.signals_mut().push_scroll(350.0);
    assert!(stage.tick(0.1).region(id).unwrap().in_view);

    // Latched: scrolling back up neither hides nor replays it
    stage.signals_mut().push_scroll(0.0);
    let out = stage.tick(2.0);
    let region = out.region(id).unwrap();
    assert!(region.in_view);
    assert_eq!(region.state, SequenceState::Settled);
    assert_eq!(stage.sequencer(id).unwrap().instance(), 1);
}

// =============================================================================
// REVEAL
// =============================================================================

#[test]
fn test_three_child_windows() {
    let timeline = Timeline::new(0.2).children(
        ChildSpec::fade_in_left(50.0)
            .with_duration(0.8)
            .with_easing(Easing::EXPO_OUT),
        3,
    );
    for i in 0..3 {
        let (start, end) = timeline.child_window(i).unwrap();
        assert!(close(start, 0.2 * i as f64));
        assert!(close(end, 0.2 * i as f64 + 0.8));
    }
    assert!(close(timeline.total_duration(), 1.2));

    let mut seq = RevealSequencer::new(timeline);
    seq.trigger(0.0);
    let mut settled_at = None;
    for frame in 0..=150 {
        let t = frame as f64 / 100.0;
        if seq.advance(t) == SequenceState::Settled {
            settled_at = Some(t);
            break;
        }
    }
    assert_eq!(settled_at, Some(1.2));
}

// =============================================================================
// LANDING PAGE
// =============================================================================

#[test]
fn test_landing_page_scroll_through() {
    let mut stage = Stage::with_seed(VIEWPORT, 7);

    let hero_field = stage
        .mount_field(ParticleFieldConfig::drifting(100, Rgba::WHITE))
        .unwrap();
    let hero_bg = stage.add_layer(ParallaxLayer::new().drive(LayerDrive::ScrollScale { rate: 0.0005 }));

    let reveal = Timeline::new(0.2).children(ChildSpec::fade_in_up(30.0), 4);
    let amber = stage
        .mount_section(
            SectionSpec::new(RegionOptions::section(0.25), reveal.clone())
                .with_geometry(Rect::new(0.0, 800.0, 1000.0, 900.0))
                .with_theme(&theme::amber(), 50, false),
        )
        .unwrap();
    let burgundy = stage
        .mount_section(
            SectionSpec::new(RegionOptions::section(0.25), reveal)
                .with_geometry(Rect::new(0.0, 1700.0, 1000.0, 900.0))
                .with_theme(&theme::burgundy(), 50, true),
        )
        .unwrap();

    let out = stage.tick(0.0);
    assert_eq!(out.field(hero_field).unwrap().visuals.len(), 100);
    assert_eq!(out.particle_count(), 200);
    assert_eq!(out.layer(hero_bg).unwrap().transform.scale, 1.0);
    assert_eq!(out.region(amber).unwrap().state, SequenceState::Idle);

    // Amber in view, burgundy not yet
    stage.signals_mut().push_scroll(1000.0);
    let out = stage.tick(1.0);
    assert_eq!(out.layer(hero_bg).unwrap().transform.scale, 1.5);
    assert_eq!(out.region(amber).unwrap().state, SequenceState::Playing);
    assert_eq!(out.region(burgundy).unwrap().state, SequenceState::Idle);

    // Both in view, amber settled
    stage.signals_mut().push_scroll(1400.0);
    let out = stage.tick(3.0);
    assert_eq!(out.region(amber).unwrap().state, SequenceState::Settled);
    assert_eq!(out.region(burgundy).unwrap().state, SequenceState::Playing);

    // Burgundy particles never move
    let burgundy_field = stage.section_field(burgundy).unwrap();
    for v in &out.field(burgundy_field).unwrap().visuals {
        assert_eq!(v.offset.x, 0.0);
        assert_eq!(v.offset.y, 0.0);
        assert_eq!(v.color, theme::burgundy().particle);
    }

    // Back to the top: both exit and hide again
    stage.signals_mut().push_scroll(0.0);
    let out = stage.tick(4.0);
    for id in [amber, burgundy] {
        let region = out.region(id).unwrap();
        assert!(!region.in_view);
        assert_eq!(region.state, SequenceState::Idle);
        assert!(region.children.iter().all(|t| t.opacity == 0.0));
    }
}
