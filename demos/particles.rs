//! Particles Example - Scroll-driven page in the terminal
//!
//! This example drives a small virtual page through a `Stage`:
//! - A hero with a drifting particle field and a parallax title
//! - A themed section whose lines reveal with a stagger when scrolled into view
//! - Faint sweep lines crossing the section, each starting two seconds later
//!
//! Scroll with the mouse wheel or the arrow keys; move the mouse for pointer
//! parallax. `q` or `Esc` quits. Debug logs go to `particles.log`.
//!
//! Run with: cargo run --example particles
//! Custom palette: cargo run --example particles -- "#14b8a6" "#5eead4" "#0f766e1a"

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use reveal_motion::{
    theme, ChildSpec, FieldId, FrameOutput, Keyframes, LayerDrive, LayerId, LoopClock, LoopTrack,
    ParallaxLayer, ParticleFieldConfig, Rect, RegionId, RegionOptions, Rgba, SectionSpec,
    SectionTheme, Stage, Timeline, Viewport,
};

/// Virtual pixels per terminal cell.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;
const SCROLL_STEP: f64 = 48.0;
const SWEEP_PERIOD: f64 = 8.0;
const SWEEP: &str = "────────────────";

const LINES: [&str; 3] = [
    "Every style is a function of scroll, pointer and clock.",
    "Sections reveal their children one after another.",
    "Particles drift forever and are dropped with their section.",
];

struct Page {
    stage: Stage,
    hero: Rect,
    section: Rect,
    section_id: RegionId,
    title: LayerId,
    sweeps: Vec<LayerId>,
    theme: SectionTheme,
    field_hosts: HashMap<FieldId, Rect>,
    height: f64,
}

fn build_page(cols: u16, rows: u16, theme: SectionTheme) -> reveal_motion::Result<Page> {
    let width = cols as f64 * CELL_W;
    let height = rows as f64 * CELL_H;
    let mut stage = Stage::new(Viewport::new(width, height));

    let hero = Rect::new(0.0, 0.0, width, height);
    let section = Rect::new(0.0, height * 1.5, width, height);

    let hero_field = stage.mount_field(ParticleFieldConfig::drifting(60, Rgba::WHITE))?;
    let title = stage.add_layer(
        ParallaxLayer::new()
            .drive(LayerDrive::Scroll { factor: 0.5 })
            .drive(LayerDrive::Pointer { strength: -40.0 }),
    );

    let timeline = Timeline::new(0.2).children(ChildSpec::fade_in_left(80.0), LINES.len());
    let section_id = stage.mount_section(
        SectionSpec::new(RegionOptions::section(0.25), timeline)
            .with_geometry(section)
            .with_theme(&theme, 40, true),
    )?;

    let sweeps = (0..3)
        .map(|i| {
            let track = LoopTrack::new(
                Keyframes::sweep(-width, width),
                LoopClock::delayed(SWEEP_PERIOD, i as f64 * 2.0),
            );
            stage.add_layer(ParallaxLayer::new().drive(LayerDrive::Sweep { track }))
        })
        .collect();

    let mut field_hosts = HashMap::new();
    field_hosts.insert(hero_field, hero);
    if let Some(field) = stage.section_field(section_id) {
        field_hosts.insert(field, section);
    }

    Ok(Page {
        stage,
        hero,
        section,
        section_id,
        title,
        sweeps,
        theme,
        field_hosts,
        height: section.bottom() + height * 0.5,
    })
}

fn color(c: Rgba, opacity: f64) -> Color {
    let c = Rgba::lerp(Rgba::BLACK, c, opacity.clamp(0.0, 1.0) as f32);
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn glyph(size: f64) -> char {
    if size < 2.0 {
        '·'
    } else if size < 3.0 {
        '•'
    } else {
        '●'
    }
}

fn paint(out: &mut impl Write, page: &Page, frame: &FrameOutput, scroll: f64, cols: u16, rows: u16) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    let to_cell = |x: f64, y: f64| -> Option<(u16, u16)> {
        let col = (x / CELL_W).floor();
        let row = ((y - scroll) / CELL_H).floor();
        if col < 0.0 || row < 0.0 || col >= cols as f64 || row >= rows as f64 {
            return None;
        }
        Some((col as u16, row as u16))
    };

    for field in &frame.fields {
        let Some(host) = page.field_hosts.get(&field.id) else {
            continue;
        };
        for v in &field.visuals {
            let x = host.x + v.origin.x / 100.0 * host.width + v.offset.x;
            let y = host.y + v.origin.y / 100.0 * host.height + v.offset.y;
            if let Some((col, row)) = to_cell(x, y) {
                queue!(
                    out,
                    MoveTo(col, row),
                    SetForegroundColor(color(v.color, v.opacity)),
                    Print(glyph(v.size))
                )?;
            }
        }
    }

    if let Some(layer) = frame.layer(page.title) {
        let t = layer.transform;
        let x = page.hero.width / 2.0 - 80.0 + t.translate_x;
        let y = page.hero.height / 3.0 + t.translate_y;
        if let Some((col, row)) = to_cell(x, y) {
            queue!(
                out,
                MoveTo(col, row),
                SetForegroundColor(color(theme::amber().accent, t.opacity)),
                Print("reveal-motion")
            )?;
        }
    }

    for (i, id) in page.sweeps.iter().enumerate() {
        let Some(layer) = frame.layer(*id) else {
            continue;
        };
        let y = page.section.top() + page.section.height * (i as f64 + 1.0) / 4.0;
        if let Some((col, row)) = to_cell(layer.transform.translate_x, y) {
            queue!(
                out,
                MoveTo(col, row),
                SetForegroundColor(color(page.theme.line, 0.35)),
                Print(SWEEP)
            )?;
        }
    }

    if let Some(region) = frame.region(page.section_id) {
        for (i, (line, t)) in LINES.iter().zip(&region.children).enumerate() {
            let x = 4.0 * CELL_W + t.translate_x;
            let y = page.section.top() + (i as f64 + 2.0) * CELL_H * 2.0 + t.translate_y;
            if let Some((col, row)) = to_cell(x.max(0.0), y) {
                queue!(
                    out,
                    MoveTo(col, row),
                    SetForegroundColor(color(Rgba::WHITE, t.opacity)),
                    Print(line)
                )?;
            }
        }
        queue!(
            out,
            MoveTo(0, rows.saturating_sub(1)),
            ResetColor,
            Print(format!(
                "scroll {:>5.0}px  section {:?}  in view {}  particles {}",
                scroll,
                region.state,
                region.in_view,
                frame.particle_count()
            ))
        )?;
    }

    out.flush()
}

fn run(page: &mut Page, cols: u16, rows: u16) -> io::Result<()> {
    let mut out = stdout();
    let started = Instant::now();
    let max_scroll = (page.height - rows as f64 * CELL_H).max(0.0);
    let mut scroll = 0.0_f64;

    loop {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down => scroll += SCROLL_STEP,
                    KeyCode::Up => scroll -= SCROLL_STEP,
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => scroll += SCROLL_STEP,
                    MouseEventKind::ScrollUp => scroll -= SCROLL_STEP,
                    MouseEventKind::Moved => page.stage.signals_mut().push_pointer_px(
                        mouse.column as f64 * CELL_W,
                        mouse.row as f64 * CELL_H,
                    ),
                    _ => {}
                },
                _ => {}
            }
            scroll = scroll.clamp(0.0, max_scroll);
            page.stage.signals_mut().push_scroll(scroll);
        }

        let frame = page.stage.tick(started.elapsed().as_secs_f64());
        paint(&mut out, page, &frame, scroll, cols, rows)?;
        std::thread::sleep(Duration::from_millis(16));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = File::create("particles.log")?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(log))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let theme = match args.as_slice() {
        [particle, accent, line] => SectionTheme::from_hex("custom", particle, accent, line)?,
        _ => theme::burgundy(),
    };

    let (cols, rows) = crossterm::terminal::size()?;
    let mut page = build_page(cols, rows, theme)?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(&mut page, cols, rows);

    execute!(stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    page.stage.unmount_section(page.section_id);
    result?;
    Ok(())
}
