use std::io;
use std::thread;
use std::time;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

use lifegrid::camera::Camera;
use lifegrid::grid::WrapMode;
use lifegrid::sim::RunState;
use lifegrid::sim::SimConfig;
use lifegrid::sim::Simulation;

const FRAMERATE: u32 = 15;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

/// Each cell flips a fair coin.
const RANDOM_DENSITY: f64 = 0.5;

enum Event {
    ToggleRun,
    Randomize,
    Clear,
    Fill,
    ToggleWrap,
    Grow,
    Shrink,
    Exit,
}

fn handle_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Some(Event::ToggleRun),
            KeyEvent {
                code: KeyCode::Char('r'),
                ..
            } => Some(Event::Randomize),
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => Some(Event::Clear),
            KeyEvent {
                code: KeyCode::Char('f'),
                ..
            } => Some(Event::Fill),
            KeyEvent {
                code: KeyCode::Char('w'),
                ..
            } => Some(Event::ToggleWrap),
            KeyEvent {
                code: KeyCode::Char('+' | '='),
                ..
            } => Some(Event::Grow),
            KeyEvent {
                code: KeyCode::Char('-'),
                ..
            } => Some(Event::Shrink),
            _ => None,
        },
        _ => None,
    }
}

/// Drop a glider near the origin so there is something to watch before the
/// first randomize.
fn seed_glider(sim: &mut Simulation) -> anyhow::Result<()> {
    for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        sim.set_cell(x, y, true).context("Failed to seed glider")?;
    }

    Ok(())
}

fn run(sim: &mut Simulation, cam: &mut Camera) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    loop {
        let t = time::SystemTime::now();

        // Poll event for as long as FRAMETIME
        let (dt, event) = if event::poll(FRAMETIME)? {
            let event = event::read()?;

            let event = handle_event(event);
            let dt = t.elapsed()?;

            (dt, event)
        } else {
            (Duration::ZERO, None)
        };

        match event {
            None => {}
            Some(Event::Exit) => break,
            Some(Event::ToggleRun) => {
                sim.toggle_run_state();
            }
            Some(Event::Randomize) => sim.randomize(RANDOM_DENSITY),
            Some(Event::Clear) => sim.clear(),
            Some(Event::Fill) => sim.fill(),
            Some(Event::ToggleWrap) => {
                let wrap = match sim.wrap() {
                    WrapMode::Torus => WrapMode::Plane,
                    WrapMode::Plane => WrapMode::Torus,
                };

                sim.set_wrap(wrap);
            }
            Some(Event::Grow) => {
                sim.resize(sim.width() + 2, sim.height() + 2)?;
                *cam = Camera::new(sim.width(), sim.height());
            }
            Some(Event::Shrink) => {
                if sim.width() > 2 && sim.height() > 2 {
                    sim.resize(sim.width() - 2, sim.height() - 2)?;
                    *cam = Camera::new(sim.width(), sim.height());
                }
            }
        }

        // The periodic tick. A stopped simulation ignores it.
        sim.step();

        let frame = cam.render(sim.cells());

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in frame.lines() {
            execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        let status = match sim.run_state() {
            RunState::Running => "RUNNING",
            RunState::Stopped => "STOPPED",
        };
        let wrap = match sim.wrap() {
            WrapMode::Torus => "wrap",
            WrapMode::Plane => "no wrap",
        };

        execute!(
            stdout,
            style::Print(format!(
                "{status} | generation {} | {}x{} | {wrap}",
                sim.generation(),
                sim.width(),
                sim.height(),
            )),
            cursor::MoveToNextLine(1),
            style::Print("space start/stop | r random | c clear | f fill | w wrap | +/- resize | q quit"),
            cursor::MoveToNextLine(1),
        )?;

        let time_left = FRAMETIME.saturating_sub(dt);
        thread::sleep(time_left);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut sim = Simulation::new(SimConfig::default()).context("Failed to create simulation")?;
    let mut cam = Camera::new(sim.width(), sim.height());

    seed_glider(&mut sim)?;

    terminal::enable_raw_mode()?;
    let res = run(&mut sim, &mut cam);
    terminal::disable_raw_mode()?;

    res
}
