use std::mem;

use rand::Rng;
use tracing::debug;
use tracing::trace;

use crate::Coord;
use crate::grid::Grid;
use crate::grid::GridResult;
use crate::grid::WrapMode;
use crate::neighborhood::live_neighbors;
use crate::rules::RuleSet;

/// Whether the scheduler's ticks advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Starting parameters for a [`Simulation`].
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub wrap: WrapMode,
    pub rule: RuleSet,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 32,
            wrap: WrapMode::Torus,
            rule: RuleSet::default(),
        }
    }
}

/// The simulation core.
///
/// Owns both generation buffers and every knob the outside layers may
/// touch: an input layer issues the edit commands, a scheduler calls
/// [`step`](Self::step) at whatever cadence it likes, and a renderer reads
/// cells back through [`is_alive`](Self::is_alive) or
/// [`cells`](Self::cells).
///
/// A renderer only ever observes completed generations: a step writes the
/// whole next generation into the scratch buffer before a single buffer
/// swap publishes it.
///
/// Everything here is synchronous and runs on one logical thread. A
/// multi-threaded host must serialize its calls into the core.
pub struct Simulation {
    current: Grid,
    scratch: Grid,
    rule: RuleSet,
    wrap: WrapMode,
    run_state: RunState,
    generation: u64,
}

impl Simulation {
    /// Create a stopped, all-dead simulation.
    pub fn new(config: SimConfig) -> GridResult<Self> {
        let current = Grid::new(config.width, config.height)?;
        let scratch = current.clone();

        Ok(Self {
            current,
            scratch,
            rule: config.rule,
            wrap: config.wrap,
            run_state: RunState::Stopped,
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    /// How many generations have been produced so far. Editing commands
    /// never touch this counter, only successful steps do.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    /// Whether the cell at `(x, y)` is alive in the current generation.
    pub fn is_alive(&self, x: Coord, y: Coord) -> bool {
        self.current.get(x, y, self.wrap)
    }

    /// The current generation, for layers that walk the board wholesale.
    pub fn cells(&self) -> &Grid {
        &self.current
    }

    /// Flip one cell, returning its new state.
    ///
    /// Legal whether stopped or running; a running simulation picks the
    /// edit up on its next step.
    pub fn toggle_cell(&mut self, x: Coord, y: Coord) -> GridResult<bool> {
        self.current.toggle(x, y, self.wrap)
    }

    pub fn set_cell(&mut self, x: Coord, y: Coord, alive: bool) -> GridResult<()> {
        self.current.set(x, y, alive, self.wrap)
    }

    /// Replace the board with a `width x height` one, keeping the overlap
    /// rectangle and dropping everything outside it.
    ///
    /// On error, both buffers and the generation counter are untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> GridResult<()> {
        let current = self.current.resized(width, height)?;

        // Scratch content is overwritten by the next step; only its
        // dimensions matter.
        self.scratch = Grid::new(width, height)?;
        self.current = current;

        debug!(width, height, "resized board");

        Ok(())
    }

    /// Change the edge topology. Takes effect on the very next lookup or
    /// step.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        debug!(?wrap, "wrap mode changed");

        self.wrap = wrap;
    }

    /// Swap in a different birth/survival rule. Takes effect on the very
    /// next step.
    pub fn set_rule(&mut self, rule: RuleSet) {
        self.rule = rule;
    }

    pub fn set_run_state(&mut self, run_state: RunState) {
        debug!(?run_state, "run state changed");

        self.run_state = run_state;
    }

    /// Flip between [`RunState::Running`] and [`RunState::Stopped`],
    /// returning the new state.
    pub fn toggle_run_state(&mut self) -> RunState {
        let run_state = match self.run_state {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        };
        self.set_run_state(run_state);

        run_state
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.current.fill(false);
    }

    /// Revive every cell.
    pub fn fill(&mut self) {
        self.current.fill(true);
    }

    /// Make each cell independently alive with probability `density`.
    ///
    /// Values outside `[0, 1]` are clamped.
    pub fn randomize(&mut self, density: f64) {
        self.randomize_with(&mut rand::thread_rng(), density);
    }

    /// Like [`randomize`](Self::randomize), but with a caller-picked source
    /// of randomness.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);

        self.current.fill_with(|| rng.gen_bool(density));
    }

    /// Advance one generation.
    ///
    /// Does nothing while stopped. While running, every cell of the next
    /// generation is computed from the current one into the scratch buffer,
    /// then the buffers swap and the generation counter increments. All
    /// reads observe the old generation; partially updated state is never
    /// visible, which is what the second buffer is for.
    ///
    /// Returns whether a generation was produced.
    pub fn step(&mut self) -> bool {
        if self.run_state == RunState::Stopped {
            return false;
        }

        let wrap = self.wrap;
        let rule = self.rule;

        for ((x, y), cell) in self.scratch.cells_mut() {
            let alive = self.current.get(x, y, wrap);
            let neighbors = live_neighbors(&self.current, x, y, wrap);

            *cell = rule.next_state(alive, neighbors);
        }

        mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;

        trace!(generation = self.generation, "stepped");

        true
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;
    use super::SimConfig;
    use super::Simulation;
    use crate::grid::GridError;
    use crate::grid::WrapMode;

    fn sim(width: usize, height: usize) -> Simulation {
        Simulation::new(SimConfig {
            width,
            height,
            ..SimConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_stopped_and_dead() {
        let sim = sim(4, 4);

        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.cells().population(), 0);
    }

    #[test]
    fn step_is_a_noop_while_stopped() {
        let mut sim = sim(4, 4);
        sim.set_cell(1, 1, true).unwrap();
        let before = sim.cells().clone();

        assert!(!sim.step());
        assert_eq!(sim.generation(), 0);
        assert_eq!(*sim.cells(), before);
    }

    #[test]
    fn step_counts_generations_while_running() {
        let mut sim = sim(4, 4);
        sim.set_run_state(RunState::Running);

        assert!(sim.step());
        assert!(sim.step());
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn toggle_run_state_flips() {
        let mut sim = sim(4, 4);

        assert_eq!(sim.toggle_run_state(), RunState::Running);
        assert_eq!(sim.toggle_run_state(), RunState::Stopped);
    }

    #[test]
    fn toggling_a_cell_twice_restores_it() {
        let mut sim = sim(4, 4);

        assert_eq!(sim.toggle_cell(2, 2), Ok(true));
        assert_eq!(sim.toggle_cell(2, 2), Ok(false));
        assert!(!sim.is_alive(2, 2));
    }

    #[test]
    fn toggle_respects_the_wrap_mode() {
        let mut sim = sim(4, 4);

        // Torus normalizes
        sim.toggle_cell(-1, -1).unwrap();
        assert!(sim.is_alive(3, 3));

        // Plane rejects
        sim.set_wrap(WrapMode::Plane);
        assert_eq!(
            sim.toggle_cell(4, 0),
            Err(GridError::OutOfRange {
                x: 4,
                y: 0,
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn failed_resize_changes_nothing() {
        let mut sim = sim(4, 4);
        sim.set_cell(1, 1, true).unwrap();

        assert!(sim.resize(0, 8).is_err());
        assert_eq!(sim.width(), 4);
        assert_eq!(sim.height(), 4);
        assert!(sim.is_alive(1, 1));
    }

    #[test]
    fn clear_and_fill_cover_the_board() {
        let mut sim = sim(3, 3);

        sim.fill();
        assert_eq!(sim.cells().population(), 9);

        sim.clear();
        assert_eq!(sim.cells().population(), 0);
    }

    #[test]
    fn randomize_density_extremes() {
        let mut sim = sim(6, 6);

        sim.randomize(1.0);
        assert_eq!(sim.cells().population(), 36);

        sim.randomize(0.0);
        assert_eq!(sim.cells().population(), 0);

        // out-of-range densities clamp instead of panicking
        sim.randomize(7.5);
        assert_eq!(sim.cells().population(), 36);
    }
}
