//! Autoplay controller - the self-playing game loop
//!
//! One call to [`Autoplay::step`] is one outer iteration:
//!
//! 1. Top-out check. A filled spawn row (or a piece with nowhere to go)
//!    blanks the panel, pauses, and starts over on an empty grid.
//! 2. Spawn. With no falling piece, draw a kind, plan its target once, and
//!    put it at the top center in its base orientation.
//! 3. Gravity tick (every `gravity_interval` frames): rotate one step toward
//!    the target with a {0, -1, +1} wall kick, shift one column toward the
//!    target, then fall one row or lock. Locking flashes and compacts any
//!    completed rows before the next spawn.
//! 4. Render and hold for one frame.
//!
//! The line-clear flash and the reset pause block inside `step`; nothing else
//! advances while they play.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::core::{
    choose_best_placement_with, rotations, Grid, PieceSource, Shape, UniformPieces, Weights,
};
use crate::render::{Overlay, PanelMapping, PixelFrame, Renderer};
use crate::sink::{Pacer, PixelSink};
use crate::types::{
    Cell, PieceKind, EMPTY, FLASH_COUNT, FLASH_HOLD_MS, FRAME_MS, GRAVITY_INTERVAL, GRID_WIDTH,
    HIGHLIGHT_INTENSITY, RESET_PAUSE_MS,
};

/// Horizontal offsets tried, in order, when a rotation is blocked.
const WALL_KICKS: [i8; 3] = [0, -1, 1];

/// Timing and policy knobs for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayConfig {
    pub frame: Duration,
    /// Gravity runs on frames where `frame % gravity_interval == 0`.
    pub gravity_interval: u32,
    pub flash_count: u32,
    pub flash_hold: Duration,
    pub reset_pause: Duration,
    /// Fill value for rows about to clear. Must be nonzero.
    pub highlight: Cell,
    pub mapping: PanelMapping,
    pub weights: Weights,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(FRAME_MS),
            gravity_interval: GRAVITY_INTERVAL,
            flash_count: FLASH_COUNT,
            flash_hold: Duration::from_millis(FLASH_HOLD_MS),
            reset_pause: Duration::from_millis(RESET_PAUSE_MS),
            highlight: HIGHLIGHT_INTENSITY,
            mapping: PanelMapping::default(),
            weights: Weights::default(),
        }
    }
}

/// The piece currently in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub kind: PieceKind,
    /// Index into `rotations(kind)`
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
    pub target_rotation: usize,
    pub target_x: i8,
    /// Intensity written on lock
    pub value: Cell,
}

impl FallingPiece {
    pub fn shape(&self) -> &'static Shape {
        &rotations(self.kind)[self.rotation]
    }
}

/// What a call to [`Autoplay::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The field was wiped after a top-out.
    Reset,
    /// Not a gravity frame; nothing moved.
    Idle,
    /// The piece rotated, shifted and/or fell.
    Moved,
    /// The piece locked, clearing `lines` rows.
    Locked { lines: usize },
}

/// Undrained events kept before the oldest are dropped.
pub const EVENT_BUFFER_CAPACITY: usize = 256;

/// Lifecycle records, drained by observers via [`Autoplay::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AutoplayEvent {
    Spawned {
        piece: u64,
        kind: PieceKind,
        target_rotation: usize,
        target_x: i8,
        target_y: i8,
        score: f64,
    },
    Locked {
        piece: u64,
        kind: PieceKind,
        rotation: usize,
        x: i8,
        y: i8,
        lines: usize,
    },
    Reset {
        episode: u32,
        pieces: u64,
        lines: u64,
    },
}

/// Running counters. Nothing here survives the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutoplayStats {
    pub frames: u64,
    /// Pieces locked, all episodes
    pub pieces: u64,
    /// Rows cleared, all episodes
    pub lines: u64,
    pub resets: u32,
    /// Pieces locked since the last reset
    pub episode_pieces: u64,
    /// Rows cleared since the last reset
    pub episode_lines: u64,
    /// Events discarded because nobody drained the buffer in time
    pub dropped_events: u64,
}

/// Owns the grid, the falling piece and the frame counter.
#[derive(Debug, Clone)]
pub struct Autoplay<S = UniformPieces> {
    grid: Grid,
    falling: Option<FallingPiece>,
    frame: u64,
    /// Monotonic id of the last spawned piece
    piece_id: u64,
    source: S,
    config: AutoplayConfig,
    renderer: Renderer,
    stats: AutoplayStats,
    events: VecDeque<AutoplayEvent>,
}

impl<S: PieceSource> Autoplay<S> {
    pub fn new(source: S, mut config: AutoplayConfig) -> Self {
        config.gravity_interval = config.gravity_interval.max(1);
        if config.highlight == EMPTY {
            config.highlight = HIGHLIGHT_INTENSITY;
        }

        Self {
            grid: Grid::new(),
            falling: None,
            frame: 0,
            piece_id: 0,
            source,
            renderer: Renderer::new(config.mapping),
            config,
            stats: AutoplayStats::default(),
            events: VecDeque::with_capacity(EVENT_BUFFER_CAPACITY),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for fixtures and tests.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling(&self) -> Option<FallingPiece> {
        self.falling
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    pub fn stats(&self) -> AutoplayStats {
        self.stats
    }

    /// Take and clear the recorded lifecycle events, oldest first.
    ///
    /// At most [`EVENT_BUFFER_CAPACITY`] are kept between drains.
    pub fn take_events(&mut self) -> Vec<AutoplayEvent> {
        self.events.drain(..).collect()
    }

    /// Run one outer iteration. Only a failed sink flush is an error.
    pub fn step<P, C>(&mut self, sink: &mut P, pacer: &mut C) -> Result<Tick>
    where
        P: PixelSink + ?Sized,
        C: Pacer + ?Sized,
    {
        if self.grid.is_top_out() {
            self.reset(sink, pacer)?;
            return Ok(Tick::Reset);
        }

        if self.falling.is_none() && !self.spawn() {
            // Nowhere to put the piece: same outcome as a top-out.
            self.reset(sink, pacer)?;
            return Ok(Tick::Reset);
        }

        let mut tick = Tick::Idle;
        if self.frame % self.config.gravity_interval as u64 == 0 {
            if let Some(piece) = self.falling {
                tick = self.gravity(piece, sink, pacer)?;
            }
        }

        self.render(sink)?;
        self.frame += 1;
        self.stats.frames += 1;
        pacer.hold(self.config.frame);
        Ok(tick)
    }

    /// Step forever. Returns only if the sink fails to flush.
    ///
    /// Nobody drains events here, so only the newest are kept.
    pub fn run<P, C>(&mut self, sink: &mut P, pacer: &mut C) -> Result<()>
    where
        P: PixelSink + ?Sized,
        C: Pacer + ?Sized,
    {
        loop {
            self.step(sink, pacer)?;
        }
    }

    /// Draw a kind, plan it and put it at the top. False if the planner
    /// found no placement.
    fn spawn(&mut self) -> bool {
        let kind = self.source.next_kind();
        let Some(target) = choose_best_placement_with(&mut self.grid, kind, &self.config.weights)
        else {
            return false;
        };

        let base = &rotations(kind)[0];
        self.piece_id += 1;
        self.falling = Some(FallingPiece {
            kind,
            rotation: 0,
            x: ((GRID_WIDTH - base.width()) / 2) as i8,
            y: 0,
            target_rotation: target.rotation,
            target_x: target.x,
            value: kind.intensity(),
        });
        self.record(AutoplayEvent::Spawned {
            piece: self.piece_id,
            kind,
            target_rotation: target.rotation,
            target_x: target.x,
            target_y: target.y,
            score: target.score,
        });
        true
    }

    fn gravity<P, C>(&mut self, mut piece: FallingPiece, sink: &mut P, pacer: &mut C) -> Result<Tick>
    where
        P: PixelSink + ?Sized,
        C: Pacer + ?Sized,
    {
        let rots = rotations(piece.kind);

        // Rotation waits until the piece has left the spawn row.
        if piece.y > 0 && piece.rotation != piece.target_rotation {
            let next = step_toward(piece.rotation, piece.target_rotation, rots.len());
            if let Some(kick) = WALL_KICKS
                .iter()
                .copied()
                .find(|&k| self.grid.can_place(&rots[next], piece.x + k, piece.y))
            {
                piece.x += kick;
                piece.rotation = next;
            }
        }

        let shape = &rots[piece.rotation];
        let dx = (piece.target_x - piece.x).signum();
        if dx != 0 && self.grid.can_place(shape, piece.x + dx, piece.y) {
            piece.x += dx;
        }

        if self.grid.can_place(shape, piece.x, piece.y + 1) {
            piece.y += 1;
            self.falling = Some(piece);
            return Ok(Tick::Moved);
        }

        self.lock(piece, sink, pacer)
    }

    fn lock<P, C>(&mut self, piece: FallingPiece, sink: &mut P, pacer: &mut C) -> Result<Tick>
    where
        P: PixelSink + ?Sized,
        C: Pacer + ?Sized,
    {
        self.grid.place(piece.shape(), piece.x, piece.y, piece.value);
        self.falling = None;

        let completed = self.grid.completed_rows();
        if !completed.is_empty() {
            for _ in 0..self.config.flash_count {
                for &y in &completed {
                    self.grid.fill_row(y, EMPTY);
                }
                self.render(sink)?;
                pacer.hold(self.config.flash_hold);

                for &y in &completed {
                    self.grid.fill_row(y, self.config.highlight);
                }
                self.render(sink)?;
                pacer.hold(self.config.flash_hold);
            }
        }

        let (compacted, lines) = self.grid.clear_rows(&completed);
        self.grid = compacted;

        self.stats.pieces += 1;
        self.stats.episode_pieces += 1;
        self.stats.lines += lines as u64;
        self.stats.episode_lines += lines as u64;
        self.record(AutoplayEvent::Locked {
            piece: self.piece_id,
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            lines,
        });

        Ok(Tick::Locked { lines })
    }

    fn record(&mut self, event: AutoplayEvent) {
        if self.events.len() == EVENT_BUFFER_CAPACITY {
            self.events.pop_front();
            self.stats.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    fn reset<P, C>(&mut self, sink: &mut P, pacer: &mut C) -> Result<()>
    where
        P: PixelSink + ?Sized,
        C: Pacer + ?Sized,
    {
        self.renderer.blank(sink)?;
        pacer.hold(self.config.reset_pause);

        self.record(AutoplayEvent::Reset {
            episode: self.stats.resets,
            pieces: self.stats.episode_pieces,
            lines: self.stats.episode_lines,
        });
        self.stats.resets += 1;
        self.stats.episode_pieces = 0;
        self.stats.episode_lines = 0;

        self.grid = Grid::new();
        self.falling = None;
        self.frame = 0;
        Ok(())
    }

    fn render<P: PixelSink + ?Sized>(&self, sink: &mut P) -> Result<()> {
        let overlay = self.falling.map(|p| Overlay {
            shape: p.shape(),
            x: p.x,
            y: p.y,
            value: p.value,
        });
        self.renderer
            .present(&PixelFrame::project(&self.grid, overlay), sink)
    }
}

impl Default for Autoplay<UniformPieces> {
    fn default() -> Self {
        Self::new(UniformPieces::default(), AutoplayConfig::default())
    }
}

/// One rotation step from `current` toward `target` over `len` orientations,
/// taking the shorter way round; a tie goes forward.
pub fn step_toward(current: usize, target: usize, len: usize) -> usize {
    if current == target || len == 0 {
        return current;
    }
    let forward = (target + len - current % len) % len;
    if forward <= len / 2 {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}
