use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Feedback events for the UI. They never feed back into engine state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    DragStarted { piece: PieceId },
    PiecePlaced { piece: PieceId, anchor: Coord2 },
    PlacementRejected { piece: PieceId },
    RowsCompleted { rows: usize },
    RowsCleared { rows: usize, score: u32 },
    GameOver { score: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// No drag was active.
    NoChange,
    Placed { anchor: Coord2, snapped: bool },
    Rejected,
}

impl DropOutcome {
    pub const fn has_update(self) -> bool {
        use DropOutcome::*;
        match self {
            NoChange => false,
            Placed { .. } => true,
            Rejected => true,
        }
    }
}

/// Pointer-driven game: a [`Session`] plus drag handling and the deferred clear clock.
#[derive(Clone, Debug)]
pub struct PuzzleEngine<G = WeightedGenerator> {
    session: Session<G>,
    drag: DragState,
    geometry: LayoutGeometry,
    timing: ClearTiming,
    queue: TickQueue,
    clock: Duration,
    epoch: Epoch,
    notifications: Vec<Notification>,
}

impl PuzzleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_generator(config, WeightedGenerator::new(config.seed))
    }
}

impl<G: PieceGenerator> PuzzleEngine<G> {
    pub fn with_generator(config: EngineConfig, generator: G) -> Self {
        Self::from_session(config, Session::new(generator))
    }

    pub fn from_session(config: EngineConfig, session: Session<G>) -> Self {
        Self {
            session,
            drag: DragState::Idle,
            geometry: config.geometry,
            timing: config.timing,
            queue: TickQueue::new(),
            clock: Duration::ZERO,
            epoch: Epoch::default(),
            notifications: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session<G> {
        &self.session
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Updates the board layout, e.g. after the page scrolled or resized.
    pub fn set_geometry(&mut self, geometry: LayoutGeometry) -> Result<()> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Drains feedback events produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.notifications)
    }

    pub fn start_game(&mut self) {
        self.epoch = self.epoch.next();
        self.drag.cancel();
        self.session.start();
    }

    pub fn reset_game(&mut self) {
        self.epoch = self.epoch.next();
        self.drag.cancel();
        self.session.reset();
    }

    /// Grabs tray piece `id` at `at`; `piece_origin` is the piece's on-screen top-left corner.
    pub fn pointer_down(&mut self, id: PieceId, at: Point, piece_origin: Point) -> bool {
        if !self.session.is_active() || self.drag.is_dragging() {
            return false;
        }
        let Some(&piece) = self.session.tray().get(id) else {
            log::warn!("pointer down on unknown piece {:?}", id);
            return false;
        };

        let started = self.drag.begin(piece, at, piece_origin);
        if started {
            log::debug!("drag started: {:?}", piece);
            self.notify(Notification::DragStarted { piece: id });
        }
        started
    }

    pub fn pointer_move(&mut self, at: Point) {
        if !self.session.is_active() {
            // Keep the ghost following the pointer, but offer no drop target.
            if let DragState::Dragging(drag) = &mut self.drag {
                drag.position = at - drag.pointer_offset;
                drag.preview = None;
            }
            return;
        }
        self.drag.update(at, self.session.grid(), &self.geometry);
    }

    pub fn pointer_up(&mut self, at: Point) -> DropOutcome {
        let Some((piece, target)) = self.drag.release(at, self.session.grid(), &self.geometry)
        else {
            return DropOutcome::NoChange;
        };

        let placed = match target.anchor() {
            Some(anchor) => self.session.place(piece.id, anchor).has_update(),
            None => false,
        };

        match (placed, target) {
            (true, DropTarget::Preview(anchor) | DropTarget::Snapped(anchor)) => {
                self.on_placed(piece.id, anchor);
                DropOutcome::Placed {
                    anchor,
                    snapped: matches!(target, DropTarget::Snapped(_)),
                }
            }
            _ => {
                log::debug!("drop of {:?} rejected", piece.id);
                self.notify(Notification::PlacementRejected { piece: piece.id });
                DropOutcome::Rejected
            }
        }
    }

    /// When the host should next call [`PuzzleEngine::advance_to`].
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_due()
    }

    /// Runs every deferred task due at or before `now`, in order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((due, task)) = self.queue.pop_due(now) {
            self.clock = self.clock.max(due);
            self.run_task(task);
        }
        self.clock = self.clock.max(now);
    }

    fn on_placed(&mut self, id: PieceId, anchor: Coord2) {
        self.notify(Notification::PiecePlaced { piece: id, anchor });
        self.schedule(self.timing.check_delay, TaskKind::CheckRows);
        self.settle();
    }

    fn run_task(&mut self, task: DeferredTask) {
        if task.epoch != self.epoch {
            log::debug!("skipping {:?} from a superseded game", task.kind);
            return;
        }

        match task.kind {
            TaskKind::CheckRows => {
                if let Some((pass, rows)) = self.session.begin_clear() {
                    self.notify(Notification::RowsCompleted { rows });
                    self.schedule(self.timing.compact_delay, TaskKind::Compact(pass));
                }
            }
            TaskKind::Compact(pass) => match self.session.compact(pass) {
                Some(rows) => self.notify(Notification::RowsCleared {
                    rows,
                    score: self.session.score(),
                }),
                None => log::warn!("clear pass {:?} is no longer pending", pass),
            },
        }
        self.settle();
    }

    /// Checks the current grid and tray for a remaining legal move.
    fn settle(&mut self) {
        if !self.session.is_active() {
            return;
        }
        if self.session.evaluate_terminal() {
            self.notify(Notification::GameOver {
                score: self.session.score(),
            });
        }
    }

    fn schedule(&mut self, delay: Duration, kind: TaskKind) {
        let task = DeferredTask {
            epoch: self.epoch,
            kind,
        };
        self.queue.schedule(self.clock + delay, task);
    }

    fn notify(&mut self, notification: Notification) {
        log::trace!("notify {:?}", notification);
        self.notifications.push(notification);
    }
}
