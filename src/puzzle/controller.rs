//! Cube wrapper that adds animation, queueing, and undo history.

use std::collections::VecDeque;
use std::time::Duration;

use cgmath::{One, Quaternion};

use super::cube::{max_layer_count, Cube, CubieId};
use super::twist::Twist;
use super::CubeError;
use crate::preferences::{CubePreferences, InteractionPreferences};

/// If at least this much of a twist is animated in one frame, just skip the
/// animation to reduce unnecessary flashing.
const MIN_TWIST_DELTA: f32 = 1.0 / 3.0;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Interpolation functions.
pub mod interpolate {
    use std::f32::consts::PI;

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    pub type InterpolateFn = fn(f32) -> f32;

    /// Interpolate using cosine from 0.0 to PI.
    pub const COSINE: InterpolateFn = |x| (1.0 - (x * PI).cos()) / 2.0;
    /// Interpolate using cosine from 0.0 to PI/2.0.
    pub const COSINE_ACCEL: InterpolateFn = |x| 1.0 - (x * PI / 2.0).cos();
    /// Interpolate using cosine from PI/2.0 to 0.0.
    pub const COSINE_DECEL: InterpolateFn = |x| ((1.0 - x) * PI / 2.0).cos();
}

use interpolate::InterpolateFn;

const TWIST_INTERPOLATION_FN: InterpolateFn = interpolate::COSINE;

/// How a twist entered the engine. Decides what happens when it settles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TwistKind {
    /// A fresh user move: recorded into history, checked for a solve.
    Normal,
    /// An inverse synthesized by undo: never recorded, never wins.
    Undo,
    /// A replay from the redo buffer: re-recorded like a fresh move.
    Redo,
}

/// A twist mid-animation, with the cubies gripped when it started.
#[derive(Debug, Clone)]
struct TwistInFlight {
    twist: Twist,
    kind: TwistKind,
    grip: Vec<CubieId>,
    /// Animation progress from 0.0 to 1.0.
    progress: f32,
}

/// The move engine: owns the cube, the single-flight animation gate, both
/// pending queues, and the undo/redo history.
///
/// The engine is driven by the host render loop calling
/// [`CubeController::tick()`] once per frame. Only one twist animates at a
/// time; everything else waits in a queue, undos ahead of regular twists.
#[derive(Debug, Clone)]
pub struct CubeController {
    cube: Cube,
    /// The twist currently animating, if any. `Some` is the engine's only
    /// busy gate.
    in_flight: Option<TwistInFlight>,
    /// Pending regular (and redo) twists, oldest first.
    twist_queue: VecDeque<(Twist, TwistKind)>,
    /// Pending undo-synthesized inverses, drained with strict priority over
    /// `twist_queue` whenever the engine goes idle.
    undo_queue: VecDeque<Twist>,
    /// Committed twists, most recent last. Popped by undo.
    history: Vec<Twist>,
    /// Undone twists, most recent last. Cleared by any fresh twist.
    redo_buffer: Vec<Twist>,
    /// Twists applied by the last scramble; kept out of history so a scramble
    /// cannot be undone move by move.
    scramble: Vec<Twist>,
    /// Maximum queue depth since the engine was last idle (reset when the
    /// queues drain).
    queue_max: usize,
    /// Whether the cube was solved after the last settled twist.
    solved: bool,
    /// Whether the solved signal has been consumed.
    solved_state_handled: bool,
}

impl CubeController {
    /// Constructs a controller with a freshly built, solved cube.
    pub fn new(prefs: &CubePreferences) -> Result<Self, CubeError> {
        Ok(Self {
            cube: Cube::new(prefs)?,
            in_flight: None,
            twist_queue: VecDeque::new(),
            undo_queue: VecDeque::new(),
            history: vec![],
            redo_buffer: vec![],
            scramble: vec![],
            queue_max: 0,
            solved: true,
            // A fresh cube is solved, but nobody has won anything yet.
            solved_state_handled: true,
        })
    }

    /// The cube state as of the last settled twist. Mid-animation, the
    /// gripped cubies additionally carry the transform from
    /// [`Self::current_rotation()`].
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Cubies per axis.
    pub fn order(&self) -> u8 {
        self.cube.order()
    }

    /// Returns whether a twist is animating right now.
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }
    /// Number of twists waiting behind the current animation.
    ///
    /// The queues are unbounded; this count is the only backpressure signal.
    pub fn queued_twists(&self) -> usize {
        self.twist_queue.len() + self.undo_queue.len()
    }

    /// Requests a twist. Begins animating immediately when the engine is
    /// idle and nothing is pending; otherwise the twist is queued. Requests
    /// are never dropped.
    pub fn twist(&mut self, twist: Twist) -> Result<(), CubeError> {
        self.check_layers(twist)?;
        self.redo_buffer.clear();
        self.enqueue(twist, TwistKind::Normal);
        Ok(())
    }

    /// Pops the most recent twist from history and plays its inverse.
    ///
    /// When the engine is busy or anything is pending, the inverse joins the
    /// undo queue instead, which drains before any pending regular twist.
    /// Rapid undo presses therefore unwind history strictly newest-first.
    pub fn undo(&mut self) -> Result<(), CubeError> {
        let twist = self.history.pop().ok_or(CubeError::NothingToUndo)?;
        self.redo_buffer.push(twist);
        let inverse = twist.rev();
        if self.is_animating() || self.queued_twists() > 0 {
            self.undo_queue.push_back(inverse);
            self.queue_max = std::cmp::max(self.queue_max, self.queued_twists());
        } else {
            self.begin(inverse, TwistKind::Undo);
        }
        Ok(())
    }

    /// Replays the most recently undone twist.
    pub fn redo(&mut self) -> Result<(), CubeError> {
        let twist = self.redo_buffer.pop().ok_or(CubeError::NothingToRedo)?;
        self.enqueue(twist, TwistKind::Redo);
        Ok(())
    }

    /// Returns whether there is a twist to undo.
    pub fn has_undo(&self) -> bool {
        !self.history.is_empty()
    }
    /// Returns whether there is a twist to redo.
    pub fn has_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Committed twists, oldest first, not including the scramble.
    pub fn history(&self) -> &[Twist] {
        &self.history
    }
    /// Twists applied by the last scramble.
    pub fn scramble(&self) -> &[Twist] {
        &self.scramble
    }

    /// Advances the animation by `delta` and settles it on completion, then
    /// starts the next pending twist (undo queue first). Returns whether an
    /// animation is still in progress, i.e. whether another frame is needed.
    pub fn tick(&mut self, delta: Duration, prefs: &InteractionPreferences) -> bool {
        let Some(anim) = &mut self.in_flight else {
            self.queue_max = 0;
            return false;
        };

        // `twist_duration` is in seconds (per one twist); `base_speed` is
        // fraction of twist per frame.
        let base_speed = delta.as_secs_f32() / prefs.twist_duration;
        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match prefs.dynamic_twist_speed {
            true => (self.queue_max as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        let mut twist_delta = base_speed * speed_mod;
        // Cap the twist delta at 1.0, and also handle the case where
        // something went wrong with the calculation (e.g. division by zero).
        if !(0.0..MIN_TWIST_DELTA).contains(&twist_delta) {
            twist_delta = 1.0; // Instantly complete the twist.
        }

        anim.progress += twist_delta;
        if anim.progress >= 1.0 {
            self.settle();
            self.start_next();
        }
        self.is_animating()
    }

    /// The twist currently animating, with its eased progress from 0.0
    /// to 1.0.
    pub fn current_twist(&self) -> Option<(Twist, f32)> {
        let anim = self.in_flight.as_ref()?;
        Some((anim.twist, TWIST_INTERPOLATION_FN(anim.progress)))
    }

    /// The interpolated orientation of the rotating slab and the cubies in
    /// it, for the renderer to apply on top of the at-rest cube state.
    pub fn current_rotation(&self) -> Option<(Quaternion<f32>, &[CubieId])> {
        let anim = self.in_flight.as_ref()?;
        let t = TWIST_INTERPOLATION_FN(anim.progress);
        let orientation = Quaternion::one().slerp(anim.twist.rotation(), t);
        Some((orientation, &anim.grip))
    }

    /// Finishes the current animation and everything queued behind it
    /// instantly.
    pub fn catch_up(&mut self) {
        while self.in_flight.is_some() {
            self.settle();
            self.start_next();
        }
        self.queue_max = 0;
    }

    /// Resets to a freshly built cube with the same build parameters.
    pub fn reset(&mut self) {
        let prefs = *self.cube.prefs();
        // The prefs were validated when the cube was first built.
        if let Err(e) = self.rebuild(&prefs) {
            log::error!("failed to rebuild cube with known-good parameters: {e}");
        }
    }

    /// Discards the cube and regenerates it from `prefs`.
    ///
    /// All transient state goes with it, synchronously: an in-flight or
    /// queued twist referencing disposed cubies must never survive a
    /// rebuild.
    pub fn rebuild(&mut self, prefs: &CubePreferences) -> Result<(), CubeError> {
        self.cube = Cube::new(prefs)?;
        self.in_flight = None;
        self.twist_queue.clear();
        self.undo_queue.clear();
        self.history.clear();
        self.redo_buffer.clear();
        self.scramble.clear();
        self.queue_max = 0;
        self.solved = true;
        self.solved_state_handled = true;
        Ok(())
    }

    /// Resets and then applies `n` random twists instantly.
    ///
    /// Scramble twists are recorded separately from history, so an undo
    /// after a scramble has nothing to unwind.
    pub fn scramble_n(&mut self, n: usize) {
        self.reset();
        for _ in 0..n {
            let twist = Twist::from_rng(self.order());
            self.cube.apply_twist(twist);
            self.scramble.push(twist);
        }
        self.solved = self.cube.is_solved();
        self.solved_state_handled = true;
    }
    /// Resets and then scrambles the cube thoroughly.
    pub fn scramble_full(&mut self) {
        self.scramble_n(10 * self.order() as usize);
    }

    /// Returns whether the cube is currently solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }
    /// Returns whether the cube was just solved by a settled twist.
    ///
    /// One-shot: returns `true` at most once per solve, for the host to
    /// trigger a celebration and stop any active timer.
    pub fn handle_newly_solved_state(&mut self) -> bool {
        self.solved && !std::mem::replace(&mut self.solved_state_handled, true)
    }

    fn check_layers(&self, twist: Twist) -> Result<(), CubeError> {
        let order = self.order();
        if (1..=max_layer_count(order)).contains(&twist.layers) {
            Ok(())
        } else {
            Err(CubeError::InvalidLayerCount {
                layers: twist.layers,
                order,
            })
        }
    }

    /// Queues a twist, or begins it right away when nothing else is running
    /// or waiting.
    fn enqueue(&mut self, twist: Twist, kind: TwistKind) {
        if self.is_animating() || self.queued_twists() > 0 {
            self.twist_queue.push_back((twist, kind));
            self.queue_max = std::cmp::max(self.queue_max, self.queued_twists());
        } else {
            self.begin(twist, kind);
        }
    }

    /// Grips the rotating slab and starts the animation clock.
    fn begin(&mut self, twist: Twist, kind: TwistKind) {
        let grip = self.cube.select_layers(twist.face, twist.layers);
        if grip.is_empty() {
            // Should not happen with correct boundary math; an empty grip
            // animates as a no-op rather than erroring.
            log::warn!("twist {twist} gripped no cubies");
        }
        self.in_flight = Some(TwistInFlight {
            twist,
            kind,
            grip,
            progress: 0.0,
        });
    }

    /// Commits the finished animation into the cube store.
    fn settle(&mut self) {
        let Some(anim) = self.in_flight.take() else {
            return;
        };
        self.cube.apply_twist_to(&anim.grip, anim.twist);

        match anim.kind {
            // Undo replays neither record nor win.
            TwistKind::Undo => (),
            TwistKind::Normal | TwistKind::Redo => {
                self.history.push(anim.twist);
                let now_solved = self.cube.is_solved();
                if now_solved && !self.solved {
                    log::info!("cube solved after {} twists", self.history.len());
                    self.solved_state_handled = false;
                }
                self.solved = now_solved;
            }
        }
    }

    /// Starts the next pending twist, if any. The undo queue always drains
    /// fully before the regular queue gets another turn.
    fn start_next(&mut self) {
        if let Some(inverse) = self.undo_queue.pop_front() {
            self.begin(inverse, TwistKind::Undo);
        } else if let Some((twist, kind)) = self.twist_queue.pop_front() {
            self.begin(twist, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::face::Face;
    use super::super::twist::TwistDirection;
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller(order: u8) -> CubeController {
        CubeController::new(&CubePreferences::with_order(order)).expect("valid order")
    }

    fn drain(controller: &mut CubeController) {
        let prefs = InteractionPreferences::default();
        let mut frames = 0;
        while controller.tick(FRAME, &prefs) {
            frames += 1;
            assert!(frames < 10_000, "animation never settled");
        }
    }

    fn front() -> Twist {
        Twist::new(Face::Front, TwistDirection::Ccw)
    }

    #[test]
    fn test_single_twist_animates_then_commits() {
        let mut c = controller(3);
        assert!(!c.is_animating());

        c.twist(front()).expect("legal twist");
        assert!(c.is_animating());
        assert_eq!(0, c.history().len(), "history must not record until settled");

        let prefs = InteractionPreferences::default();
        assert!(c.tick(FRAME, &prefs));
        let (twist, t) = c.current_twist().expect("twist in flight");
        assert_eq!(front(), twist);
        assert!((0.0..1.0).contains(&t));

        drain(&mut c);
        assert_eq!(&[front()], c.history());
        assert!(!c.cube().is_solved());
    }

    #[test]
    fn test_rapid_requests_queue_without_loss() {
        let mut c = controller(3);
        let snapshot = c.cube().clone();

        for _ in 0..4 {
            c.twist(front()).expect("legal twist");
        }
        assert!(c.is_animating());
        assert_eq!(3, c.queued_twists());

        drain(&mut c);
        assert_eq!(4, c.history().len());
        assert_eq!(&snapshot, c.cube(), "four quarter turns must be identity");
        assert!(c.is_solved());
    }

    #[test]
    fn test_progress_is_monotonic_and_fixed_time() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");

        let prefs = InteractionPreferences::default();
        let mut last_t = 0.0;
        let mut frames = 0;
        while c.tick(FRAME, &prefs) {
            if let Some((_, t)) = c.current_twist() {
                assert!(t >= last_t, "interpolation went backwards");
                last_t = t;
            }
            frames += 1;
        }
        // 150 ms at 16 ms per frame.
        assert!((8..=11).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn test_huge_delta_completes_instantly() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");
        let done = c.tick(Duration::from_secs(5), &InteractionPreferences::default());
        assert!(!done);
        assert_eq!(1, c.history().len());
    }

    #[test]
    fn test_undo_restores_snapshot_and_history() {
        let mut c = controller(3);
        let snapshot = c.cube().clone();

        c.twist(front()).expect("legal twist");
        drain(&mut c);
        assert_eq!(1, c.history().len());

        c.undo().expect("one twist to undo");
        drain(&mut c);
        assert_eq!(0, c.history().len());
        assert_eq!(&snapshot, c.cube());
        assert!(c.has_redo());
    }

    #[test]
    fn test_undo_with_empty_history_is_an_error() {
        let mut c = controller(3);
        assert_eq!(Err(CubeError::NothingToUndo), c.undo());
        assert_eq!(Err(CubeError::NothingToRedo), c.redo());
    }

    #[test]
    fn test_undo_has_priority_over_queued_twists() {
        let mut c = controller(3);
        let up = Twist::new(Face::Up, TwistDirection::Ccw);
        let left = Twist::new(Face::Left, TwistDirection::Cw);

        // Commit one twist so there is something to undo.
        c.twist(front()).expect("legal twist");
        drain(&mut c);

        // Start one animation and queue another behind it, then undo while
        // both are outstanding.
        c.twist(up).expect("legal twist");
        c.twist(left).expect("legal twist");
        c.undo().expect("one twist to undo");

        // Expected order: `up` settles, then the undo of `front` runs ahead
        // of the still-pending `left`.
        let mut expected = controller(3).cube().clone();
        expected.apply_twist(front());
        expected.apply_twist(up);
        expected.apply_twist(front().rev());
        // After `up` commits there is exactly one entry left to undo later,
        // so `left` lands after the inverse.
        expected.apply_twist(left);

        drain(&mut c);
        assert_eq!(&expected, c.cube());
        assert_eq!(&[up, left], c.history());
    }

    #[test]
    fn test_stacked_undos_unwind_newest_first() {
        let mut c = controller(3);
        let snapshot = c.cube().clone();
        let twists = [
            front(),
            Twist::new(Face::Right, TwistDirection::Cw),
            Twist {
                face: Face::Down,
                direction: TwistDirection::Ccw,
                layers: 1,
            },
        ];
        for twist in twists {
            c.twist(twist).expect("legal twist");
        }
        drain(&mut c);
        assert_eq!(3, c.history().len());

        // Three rapid undo presses, each queued while the previous inverse
        // animates.
        c.undo().expect("twists to undo");
        c.undo().expect("twists to undo");
        c.undo().expect("twists to undo");
        assert_eq!(0, c.history().len());

        drain(&mut c);
        assert_eq!(&snapshot, c.cube());
    }

    #[test]
    fn test_full_history_unwind_returns_to_solved() {
        let mut c = controller(4);
        for twist in [
            Twist {
                face: Face::Back,
                direction: TwistDirection::Cw,
                layers: 2,
            },
            Twist::new(Face::Up, TwistDirection::Ccw),
            Twist::new(Face::Right, TwistDirection::Ccw),
            Twist {
                face: Face::Left,
                direction: TwistDirection::Ccw,
                layers: 2,
            },
        ] {
            c.twist(twist).expect("legal twist");
        }
        drain(&mut c);
        assert!(!c.cube().is_solved());

        while c.has_undo() {
            c.undo().expect("twists to undo");
            drain(&mut c);
        }
        assert!(c.cube().is_solved());
    }

    #[test]
    fn test_redo_replays_and_re_records() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");
        drain(&mut c);
        let after_front = c.cube().clone();

        c.undo().expect("one twist to undo");
        drain(&mut c);

        c.redo().expect("one twist to redo");
        drain(&mut c);
        assert_eq!(&after_front, c.cube());
        assert_eq!(&[front()], c.history());
        assert!(!c.has_redo());
    }

    #[test]
    fn test_fresh_twist_clears_redo() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");
        drain(&mut c);
        c.undo().expect("one twist to undo");
        drain(&mut c);
        assert!(c.has_redo());

        c.twist(Twist::new(Face::Up, TwistDirection::Cw))
            .expect("legal twist");
        assert!(!c.has_redo());
        assert_eq!(Err(CubeError::NothingToRedo), c.redo());
    }

    #[test]
    fn test_solved_signal_fires_once() {
        let mut c = controller(3);
        // Freshly built cubes are solved but nothing was won.
        assert!(c.is_solved());
        assert!(!c.handle_newly_solved_state());

        for _ in 0..4 {
            c.twist(front()).expect("legal twist");
        }
        drain(&mut c);
        assert!(c.is_solved());
        assert!(c.handle_newly_solved_state());
        assert!(!c.handle_newly_solved_state(), "signal must be one-shot");
    }

    #[test]
    fn test_undo_never_fires_the_solved_signal() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");
        drain(&mut c);
        c.undo().expect("one twist to undo");
        drain(&mut c);

        assert!(c.cube().is_solved());
        assert!(!c.handle_newly_solved_state());
    }

    #[test]
    fn test_layer_count_validation() {
        let mut c = controller(3);
        let wide = Twist {
            face: Face::Front,
            direction: TwistDirection::Ccw,
            layers: 2,
        };
        assert_eq!(
            Err(CubeError::InvalidLayerCount { layers: 2, order: 3 }),
            c.twist(wide)
        );
        assert_eq!(
            Err(CubeError::InvalidLayerCount { layers: 0, order: 3 }),
            c.twist(Twist {
                layers: 0,
                ..front()
            })
        );

        let mut big = controller(9);
        assert!(big
            .twist(Twist {
                face: Face::Front,
                direction: TwistDirection::Ccw,
                layers: 4,
            })
            .is_ok());
    }

    #[test]
    fn test_rebuild_clears_everything_in_flight() {
        let mut c = controller(3);
        c.twist(front()).expect("legal twist");
        drain(&mut c);
        c.twist(front()).expect("legal twist");
        c.twist(front()).expect("legal twist");
        c.undo().expect("one twist to undo");
        assert!(c.is_animating());
        assert!(c.queued_twists() > 0);

        c.rebuild(&CubePreferences::with_order(4))
            .expect("valid order");
        assert!(!c.is_animating());
        assert_eq!(0, c.queued_twists());
        assert_eq!(0, c.history().len());
        assert!(!c.has_redo());
        assert_eq!(4, c.order());
        assert!(c.cube().is_solved());

        // The engine is fully usable after the rebuild.
        c.twist(front()).expect("legal twist");
        drain(&mut c);
        assert_eq!(1, c.history().len());
    }

    #[test]
    fn test_scramble_is_not_undoable() {
        let mut c = controller(3);
        c.scramble_full();
        assert!(!c.is_animating());
        assert_eq!(30, c.scramble().len());
        assert_eq!(0, c.history().len());
        assert_eq!(Err(CubeError::NothingToUndo), c.undo());
    }

    #[test]
    fn test_catch_up_settles_everything() {
        let mut c = controller(3);
        for _ in 0..5 {
            c.twist(front()).expect("legal twist");
        }
        c.catch_up();
        assert!(!c.is_animating());
        assert_eq!(0, c.queued_twists());
        assert_eq!(5, c.history().len());
    }

    #[test]
    fn test_dynamic_twist_speed_still_commits_in_order() {
        let mut c = controller(3);
        let prefs = InteractionPreferences {
            dynamic_twist_speed: true,
            ..Default::default()
        };
        let twists = [
            front(),
            Twist::new(Face::Up, TwistDirection::Ccw),
            Twist::new(Face::Right, TwistDirection::Cw),
        ];
        for twist in twists {
            c.twist(twist).expect("legal twist");
        }
        let mut frames = 0;
        while c.tick(FRAME, &prefs) {
            frames += 1;
            assert!(frames < 10_000, "animation never settled");
        }
        assert_eq!(&twists[..], c.history());
    }
}
