//! Placement of freshly posted notes.
//!
//! New notes land near the board center with some jitter. A bounded probe
//! phase retries random candidates until one is acceptably separated from
//! every existing note; if the board is too crowded for that, a repulsion
//! phase pushes the last candidate away from its neighbors for a bounded
//! number of iterations. Overlap freedom is best-effort: a saturated board
//! still produces touching notes, but always inside the bounds.

use crate::constants::{
    FALLBACK_SPAWN, MIN_SEPARATION, NOTE_SIZE, NOTE_TILT_RANGE, REPULSION_PUSH, REPULSION_STEPS,
    SHADOW_MAX, SHADOW_MIN, SPAWN_JITTER, SPAWN_PROBES,
};
use crate::geometry::{BoardBounds, Point};
use crate::note::Note;

/// Random source for placement jitter and the decorative note attributes.
///
/// Injected so tests can script every draw; production uses the thread-local
/// generator from `rand`.
pub trait SpawnRng {
    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// [`SpawnRng`] over `rand`'s thread-local generator.
#[derive(Default)]
pub struct ThreadSpawnRng;

impl SpawnRng for ThreadSpawnRng {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen_range(lo..hi)
    }
}

/// Decorative tilt for a new note, in degrees, rounded to two decimals.
pub fn draw_tilt(rng: &mut dyn SpawnRng) -> f64 {
    let tilt = rng.uniform(-NOTE_TILT_RANGE, NOTE_TILT_RANGE);
    (tilt * 100.0).round() / 100.0
}

/// Decorative shadow depth for a new note.
pub fn draw_shadow_depth(rng: &mut dyn SpawnRng) -> u8 {
    rng.uniform(SHADOW_MIN as f64, SHADOW_MAX as f64 + 1.0).floor() as u8
}

/// The pairwise near-miss test: a candidate conflicts with a note only when
/// BOTH axis gaps are under [`MIN_SEPARATION`]. One roomy axis is enough to
/// accept, regardless of the other — this is a box test, not an area test.
fn too_close(p: Point, existing: &[Note]) -> bool {
    existing
        .iter()
        .any(|n| (n.pos.x - p.x).abs() < MIN_SEPARATION && (n.pos.y - p.y).abs() < MIN_SEPARATION)
}

/// Board-center candidate with uniform jitter, clamped onto the board.
fn jittered_center(bounds: BoardBounds, rng: &mut dyn SpawnRng) -> Point {
    let center = Point::new(
        bounds.width / 2.0 - NOTE_SIZE / 2.0,
        bounds.height / 2.0 - NOTE_SIZE / 2.0,
    );
    let candidate = Point::new(
        center.x + rng.uniform(-SPAWN_JITTER, SPAWN_JITTER),
        center.y + rng.uniform(-SPAWN_JITTER, SPAWN_JITTER),
    );
    bounds.clamp_origin(candidate, NOTE_SIZE)
}

/// Pick a position for a new note.
///
/// `bounds` is `None` while the board surface has not been laid out yet; in
/// that case a fixed fallback position is returned rather than failing.
pub fn plan_spawn(
    bounds: Option<BoardBounds>,
    existing: &[Note],
    rng: &mut dyn SpawnRng,
) -> Point {
    let Some(bounds) = bounds else {
        return Point::new(FALLBACK_SPAWN.0, FALLBACK_SPAWN.1);
    };

    // Probe phase: the initial candidate plus up to SPAWN_PROBES redraws.
    let mut candidate = jittered_center(bounds, rng);
    for _ in 0..SPAWN_PROBES {
        if !too_close(candidate, existing) {
            return candidate;
        }
        candidate = jittered_center(bounds, rng);
    }

    // Repulsion phase: push the last candidate away from every neighbor,
    // one summed step per iteration, clamped back onto the board.
    let mut pos = candidate;
    for _ in 0..REPULSION_STEPS {
        if !too_close(pos, existing) {
            break;
        }
        let mut push_x = 0.0;
        let mut push_y = 0.0;
        for n in existing {
            let dx = (pos.x + NOTE_SIZE / 2.0) - (n.pos.x + NOTE_SIZE / 2.0);
            let dy = (pos.y + NOTE_SIZE / 2.0) - (n.pos.y + NOTE_SIZE / 2.0);
            let dist = (dx * dx + dy * dy).sqrt();
            // coincident centers push along +x so a stacked candidate
            // always moves
            let (ux, uy) = if dist == 0.0 {
                (1.0, 0.0)
            } else {
                (dx / dist, dy / dist)
            };
            push_x += ux * REPULSION_PUSH;
            push_y += uy * REPULSION_PUSH;
        }
        pos = bounds.clamp_origin(Point::new(pos.x + push_x, pos.y + push_y), NOTE_SIZE);
    }
    pos
}

#[cfg(test)]
pub(crate) mod test_rng {
    use super::SpawnRng;

    /// Replays a scripted list of draws, then repeats the last one.
    pub struct ScriptedRng {
        draws: Vec<f64>,
        at: usize,
    }

    impl ScriptedRng {
        pub fn new(draws: Vec<f64>) -> Self {
            Self { draws, at: 0 }
        }

        /// Every draw returns the same value.
        pub fn constant(v: f64) -> Self {
            Self::new(vec![v])
        }
    }

    impl SpawnRng for ScriptedRng {
        fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
            let raw = self.draws[self.at.min(self.draws.len() - 1)];
            self.at += 1;
            raw.clamp(lo, hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_rng::ScriptedRng;
    use super::*;
    use crate::note::{NoteColor, NoteId, NoteStyle};
    use crate::richtext::RichText;

    fn note(id: u64, x: f64, y: f64) -> Note {
        Note {
            id: NoteId(id),
            content: RichText::plain("n"),
            color: NoteColor::Yellow,
            style: NoteStyle::Plain,
            pos: Point::new(x, y),
            tilt: 0.0,
            shadow_depth: 2,
            z: 0,
        }
    }

    #[test]
    fn no_bounds_yields_the_fallback_position() {
        let mut rng = ScriptedRng::constant(0.0);
        let p = plan_spawn(None, &[], &mut rng);
        assert_eq!((p.x, p.y), FALLBACK_SPAWN);
    }

    #[test]
    fn empty_board_lands_inside_the_jitter_box() {
        let bounds = BoardBounds::new(900.0, 540.0);
        let center = Point::new(
            bounds.width / 2.0 - NOTE_SIZE / 2.0,
            bounds.height / 2.0 - NOTE_SIZE / 2.0,
        );
        let mut rng = ScriptedRng::new(vec![87.0, -42.0]);
        let p = plan_spawn(Some(bounds), &[], &mut rng);
        assert_eq!(p.x, center.x + 87.0);
        assert_eq!(p.y, center.y - 42.0);
        assert!(p.x >= center.x - SPAWN_JITTER && p.x <= center.x + SPAWN_JITTER);
        assert!(p.y >= center.y - SPAWN_JITTER && p.y <= center.y + SPAWN_JITTER);
    }

    #[test]
    fn jitter_near_the_edge_is_clamped_into_bounds() {
        // a small board where the jitter box extends past the right edge
        let bounds = BoardBounds::new(300.0, 300.0);
        let mut rng = ScriptedRng::constant(100.0);
        let p = plan_spawn(Some(bounds), &[], &mut rng);
        assert!(p.x <= bounds.width - NOTE_SIZE);
        assert!(p.y <= bounds.height - NOTE_SIZE);
    }

    #[test]
    fn probe_phase_redraws_until_one_axis_clears() {
        let bounds = BoardBounds::new(900.0, 540.0);
        // sits left of center, close enough that a zero-jitter candidate
        // conflicts on both axes
        let existing = vec![note(1, 250.0, 180.0)];
        // first candidate collides (0 jitter), the redraw clears on x
        let mut rng = ScriptedRng::new(vec![0.0, 0.0, 100.0, -100.0]);
        let p = plan_spawn(Some(bounds), &existing, &mut rng);
        assert_eq!(p, Point::new(460.0, 80.0));
    }

    #[test]
    fn repulsion_terminates_on_a_saturated_board() {
        // tile the whole surface at MIN_SEPARATION spacing so every
        // candidate is too close to something
        let bounds = BoardBounds::new(900.0, 540.0);
        let mut existing = Vec::new();
        let mut id = 1;
        let mut y = 0.0;
        while y <= bounds.height - NOTE_SIZE {
            let mut x = 0.0;
            while x <= bounds.width - NOTE_SIZE {
                existing.push(note(id, x, y));
                id += 1;
                x += MIN_SEPARATION - 1.0;
            }
            y += MIN_SEPARATION - 1.0;
        }
        let mut rng = ScriptedRng::constant(0.0);
        let p = plan_spawn(Some(bounds), &existing, &mut rng);
        assert!(p.x >= 0.0 && p.x <= bounds.width - NOTE_SIZE);
        assert!(p.y >= 0.0 && p.y <= bounds.height - NOTE_SIZE);
    }

    #[test]
    fn coincident_centers_still_separate() {
        let bounds = BoardBounds::new(900.0, 540.0);
        let existing = vec![note(1, 360.0, 180.0)];
        // every probe lands exactly on the existing note
        let mut rng = ScriptedRng::constant(0.0);
        let p = plan_spawn(Some(bounds), &existing, &mut rng);
        let dx = (p.x - 360.0).abs();
        let dy = (p.y - 180.0).abs();
        assert!(dx >= MIN_SEPARATION || dy >= MIN_SEPARATION);
    }

    #[test]
    fn decorative_draws_stay_in_range() {
        let mut rng = ScriptedRng::new(vec![3.987, 4.9]);
        assert_eq!(draw_tilt(&mut rng), 3.99);
        assert_eq!(draw_shadow_depth(&mut rng), 4);

        let mut rng = ScriptedRng::new(vec![-9.0, 5.9]);
        assert_eq!(draw_tilt(&mut rng), -NOTE_TILT_RANGE);
        assert_eq!(draw_shadow_depth(&mut rng), SHADOW_MAX);
    }
}
