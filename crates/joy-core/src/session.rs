//! Per-pointer session state and the table that owns live sessions.
//!
//! A session exists exactly while its pointer is pressed: it is inserted on
//! pointer-down and removed on pointer-up or cancel. Nothing expires
//! sessions behind the caller's back.

use crate::constants::{
    MIN_MOVE_DT_MS, RIBBON_MIN_SPACING, RIBBON_PATH_CAP, SPEED_SMOOTHING,
};
use crate::modes::Mode;
use crate::random::lerp;
use fnv::FnvHashMap;
use glam::Vec2;

/// Stable identifier of a pointer for the duration of one press.
pub type PointerId = i32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub pos: Vec2,
    pub t_ms: f64,
}

/// Minimum-interval gate for one emission channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cooldown {
    last_ms: Option<f64>,
}

impl Cooldown {
    /// True (and re-armed) if more than `interval_ms` passed since the last fire.
    pub fn ready(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last <= interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct PointerSession {
    pub id: PointerId,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub last_t_ms: f64,
    /// Total distance travelled since pointer-down.
    pub drag_distance: f32,
    /// Smoothed speed in surface units per millisecond.
    pub speed: f32,
    /// Frozen at pointer-down.
    pub mode: Mode,
    pub hue: f32,
    pub seed: f32,
    pub trail: Cooldown,
    pub tone: Cooldown,
    pub haptic: Cooldown,
    path: Vec<PathSample>,
}

impl PointerSession {
    pub fn new(id: PointerId, pos: Vec2, now_ms: f64, mode: Mode, hue: f32, seed: f32) -> Self {
        Self {
            id,
            pos,
            prev_pos: pos,
            last_t_ms: now_ms,
            drag_distance: 0.0,
            speed: 0.0,
            mode,
            hue,
            seed,
            trail: Cooldown::default(),
            tone: Cooldown::default(),
            haptic: Cooldown::default(),
            path: Vec::new(),
        }
    }

    /// Move to `pos`, accumulating drag distance and smoothing speed.
    /// Returns the displacement since the previous position.
    pub fn advance(&mut self, pos: Vec2, now_ms: f64) -> Vec2 {
        let pos = if pos.is_finite() { pos } else { self.pos };
        let delta = pos - self.pos;
        let dist = delta.length();
        let dt = (now_ms - self.last_t_ms).max(MIN_MOVE_DT_MS) as f32;
        self.prev_pos = self.pos;
        self.pos = pos;
        self.drag_distance += dist;
        self.speed = lerp(self.speed, dist / dt, SPEED_SMOOTHING);
        self.last_t_ms = now_ms;
        delta
    }

    /// Append a path sample unless it sits within the minimum spacing of the
    /// last one. The buffer keeps the most recent samples only.
    pub fn record_point(&mut self, pos: Vec2, now_ms: f64) -> bool {
        if let Some(last) = self.path.last() {
            if pos.distance(last.pos) < RIBBON_MIN_SPACING {
                return false;
            }
        }
        self.path.push(PathSample { pos, t_ms: now_ms });
        if self.path.len() > RIBBON_PATH_CAP {
            self.path.remove(0);
        }
        true
    }

    pub fn path(&self) -> &[PathSample] {
        &self.path
    }

    pub fn path_points(&self) -> Vec<Vec2> {
        self.path.iter().map(|s| s.pos).collect()
    }
}

#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: FnvHashMap<PointerId, PointerSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, handing back any session already held for that id.
    pub fn insert(&mut self, session: PointerSession) -> Option<PointerSession> {
        self.sessions.insert(session.id, session)
    }

    pub fn get(&self, id: PointerId) -> Option<&PointerSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: PointerId) -> Option<&mut PointerSession> {
        self.sessions.get_mut(&id)
    }

    pub fn remove(&mut self, id: PointerId) -> Option<PointerSession> {
        self.sessions.remove(&id)
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerSession> {
        self.sessions.values()
    }
}
