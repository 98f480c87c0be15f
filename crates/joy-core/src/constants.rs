// Shared simulation/interaction tuning constants.
//
// Time values are milliseconds unless suffixed otherwise; "frames" are 60 Hz
// display frames, the unit every life/velocity in the field is expressed in.

// Pool capacities
pub const MAX_PARTICLES: usize = 1400;
pub const MAX_RINGS: usize = 120;
pub const MAX_RIBBONS: usize = 14;
pub const MAX_BUBBLES: usize = 90;

// Global intensity
pub const INTENSITY_MIN: f32 = 0.3;
pub const INTENSITY_MAX: f32 = 1.6;
pub const INTENSITY_DEFAULT: f32 = 1.0;
pub const INTENSITY_STEP: f32 = 0.1; // keyboard nudge

// Frame timing
pub const FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_STEP: f32 = 4.0; // frames; caps catch-up after a stalled tab

// Particle defaults
pub const PARTICLE_SPEED_RANGE: (f32, f32) = (0.4, 2.4);
pub const PARTICLE_LIFE_RANGE: (f32, f32) = (34.0, 78.0);
pub const PARTICLE_RADIUS_RANGE: (f32, f32) = (1.2, 3.8);
pub const PARTICLE_DRAG: f32 = 0.985;
pub const PARTICLE_GRAVITY: f32 = 0.012;
pub const CULL_MARGIN: f32 = 60.0; // particles leaving the viewport by more than this die

// Ring defaults
pub const RING_RADIUS_RANGE: (f32, f32) = (6.0, 16.0);
pub const RING_WIDTH_RANGE: (f32, f32) = (2.0, 4.0);
pub const RING_LIFE: f32 = 30.0;
pub const RING_GROWTH_PER_FRAME: f32 = 1.95;

// Bubble defaults and physics
pub const BUBBLE_RADIUS_RANGE: (f32, f32) = (12.0, 30.0);
pub const BUBBLE_LIFE_RANGE: (f32, f32) = (40.0 * 60.0, 95.0 * 60.0);
pub const BUBBLE_DRAG: f32 = 0.992;
pub const BUBBLE_WOBBLE: f32 = 0.004;
pub const BUBBLE_BOUNCE: f32 = 0.85; // velocity kept after hitting an edge
pub const BUBBLE_MIN_RADIUS: f32 = 2.0;
pub const BUBBLE_SLICE_MIN_RADIUS: f32 = 9.0; // sliced bubbles below this pop
pub const BUBBLE_SLICE_SHRINK: f32 = 0.6;
pub const BUBBLE_SLICE_SPEED: f32 = 0.75; // px per ms
pub const BUBBLE_WAND_RADIUS: f32 = 170.0;

// Ribbons
pub const RIBBON_LIFE: f32 = 88.0;
pub const RIBBON_WIDTH: f32 = 7.8;
pub const RIBBON_LIVE_WIDTH: f32 = 8.4;
pub const RIBBON_PATH_CAP: usize = 220;
pub const RIBBON_MIN_SPACING: f32 = 3.0;
pub const RIBBON_MIN_POINTS: usize = 6; // strokes need more points than this

// Pointer tracking
pub const MIN_MOVE_DT_MS: f64 = 8.0;
pub const SPEED_SMOOTHING: f32 = 0.35;
pub const TAP_DISTANCE: f32 = 18.0;

// Scoring
pub const COMBO_WINDOW_MS: f64 = 1250.0;
pub const COMBO_MAX: u32 = 9;
pub const CELEBRATION_STEP: u64 = 160;
pub const CELEBRATION_COOLDOWN_MS: f64 = 2200.0;

// Status text
pub const STATUS_INTERVAL_MS: f64 = 900.0;

// Background
pub const HUE_SHIFT_PER_FRAME: f32 = 0.08;
pub const AMBIENT_PARTICLES: usize = 90;
