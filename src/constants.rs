//! Shared layout constants.
//! Centralizes the default radii and offsets used by the compiler, the layout
//! pass and the constraint engine.

// Default radii (model units)
/// Radius of the sentence circle.
pub const SENTENCE_RADIUS: f64 = 450.0;
/// Radius of a word circle.
pub const WORD_RADIUS: f64 = 100.0;
/// Radius of a consonant circle.
pub const CONSONANT_RADIUS: f64 = 20.0;
/// Radius of a vocal circle.
pub const VOCAL_RADIUS: f64 = 10.0;
/// Radius of a decoration dot.
pub const DOT_RADIUS: f64 = 2.5;

// Radial offsets
/// Inset of word circles from the sentence edge.
pub const WORD_DISTANCE_INSET: f64 = 150.0;
/// Inset of decoration dots from their letter's edge.
pub const DOT_DISTANCE_INSET: f64 = 10.0;
/// Clearance kept between a circle and the circle it sits next to.
pub const CIRCLE_CLEARANCE: f64 = 5.0;

// Placement bands
/// Fraction of a consonant radius that stays inside the word on a deep cut.
pub const DEEP_CUT_OVERLAP: f64 = 0.625;
/// Fraction of a consonant radius that pokes outside the word on a shallow cut.
pub const SHALLOW_CUT_OVERSHOOT: f64 = 0.5;
/// Slack factor bounding how far a cut letter may slide radially.
pub const CUT_RANGE_FACTOR: f64 = 0.95;

// Decorations
/// Angular step between adjacent dots or line slots, in degrees.
pub const DECORATION_ANGLE_STEP: f64 = -45.0;
