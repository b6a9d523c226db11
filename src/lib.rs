//! # Circlescript
//!
//! A compiler and constraint engine for a constructed circular writing
//! system. Sentences become nested circles: a sentence circle holds word
//! circles, words hold letter circles, and letters carry decoration dots
//! and line slots. The library covers:
//! - **Compilation**: segmenting text into words and letter tokens
//!   (digraphs first), classifying each letter, and building the entity
//!   tree with an aesthetically valid initial layout
//! - **Constraints**: deriving the legal angle and distance window for any
//!   node, so interactive edits can never make the script unreadable
//! - **Interaction**: applying drag deltas and numeric edits through the
//!   constraint clamp and propagating them to dependent nodes
//!
//! Rendering, gesture capture and state-container wiring are external
//! concerns; the library only consumes a sentence string, per-node position
//! edits and the viewport scale.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod compiler;
mod constants;
mod constraints;
mod interaction;
mod layout;
mod letters;
mod math;
mod segment;
mod types;

// Re-export public types and functions
pub use compiler::compile;
pub use constants::*;
pub use constraints::{compute_constraints, AngleRange, Constraints, DistanceRange};
pub use interaction::{apply_move, GestureState, Interaction, MoveRequest, Patch};
pub use layout::apply_initial_layout;
pub use letters::{
    classify, consonant_decoration, consonant_placement, is_double_letter, is_valid_letter,
    is_vocal, vocal_decoration, vocal_placement, Classification,
};
pub use math::{
    angle_between, angular_distance, circle_intersections, clamp_angle, normalize_angle,
    polar_to_vector, rotate, signed_angular_difference, to_degree, to_radian, vector_to_polar,
    Vec2,
};
pub use segment::{segment_sentence, split_word_to_chars};
pub use types::*;
