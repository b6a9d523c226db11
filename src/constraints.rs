//! Constraint engine.
//!
//! Derives, for any selectable node, the legal window for its angle and its
//! distance, and clamps proposed positions into that window. Angle windows
//! come from the node's angular neighbors among its siblings, so a node can
//! never cross past an adjacent sibling; distance windows depend on the
//! node's placement band. Angle clamping is circular (nearest bound by
//! wrap-around distance), distance clamping is linear.

use crate::constants::CUT_RANGE_FACTOR;
use crate::math::{clamp_angle, normalize_angle};
use crate::types::{
    ConsonantPlacement, Node, NodeId, PositionData, SentenceTree, VocalPlacement,
};
use serde::{Deserialize, Serialize};

/// Legal angular window, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    /// Smallest allowed angle
    pub min: f64,
    /// Largest allowed angle
    pub max: f64,
}

impl AngleRange {
    /// The open window covering the whole circle.
    pub fn open() -> Self {
        Self {
            min: 0.0,
            max: 360.0,
        }
    }
}

/// Legal radial window. A window with `min == max` is rigid: distance edits
/// leave the node where it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    /// Smallest allowed distance
    pub min: f64,
    /// Largest allowed distance
    pub max: f64,
}

impl DistanceRange {
    /// A rigid window pinning the distance to its current value.
    pub fn rigid(distance: f64) -> Self {
        Self {
            min: distance,
            max: distance,
        }
    }
}

/// The combined constraint window for one node. A `distance` of `None`
/// means the radial offset is unconstrained (only the sentence root, which
/// has no parent to be constrained against).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Angular window
    pub angle: AngleRange,
    /// Radial window, if any
    pub distance: Option<DistanceRange>,
}

impl Constraints {
    /// Clamps a candidate position into this window.
    pub fn clamp(&self, candidate: PositionData) -> PositionData {
        PositionData {
            angle: clamp_angle(candidate.angle, self.angle.min, self.angle.max),
            distance: match self.distance {
                Some(range) => candidate.distance.clamp(range.min, range.max),
                None => candidate.distance,
            },
        }
    }
}

/// Derives the constraint window for a node or line slot.
///
/// # Panics
///
/// Panics if the id is in neither the node map nor the slot map; ids are
/// internally generated, so that is an integration defect.
pub fn compute_constraints(tree: &SentenceTree, id: NodeId) -> Constraints {
    if let Some(node) = tree.nodes.get(&id) {
        return match node {
            Node::Sentence(_) => Constraints {
                angle: AngleRange::open(),
                distance: None,
            },
            Node::Word(word) => {
                let sentence = tree.sentence();
                Constraints {
                    angle: sibling_angle_window(&node_angles(tree, &sentence.words), id),
                    distance: Some(DistanceRange {
                        min: 0.0,
                        max: sentence.circle.r - word.circle.r,
                    }),
                }
            }
            Node::Consonant(consonant) => {
                let word = tree
                    .node(consonant.parent_id)
                    .as_word()
                    .unwrap_or_else(|| panic!("consonant {id} is not parented to a word"));
                Constraints {
                    angle: sibling_angle_window(&node_angles(tree, &word.letters), id),
                    distance: Some(consonant_distance_range(
                        consonant.placement,
                        word.circle.r,
                        consonant.circle.r,
                        consonant.circle.distance,
                    )),
                }
            }
            Node::Vocal(vocal) => match tree.node(vocal.parent_id) {
                Node::Word(word) => Constraints {
                    angle: sibling_angle_window(&node_angles(tree, &word.letters), id),
                    distance: Some(vocal_distance_range(
                        vocal.placement,
                        word.circle.r,
                        vocal.circle.r,
                        vocal.circle.distance,
                    )),
                },
                // A nested vocal has no siblings; its distance window stays
                // expressed against the word circle, matching its position
                // frame.
                Node::Consonant(consonant) => {
                    let word_r = tree
                        .node(consonant.parent_id)
                        .as_word()
                        .unwrap_or_else(|| panic!("consonant is not parented to a word"))
                        .circle
                        .r;
                    Constraints {
                        angle: AngleRange::open(),
                        distance: Some(vocal_distance_range(
                            vocal.placement,
                            word_r,
                            vocal.circle.r,
                            vocal.circle.distance,
                        )),
                    }
                }
                _ => panic!("vocal {id} has an invalid parent"),
            },
            Node::Dot(dot) => Constraints {
                angle: AngleRange {
                    min: dot.circle.angle,
                    max: dot.circle.angle,
                },
                distance: Some(DistanceRange::rigid(dot.circle.distance)),
            },
        };
    }

    let slot = tree
        .line_slots
        .get(&id)
        .unwrap_or_else(|| panic!("unknown node id {id}"));
    let siblings = tree.node(slot.parent_id).line_slots();
    let angles: Vec<(NodeId, f64)> = siblings
        .iter()
        .map(|slot_id| (*slot_id, tree.line_slot(*slot_id).angle))
        .collect();
    Constraints {
        angle: sibling_angle_window(&angles, id),
        distance: Some(DistanceRange::rigid(slot.distance)),
    }
}

fn node_angles(tree: &SentenceTree, siblings: &[NodeId]) -> Vec<(NodeId, f64)> {
    siblings
        .iter()
        .map(|sibling| (*sibling, tree.node(*sibling).circle().angle))
        .collect()
}

/// Angle window bounded by the node's angular neighbors: the sibling just
/// below bounds from below, the sibling just above bounds from above, and
/// the extremes open up to 0 and 360.
fn sibling_angle_window(siblings: &[(NodeId, f64)], id: NodeId) -> AngleRange {
    let mut sorted: Vec<(NodeId, f64)> = siblings
        .iter()
        .map(|&(sibling, angle)| (sibling, normalize_angle(angle)))
        .collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let position = sorted
        .iter()
        .position(|&(sibling, _)| sibling == id)
        .unwrap_or_else(|| panic!("node {id} is not among its own siblings"));

    AngleRange {
        min: if position == 0 {
            0.0
        } else {
            sorted[position - 1].1
        },
        max: if position + 1 == sorted.len() {
            360.0
        } else {
            sorted[position + 1].1
        },
    }
}

fn consonant_distance_range(
    placement: ConsonantPlacement,
    word_r: f64,
    r: f64,
    current: f64,
) -> DistanceRange {
    match placement {
        ConsonantPlacement::DeepCut => DistanceRange {
            min: word_r - CUT_RANGE_FACTOR * r,
            max: word_r - r / 2.0,
        },
        ConsonantPlacement::ShallowCut => DistanceRange {
            min: word_r,
            max: word_r + CUT_RANGE_FACTOR * r,
        },
        ConsonantPlacement::Inside => DistanceRange {
            min: 0.0,
            max: word_r - r,
        },
        ConsonantPlacement::OnLine => DistanceRange::rigid(current),
    }
}

fn vocal_distance_range(
    placement: VocalPlacement,
    word_r: f64,
    r: f64,
    current: f64,
) -> DistanceRange {
    match placement {
        VocalPlacement::Inside => DistanceRange {
            min: 0.0,
            max: word_r - r,
        },
        VocalPlacement::Outside => DistanceRange {
            min: word_r + r,
            max: f64::INFINITY,
        },
        VocalPlacement::OnLine => DistanceRange::rigid(current),
    }
}
