//! Initial layout calculation.
//!
//! Fills in the angle and distance of every node of a freshly built tree:
//! children are distributed evenly around their parent (clockwise), radial
//! offsets follow each letter's placement band, and decorations fan out
//! around their letter's back side. The pass is deterministic; running it
//! again over the same structure produces the same numbers.

use crate::constants::*;
use crate::math::normalize_angle;
use crate::types::{
    ConsonantPlacement, Node, NodeId, PositionData, SentenceTree, VocalDecoration, VocalPlacement,
};

/// Angle of child `index` among `count` evenly spread children.
///
/// The step is negative so the children accumulate clockwise; the result is
/// normalized into `[0, 360)`.
fn evenly_spread_angle(index: usize, count: usize) -> f64 {
    normalize_angle(index as f64 * (-360.0 / count as f64))
}

/// Fan of `count` angles centered on `center`, one decoration step apart.
fn fan_angles(center: f64, count: usize) -> Vec<f64> {
    let start = center - DECORATION_ANGLE_STEP * (count as f64 - 1.0) / 2.0;
    (0..count)
        .map(|i| normalize_angle(start + DECORATION_ANGLE_STEP * i as f64))
        .collect()
}

/// Radial offset of a consonant from the word center, per placement band.
fn consonant_distance(placement: ConsonantPlacement, word_r: f64, r: f64) -> f64 {
    match placement {
        ConsonantPlacement::DeepCut => word_r - DEEP_CUT_OVERLAP * r,
        ConsonantPlacement::ShallowCut => word_r + SHALLOW_CUT_OVERSHOOT * r,
        ConsonantPlacement::Inside => word_r - 2.0 * r - CIRCLE_CLEARANCE,
        ConsonantPlacement::OnLine => word_r,
    }
}

/// Radial offset of a top-level vocal from the word center, per placement.
fn vocal_distance(placement: VocalPlacement, word_r: f64, r: f64) -> f64 {
    match placement {
        VocalPlacement::Outside => word_r + r + CIRCLE_CLEARANCE,
        VocalPlacement::Inside => word_r - r - CIRCLE_CLEARANCE,
        VocalPlacement::OnLine => word_r,
    }
}

/// Position of a vocal nested inside a consonant.
///
/// Expressed in the owning word's polar frame: an Outside vocal pokes out
/// radially past the word boundary at the consonant's angle, independent of
/// the consonant's own radial offset; an Inside vocal nests concentric with
/// the consonant, shifted inward by the consonant's diameter; an OnLine
/// vocal under a shallow cut sits exactly on the word line, and otherwise
/// copies the consonant's position unchanged.
pub(crate) fn nested_vocal_position(
    consonant_position: PositionData,
    consonant_placement: ConsonantPlacement,
    consonant_r: f64,
    vocal_placement: VocalPlacement,
    vocal_r: f64,
    word_r: f64,
) -> PositionData {
    match vocal_placement {
        VocalPlacement::Outside => PositionData {
            angle: consonant_position.angle,
            distance: word_r + vocal_r + CIRCLE_CLEARANCE,
        },
        VocalPlacement::Inside => PositionData {
            angle: consonant_position.angle,
            distance: consonant_position.distance - 2.0 * consonant_r,
        },
        VocalPlacement::OnLine => {
            if consonant_placement == ConsonantPlacement::ShallowCut {
                PositionData {
                    angle: consonant_position.angle,
                    distance: word_r,
                }
            } else {
                consonant_position
            }
        }
    }
}

/// Positions of a letter's decoration dots and line slots, derived from the
/// letter's current angle.
///
/// Dots and inward-pointing slots are centered on the letter's back side
/// (its angle minus 180); a vocal's LineOutside slot points away from the
/// parent instead. Dots sit slightly inside the letter circle, slots sit
/// exactly on its boundary.
pub(crate) fn letter_decoration_positions(
    tree: &SentenceTree,
    letter_id: NodeId,
) -> Vec<(NodeId, PositionData)> {
    let mut positions = Vec::new();
    match tree.node(letter_id) {
        Node::Consonant(consonant) => {
            let angle = consonant.circle.angle;
            let r = consonant.circle.r;
            for (dot_id, dot_angle) in consonant
                .dots
                .iter()
                .zip(fan_angles(angle - 180.0, consonant.dots.len()))
            {
                positions.push((
                    *dot_id,
                    PositionData {
                        angle: dot_angle,
                        distance: r - DOT_DISTANCE_INSET,
                    },
                ));
            }
            for (slot_id, slot_angle) in consonant
                .line_slots
                .iter()
                .zip(fan_angles(angle - 180.0, consonant.line_slots.len()))
            {
                positions.push((
                    *slot_id,
                    PositionData {
                        angle: slot_angle,
                        distance: r,
                    },
                ));
            }
        }
        Node::Vocal(vocal) => {
            let point_outside = vocal.decoration == VocalDecoration::LineOutside;
            let center = if point_outside {
                vocal.circle.angle
            } else {
                vocal.circle.angle - 180.0
            };
            for (slot_id, slot_angle) in vocal
                .line_slots
                .iter()
                .zip(fan_angles(center, vocal.line_slots.len()))
            {
                positions.push((
                    *slot_id,
                    PositionData {
                        angle: slot_angle,
                        distance: vocal.circle.r,
                    },
                ));
            }
        }
        _ => {}
    }
    positions
}

/// Computes the initial position of every node in a freshly built tree.
pub fn apply_initial_layout(tree: &mut SentenceTree) {
    let sentence = tree.sentence();
    let sentence_r = sentence.circle.r;
    let word_ids = sentence.words.clone();
    let word_count = word_ids.len();

    for (i, word_id) in word_ids.iter().enumerate() {
        let position = PositionData {
            angle: evenly_spread_angle(i, word_count),
            distance: sentence_r - WORD_DISTANCE_INSET,
        };
        tree.node_mut(*word_id).circle_mut().set_position(position);
        layout_word(tree, *word_id);
    }
}

fn layout_word(tree: &mut SentenceTree, word_id: NodeId) {
    let (letter_ids, word_r) = match tree.node(word_id) {
        Node::Word(word) => (word.letters.clone(), word.circle.r),
        _ => unreachable!("sentence children are words"),
    };
    let letter_count = letter_ids.len();

    for (i, letter_id) in letter_ids.iter().enumerate() {
        let angle = evenly_spread_angle(i, letter_count);
        let position = match tree.node(*letter_id) {
            Node::Consonant(consonant) => PositionData {
                angle,
                distance: consonant_distance(consonant.placement, word_r, consonant.circle.r),
            },
            Node::Vocal(vocal) => PositionData {
                angle,
                distance: vocal_distance(vocal.placement, word_r, vocal.circle.r),
            },
            _ => unreachable!("word children are letters"),
        };
        tree.node_mut(*letter_id).circle_mut().set_position(position);

        layout_nested_vocal(tree, *letter_id, word_r);
        apply_decoration_layout(tree, *letter_id);
    }
}

fn layout_nested_vocal(tree: &mut SentenceTree, letter_id: NodeId, word_r: f64) {
    let Some(consonant) = tree.node(letter_id).as_consonant() else {
        return;
    };
    let Some(vocal_id) = consonant.vocal else {
        return;
    };
    let consonant_position = consonant.circle.position();
    let consonant_placement = consonant.placement;
    let consonant_r = consonant.circle.r;

    let vocal = match tree.node(vocal_id) {
        Node::Vocal(v) => v,
        _ => unreachable!("nested child is a vocal"),
    };
    let position = nested_vocal_position(
        consonant_position,
        consonant_placement,
        consonant_r,
        vocal.placement,
        vocal.circle.r,
        word_r,
    );
    tree.node_mut(vocal_id).circle_mut().set_position(position);
    apply_decoration_layout(tree, vocal_id);
}

fn apply_decoration_layout(tree: &mut SentenceTree, letter_id: NodeId) {
    for (id, position) in letter_decoration_positions(tree, letter_id) {
        if let Some(node) = tree.nodes.get_mut(&id) {
            node.circle_mut().set_position(position);
        } else {
            tree.line_slot_mut(id).set_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn only_letter(tree: &crate::types::SentenceTree) -> NodeId {
        let word_id = tree.sentence().words[0];
        tree.node(word_id).as_word().expect("word").letters[0]
    }

    #[test]
    fn test_words_spread_clockwise_at_fixed_inset() {
        let tree = compile("ba ka na sa");
        let sentence = tree.sentence();
        assert_eq!(sentence.words.len(), 4);

        let expected_angles = [0.0, 270.0, 180.0, 90.0];
        for (word_id, expected) in sentence.words.iter().zip(expected_angles) {
            let circle = tree.node(*word_id).circle();
            assert_close(circle.angle, expected);
            assert_close(circle.distance, SENTENCE_RADIUS - WORD_DISTANCE_INSET);
        }
    }

    #[test]
    fn test_seven_word_angles_normalize() {
        let tree = compile("ba ba ba ba ba ba ba");
        let second = tree.sentence().words[1];
        assert_close(
            tree.node(second).circle().angle,
            360.0 - 360.0 / 7.0,
        );
    }

    #[test]
    fn test_consonant_distances_per_placement() {
        // b: deep cut, j: inside, t: shallow cut, th: on line
        for (text, expected) in [
            ("b", WORD_RADIUS - DEEP_CUT_OVERLAP * CONSONANT_RADIUS),
            ("j", WORD_RADIUS - 2.0 * CONSONANT_RADIUS - CIRCLE_CLEARANCE),
            ("t", WORD_RADIUS + SHALLOW_CUT_OVERSHOOT * CONSONANT_RADIUS),
            ("th", WORD_RADIUS),
        ] {
            let tree = compile(text);
            let circle = tree.node(only_letter(&tree)).circle();
            assert_close(circle.distance, expected);
            assert_close(circle.angle, 0.0);
        }
    }

    #[test]
    fn test_vocal_distances_per_placement() {
        for (text, expected) in [
            ("a", WORD_RADIUS + VOCAL_RADIUS + CIRCLE_CLEARANCE),
            ("o", WORD_RADIUS - VOCAL_RADIUS - CIRCLE_CLEARANCE),
            ("e", WORD_RADIUS),
        ] {
            let tree = compile(text);
            let circle = tree.node(only_letter(&tree)).circle();
            assert_close(circle.distance, expected);
        }
    }

    #[test]
    fn test_nested_outside_vocal_pokes_past_word_boundary() {
        let tree = compile("ba");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        let vocal = tree
            .node(consonant.vocal.expect("nested vocal"))
            .circle();
        assert_close(vocal.angle, consonant.circle.angle);
        assert_close(vocal.distance, WORD_RADIUS + VOCAL_RADIUS + CIRCLE_CLEARANCE);
    }

    #[test]
    fn test_nested_inside_vocal_shifts_inward_by_consonant_diameter() {
        let tree = compile("bo");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        let vocal = tree.node(consonant.vocal.expect("nested vocal")).circle();
        assert_close(
            vocal.distance,
            consonant.circle.distance - 2.0 * CONSONANT_RADIUS,
        );
    }

    #[test]
    fn test_nested_online_vocal_under_shallow_cut_sits_on_word_line() {
        let tree = compile("te");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        let vocal = tree.node(consonant.vocal.expect("nested vocal")).circle();
        assert_close(vocal.distance, WORD_RADIUS);
        assert_close(vocal.angle, consonant.circle.angle);
    }

    #[test]
    fn test_nested_online_vocal_elsewhere_copies_consonant_position() {
        let tree = compile("be");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        let vocal = tree.node(consonant.vocal.expect("nested vocal")).circle();
        assert_close(vocal.distance, consonant.circle.distance);
        assert_close(vocal.angle, consonant.circle.angle);
    }

    #[test]
    fn test_dots_fan_on_letter_back_side() {
        // d carries a triple dot; the single letter sits at angle 0, so the
        // fan centers on 180.
        let tree = compile("d");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        assert_eq!(consonant.dots.len(), 3);

        let angles: Vec<f64> = consonant
            .dots
            .iter()
            .map(|id| tree.node(*id).circle().angle)
            .collect();
        assert_close(angles[0], 225.0);
        assert_close(angles[1], 180.0);
        assert_close(angles[2], 135.0);
        for id in &consonant.dots {
            assert_close(
                tree.node(*id).circle().distance,
                CONSONANT_RADIUS - DOT_DISTANCE_INSET,
            );
        }
    }

    #[test]
    fn test_line_slots_sit_on_letter_boundary() {
        let tree = compile("g");
        let consonant = tree.node(only_letter(&tree)).as_consonant().expect("consonant");
        assert_eq!(consonant.line_slots.len(), 1);

        let slot = tree.line_slot(consonant.line_slots[0]);
        assert_close(slot.angle, 180.0);
        assert_close(slot.distance, CONSONANT_RADIUS);
    }

    #[test]
    fn test_line_outside_slot_points_away_from_parent() {
        let tree = compile("u");
        let vocal = tree.node(only_letter(&tree)).as_vocal().expect("vocal");
        assert_eq!(vocal.line_slots.len(), 1);

        let slot = tree.line_slot(vocal.line_slots[0]);
        assert_close(slot.angle, 0.0);
        assert_close(slot.distance, VOCAL_RADIUS);
    }
}
