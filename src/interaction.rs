//! Move/update orchestration.
//!
//! Applies interactive position edits to a single node: converts a drag
//! delta from screen to model space, clamps the candidate position through
//! the constraint engine, commits it, and recomputes the node's declared
//! dependents (decoration dots and line slots, and a consonant's nested
//! vocal). Every edit returns an explicit patch list of the node plus its
//! dependents; nothing else in the tree is touched.
//!
//! The per-gesture state machine lives here too: Idle, Selected and
//! Dragging, with the selected node's constraint window derived on
//! selection.

use crate::constraints::{compute_constraints, Constraints};
use crate::layout::{letter_decoration_positions, nested_vocal_position};
use crate::math::{normalize_angle, polar_to_vector, vector_to_polar, Vec2};
use crate::types::{ConsonantPlacement, Node, NodeId, PositionData, SentenceTree, VocalPlacement};
use log::trace;

/// An interactive position edit for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveRequest {
    /// A drag delta in screen space, divided by the viewport zoom scale to
    /// reach model space.
    Drag {
        /// Screen-space movement since the last move event
        delta: Vec2,
        /// Current viewport zoom scale
        viewport_scale: f64,
    },
    /// A typed numeric edit. Fields left as `None` keep their current value.
    Absolute {
        /// New angle in degrees, if edited
        angle: Option<f64>,
        /// New distance, if edited
        distance: Option<f64>,
    },
}

/// One committed position change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    /// The node or line slot that moved
    pub id: NodeId,
    /// Its committed position
    pub position: PositionData,
}

/// Applies a position edit to a node, clamped by its constraints, and
/// recomputes dependent positions.
///
/// Returns the patch list: the moved node first, then every dependent that
/// was repositioned (its decorations, and for a consonant the nested vocal
/// with that vocal's own decorations).
///
/// # Panics
///
/// Panics if the id is in neither the node map nor the slot map.
pub fn apply_move(tree: &mut SentenceTree, id: NodeId, request: &MoveRequest) -> Vec<Patch> {
    let current = position_of(tree, id);
    let candidate = match request {
        MoveRequest::Drag {
            delta,
            viewport_scale,
        } => {
            let model_delta = *delta / *viewport_scale;
            let (angle, distance) =
                vector_to_polar(polar_to_vector(current.angle, current.distance) + model_delta);
            PositionData { angle, distance }
        }
        MoveRequest::Absolute { angle, distance } => PositionData {
            angle: normalize_angle(angle.unwrap_or(current.angle)),
            distance: distance.unwrap_or(current.distance),
        },
    };

    let clamped = compute_constraints(tree, id).clamp(candidate);
    trace!("move {id}: {candidate:?} clamped to {clamped:?}");
    commit(tree, id, clamped);

    let mut patches = vec![Patch {
        id,
        position: clamped,
    }];
    patches.extend(recompute_dependents(tree, id));
    patches
}

fn position_of(tree: &SentenceTree, id: NodeId) -> PositionData {
    if let Some(node) = tree.nodes.get(&id) {
        node.circle().position()
    } else if let Some(slot) = tree.line_slots.get(&id) {
        slot.position()
    } else {
        panic!("unknown node id {id}")
    }
}

fn commit(tree: &mut SentenceTree, id: NodeId, position: PositionData) {
    if let Some(node) = tree.nodes.get_mut(&id) {
        node.circle_mut().set_position(position);
    } else {
        tree.line_slot_mut(id).set_position(position);
    }
}

fn recompute_dependents(tree: &mut SentenceTree, id: NodeId) -> Vec<Patch> {
    let mut patches = Vec::new();
    match tree.nodes.get(&id) {
        Some(Node::Consonant(_)) => {
            patches.extend(recompute_decorations(tree, id));
            patches.extend(reposition_nested_vocal(tree, id));
        }
        Some(Node::Vocal(_)) => patches.extend(recompute_decorations(tree, id)),
        _ => {}
    }
    patches
}

fn recompute_decorations(tree: &mut SentenceTree, letter_id: NodeId) -> Vec<Patch> {
    let mut patches = Vec::new();
    for (id, position) in letter_decoration_positions(tree, letter_id) {
        commit(tree, id, position);
        patches.push(Patch { id, position });
    }
    patches
}

fn reposition_nested_vocal(tree: &mut SentenceTree, consonant_id: NodeId) -> Vec<Patch> {
    let Some(consonant) = tree.node(consonant_id).as_consonant() else {
        return Vec::new();
    };
    let Some(vocal_id) = consonant.vocal else {
        return Vec::new();
    };
    let consonant_position = consonant.circle.position();
    let consonant_placement = consonant.placement;
    let consonant_r = consonant.circle.r;
    let word_r = tree
        .node(consonant.parent_id)
        .as_word()
        .unwrap_or_else(|| panic!("consonant {consonant_id} is not parented to a word"))
        .circle
        .r;

    let vocal = match tree.node(vocal_id) {
        Node::Vocal(v) => v,
        _ => unreachable!("nested child is a vocal"),
    };
    let position = if vocal.placement == VocalPlacement::OnLine
        && consonant_placement != ConsonantPlacement::Inside
    {
        follow_word_edge(consonant_position, vocal.circle.r, word_r)
    } else {
        nested_vocal_position(
            consonant_position,
            consonant_placement,
            consonant_r,
            vocal.placement,
            vocal.circle.r,
            word_r,
        )
    };

    commit(tree, vocal_id, position);
    let mut patches = vec![Patch {
        id: vocal_id,
        position,
    }];
    patches.extend(recompute_decorations(tree, vocal_id));
    patches
}

/// Keeps a nested OnLine vocal glued to the word silhouette while its
/// consonant slides along the boundary.
///
/// The consonant's word-frame position is the vocal's candidate. While the
/// candidate stays within one vocal radius of the word boundary the vocal
/// is projected onto the nearest point of the boundary arc; once the
/// consonant leaves the boundary the vocal follows it freely.
fn follow_word_edge(consonant_position: PositionData, vocal_r: f64, word_r: f64) -> PositionData {
    let candidate = consonant_position;
    if (candidate.distance - word_r).abs() > vocal_r {
        candidate
    } else {
        PositionData {
            angle: candidate.angle,
            distance: word_r,
        }
    }
}

/// The per-gesture interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Nothing selected
    #[default]
    Idle,
    /// A node is selected and its constraints are derived
    Selected(NodeId),
    /// The selected node is being dragged
    Dragging(NodeId),
}

/// Tracks the interactive gesture in progress and the selected node's
/// constraint window.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: GestureState,
    constraints: Option<Constraints>,
}

impl Interaction {
    /// Creates an idle interaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current gesture state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The constraint window of the selected node, if any.
    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    /// Selects a node, deriving its constraint window.
    pub fn select(&mut self, tree: &SentenceTree, id: NodeId) {
        self.constraints = Some(compute_constraints(tree, id));
        self.state = GestureState::Selected(id);
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.state = GestureState::Idle;
        self.constraints = None;
    }

    /// Pointer down on the selected node starts a drag.
    pub fn press(&mut self) {
        if let GestureState::Selected(id) = self.state {
            self.state = GestureState::Dragging(id);
        }
    }

    /// Applies one drag-move event while dragging.
    ///
    /// Returns the committed patches, or nothing when no drag is active.
    pub fn drag_move(
        &mut self,
        tree: &mut SentenceTree,
        delta: Vec2,
        viewport_scale: f64,
    ) -> Vec<Patch> {
        let GestureState::Dragging(id) = self.state else {
            return Vec::new();
        };
        let patches = apply_move(
            tree,
            id,
            &MoveRequest::Drag {
                delta,
                viewport_scale,
            },
        );
        // Dependents moved, so the cached window may have shifted.
        self.constraints = Some(compute_constraints(tree, id));
        patches
    }

    /// Pointer release commits the drag and returns to idle.
    pub fn release(&mut self) {
        if matches!(self.state, GestureState::Dragging(_)) {
            self.deselect();
        }
    }

    /// Applies a typed numeric edit to the selected node.
    ///
    /// Returns the committed patches, or nothing when no node is selected.
    pub fn edit(
        &mut self,
        tree: &mut SentenceTree,
        angle: Option<f64>,
        distance: Option<f64>,
    ) -> Vec<Patch> {
        let GestureState::Selected(id) = self.state else {
            return Vec::new();
        };
        let patches = apply_move(tree, id, &MoveRequest::Absolute { angle, distance });
        self.constraints = Some(compute_constraints(tree, id));
        patches
    }
}
