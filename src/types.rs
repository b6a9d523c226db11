//! Core data types for the circle-script document.
//!
//! This module defines the entity tree produced by the compiler: a sentence
//! circle containing word circles, which contain letter circles, which own
//! their decoration dots and line slots. All parent/child relations are by
//! id lookup into flat maps; nothing stores a live reference to another node.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for tree nodes, generated once at creation.
pub type NodeId = Uuid;

/// The geometry owned by a circular shape node.
///
/// `angle` and `distance` are polar coordinates relative to the parent's
/// center: an angle in degrees and a radial offset. `r` is the node's own
/// radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Angular position around the parent center, in degrees
    pub angle: f64,
    /// Radial offset from the parent center
    pub distance: f64,
    /// Radius of this circle
    pub r: f64,
}

impl Circle {
    /// Creates a circle at the parent center with the given radius.
    pub fn with_radius(r: f64) -> Self {
        Self {
            angle: 0.0,
            distance: 0.0,
            r,
        }
    }

    /// The mutable position subset of this circle.
    pub fn position(&self) -> PositionData {
        PositionData {
            angle: self.angle,
            distance: self.distance,
        }
    }

    /// Overwrites the position subset, leaving the radius untouched.
    pub fn set_position(&mut self, position: PositionData) {
        self.angle = position.angle;
        self.distance = position.distance;
    }
}

/// The subset of a node's geometry that interactive edits touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionData {
    /// Angular position around the parent center, in degrees
    pub angle: f64,
    /// Radial offset from the parent center
    pub distance: f64,
}

/// Which radial band a consonant circle occupies relative to its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsonantPlacement {
    /// Majority of the circle overlaps the word circle
    DeepCut,
    /// Fully inside the word circle
    Inside,
    /// Majority of the circle sits outside the word circle
    ShallowCut,
    /// Centered exactly on the word line
    OnLine,
}

/// The dot or line ornamentation attached to a consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsonantDecoration {
    /// No decoration
    None,
    /// One dot
    SingleDot,
    /// Two dots
    DoubleDot,
    /// Three dots
    TripleDot,
    /// Four dots
    QuadrupleDot,
    /// One line slot
    SingleLine,
    /// Two line slots
    DoubleLine,
    /// Three line slots
    TripleLine,
}

impl ConsonantDecoration {
    /// Number of dots this decoration creates.
    pub fn dots(self) -> usize {
        match self {
            ConsonantDecoration::SingleDot => 1,
            ConsonantDecoration::DoubleDot => 2,
            ConsonantDecoration::TripleDot => 3,
            ConsonantDecoration::QuadrupleDot => 4,
            _ => 0,
        }
    }

    /// Number of line slots this decoration creates.
    pub fn line_slots(self) -> usize {
        match self {
            ConsonantDecoration::SingleLine => 1,
            ConsonantDecoration::DoubleLine => 2,
            ConsonantDecoration::TripleLine => 3,
            _ => 0,
        }
    }
}

/// Which radial band a vocal circle occupies relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocalPlacement {
    /// Centered exactly on the parent line
    OnLine,
    /// Outside the parent circle
    Outside,
    /// Inside the parent circle
    Inside,
}

/// The line ornamentation attached to a vocal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocalDecoration {
    /// No decoration
    None,
    /// One line slot pointing toward the parent center
    LineInside,
    /// One line slot pointing away from the parent center
    LineOutside,
}

impl VocalDecoration {
    /// Number of line slots this decoration creates.
    pub fn line_slots(self) -> usize {
        match self {
            VocalDecoration::None => 0,
            VocalDecoration::LineInside | VocalDecoration::LineOutside => 1,
        }
    }
}

/// The root node of a compiled document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique identifier for this node
    pub id: NodeId,
    /// The raw source text this sentence was compiled from
    pub text: String,
    /// Geometry of the sentence circle
    pub circle: Circle,
    /// Ids of the word circles, in reading order
    pub words: Vec<NodeId>,
    /// Ids of line slots anchored to the sentence circle
    pub line_slots: Vec<NodeId>,
}

/// A word circle nested inside the sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Id of the owning sentence
    pub parent_id: NodeId,
    /// The word's letters, joined
    pub text: String,
    /// Geometry of the word circle
    pub circle: Circle,
    /// Ids of the top-level letters, in reading order (nested vocals are
    /// reachable through their consonant, not listed here)
    pub letters: Vec<NodeId>,
    /// Ids of line slots anchored to the word circle
    pub line_slots: Vec<NodeId>,
}

/// A consonant letter circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consonant {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Id of the owning word
    pub parent_id: NodeId,
    /// The letter token, case preserved
    pub text: String,
    /// Geometry of the consonant circle
    pub circle: Circle,
    /// Ids of this consonant's decoration dots
    pub dots: Vec<NodeId>,
    /// Ids of this consonant's line slots
    pub line_slots: Vec<NodeId>,
    /// Id of the vocal nested inside this consonant, if any
    pub vocal: Option<NodeId>,
    /// Radial band relative to the word circle
    pub placement: ConsonantPlacement,
    /// Dot or line ornamentation
    pub decoration: ConsonantDecoration,
}

/// A vocal (vowel) letter circle.
///
/// A vocal is either a top-level child of a word or nested under a
/// consonant (its `parent_id` then names the consonant). A nested vocal's
/// position data stays expressed in the owning word's polar frame so that
/// it can sit on the word boundary independently of the consonant's own
/// radial offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocal {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Id of the owning word, or of the consonant when nested
    pub parent_id: NodeId,
    /// The letter token, case preserved
    pub text: String,
    /// Geometry of the vocal circle
    pub circle: Circle,
    /// Ids of this vocal's line slots
    pub line_slots: Vec<NodeId>,
    /// Radial band relative to the parent circle
    pub placement: VocalPlacement,
    /// Line ornamentation
    pub decoration: VocalDecoration,
}

/// A decoration dot owned by a consonant. Always drawn filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Id of the owning consonant
    pub parent_id: NodeId,
    /// Geometry of the dot
    pub circle: Circle,
    /// Whether the dot is drawn opaque
    pub filled: bool,
}

/// A drawn line between two line slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConnection {
    /// First endpoint slot
    pub a: NodeId,
    /// Second endpoint slot
    pub b: NodeId,
}

/// An anchor point on a circle's boundary where a line may attach.
///
/// Line slots have no radius of their own; their distance is pinned to the
/// owning circle's edge and only their angle is adjustable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSlot {
    /// Unique identifier for this slot
    pub id: NodeId,
    /// Id of the owning circle node
    pub parent_id: NodeId,
    /// Angular position around the parent center, in degrees
    pub angle: f64,
    /// Radial offset from the parent center
    pub distance: f64,
    /// The drawn line this slot participates in, if any
    pub connection: Option<LineConnection>,
}

impl LineSlot {
    /// The mutable position subset of this slot.
    pub fn position(&self) -> PositionData {
        PositionData {
            angle: self.angle,
            distance: self.distance,
        }
    }

    /// Overwrites the position subset.
    pub fn set_position(&mut self, position: PositionData) {
        self.angle = position.angle;
        self.distance = position.distance;
    }
}

/// A circular shape node, discriminated by a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// The sentence root
    Sentence(Sentence),
    /// A word circle
    Word(Word),
    /// A consonant letter
    Consonant(Consonant),
    /// A vocal letter
    Vocal(Vocal),
    /// A decoration dot
    Dot(Dot),
}

impl Node {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        match self {
            Node::Sentence(s) => s.id,
            Node::Word(w) => w.id,
            Node::Consonant(c) => c.id,
            Node::Vocal(v) => v.id,
            Node::Dot(d) => d.id,
        }
    }

    /// The owning node's id, or `None` for the sentence root.
    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            Node::Sentence(_) => None,
            Node::Word(w) => Some(w.parent_id),
            Node::Consonant(c) => Some(c.parent_id),
            Node::Vocal(v) => Some(v.parent_id),
            Node::Dot(d) => Some(d.parent_id),
        }
    }

    /// The geometry owned by this node.
    pub fn circle(&self) -> &Circle {
        match self {
            Node::Sentence(s) => &s.circle,
            Node::Word(w) => &w.circle,
            Node::Consonant(c) => &c.circle,
            Node::Vocal(v) => &v.circle,
            Node::Dot(d) => &d.circle,
        }
    }

    /// Mutable access to the geometry owned by this node.
    pub fn circle_mut(&mut self) -> &mut Circle {
        match self {
            Node::Sentence(s) => &mut s.circle,
            Node::Word(w) => &mut w.circle,
            Node::Consonant(c) => &mut c.circle,
            Node::Vocal(v) => &mut v.circle,
            Node::Dot(d) => &mut d.circle,
        }
    }

    /// Ids of line slots anchored to this node's circle.
    pub fn line_slots(&self) -> &[NodeId] {
        match self {
            Node::Sentence(s) => &s.line_slots,
            Node::Word(w) => &w.line_slots,
            Node::Consonant(c) => &c.line_slots,
            Node::Vocal(v) => &v.line_slots,
            Node::Dot(_) => &[],
        }
    }

    /// Downcast to a word.
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Node::Word(w) => Some(w),
            _ => None,
        }
    }

    /// Downcast to a consonant.
    pub fn as_consonant(&self) -> Option<&Consonant> {
        match self {
            Node::Consonant(c) => Some(c),
            _ => None,
        }
    }

    /// Downcast to a vocal.
    pub fn as_vocal(&self) -> Option<&Vocal> {
        match self {
            Node::Vocal(v) => Some(v),
            _ => None,
        }
    }
}

/// The compiled document: the sentence root plus flat id-indexed maps of
/// every shape node and line slot.
///
/// The tree is destroyed and rebuilt from scratch whenever the source text
/// changes; position data mutates in place under interactive edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceTree {
    /// Id of the sentence root
    pub root: NodeId,
    /// Every circular shape node, indexed by id
    pub nodes: HashMap<NodeId, Node>,
    /// Every line slot, indexed by id
    pub line_slots: HashMap<NodeId, LineSlot>,
}

impl SentenceTree {
    /// Looks up a shape node.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the tree. Ids are generated internally, so
    /// an unknown id is an integration defect, not an expected input.
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("unknown node id {id}"))
    }

    /// Looks up a shape node mutably.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("unknown node id {id}"))
    }

    /// Looks up a line slot.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the slot map.
    pub fn line_slot(&self, id: NodeId) -> &LineSlot {
        self.line_slots
            .get(&id)
            .unwrap_or_else(|| panic!("unknown line slot id {id}"))
    }

    /// Looks up a line slot mutably.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the slot map.
    pub fn line_slot_mut(&mut self, id: NodeId) -> &mut LineSlot {
        self.line_slots
            .get_mut(&id)
            .unwrap_or_else(|| panic!("unknown line slot id {id}"))
    }

    /// The sentence root.
    ///
    /// # Panics
    ///
    /// Panics if the root id does not name a `Sentence` node.
    pub fn sentence(&self) -> &Sentence {
        match self.node(self.root) {
            Node::Sentence(s) => s,
            other => panic!("root id names a {other:?}, not a sentence"),
        }
    }

    /// Serialize the tree to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Records a drawn line between two existing slots.
    ///
    /// # Arguments
    ///
    /// * `a` - The first endpoint slot
    /// * `b` - The second endpoint slot
    ///
    /// # Returns
    ///
    /// `Ok(())` if both slots exist, or an error message if either doesn't.
    pub fn connect_slots(&mut self, a: NodeId, b: NodeId) -> Result<(), String> {
        if !self.line_slots.contains_key(&a) {
            return Err("First line slot does not exist".to_string());
        }
        if !self.line_slots.contains_key(&b) {
            return Err("Second line slot does not exist".to_string());
        }

        let connection = LineConnection { a, b };
        self.line_slot_mut(a).connection = Some(connection);
        self.line_slot_mut(b).connection = Some(connection);
        Ok(())
    }

    /// Verifies the tree's referential invariants: every id referenced in a
    /// child list resolves, child `parent_id`s point back at the referencing
    /// node, a consonant's nested vocal is a `Vocal` parented to it, and all
    /// geometry satisfies `distance >= 0` and `r > 0`.
    pub fn check_integrity(&self) -> Result<(), String> {
        let sentence = match self.nodes.get(&self.root) {
            Some(Node::Sentence(s)) => s,
            Some(_) => return Err("root id does not name a sentence".to_string()),
            None => return Err("root id is not in the node map".to_string()),
        };

        for (id, node) in &self.nodes {
            if node.id() != *id {
                return Err(format!("node {id} is keyed under a foreign id"));
            }
            let circle = node.circle();
            if circle.distance < 0.0 {
                return Err(format!("node {id} has negative distance"));
            }
            if circle.r <= 0.0 {
                return Err(format!("node {id} has non-positive radius"));
            }
            for slot_id in node.line_slots() {
                match self.line_slots.get(slot_id) {
                    Some(slot) if slot.parent_id == *id => {}
                    Some(_) => return Err(format!("line slot {slot_id} has a foreign parent")),
                    None => return Err(format!("dangling line slot id {slot_id}")),
                }
            }
        }

        for word_id in &sentence.words {
            let word = match self.nodes.get(word_id) {
                Some(Node::Word(w)) => w,
                Some(_) => return Err(format!("sentence child {word_id} is not a word")),
                None => return Err(format!("dangling word id {word_id}")),
            };
            if word.parent_id != sentence.id {
                return Err(format!("word {word_id} has a foreign parent"));
            }
            for letter_id in &word.letters {
                match self.nodes.get(letter_id) {
                    Some(Node::Consonant(c)) => {
                        if c.parent_id != word.id {
                            return Err(format!("consonant {letter_id} has a foreign parent"));
                        }
                        self.check_consonant_children(c)?;
                    }
                    Some(Node::Vocal(v)) => {
                        if v.parent_id != word.id {
                            return Err(format!("vocal {letter_id} has a foreign parent"));
                        }
                    }
                    Some(_) => return Err(format!("word child {letter_id} is not a letter")),
                    None => return Err(format!("dangling letter id {letter_id}")),
                }
            }
        }

        Ok(())
    }

    fn check_consonant_children(&self, consonant: &Consonant) -> Result<(), String> {
        for dot_id in &consonant.dots {
            match self.nodes.get(dot_id) {
                Some(Node::Dot(d)) if d.parent_id == consonant.id => {}
                Some(Node::Dot(_)) => return Err(format!("dot {dot_id} has a foreign parent")),
                Some(_) => return Err(format!("consonant child {dot_id} is not a dot")),
                None => return Err(format!("dangling dot id {dot_id}")),
            }
        }
        if let Some(vocal_id) = consonant.vocal {
            match self.nodes.get(&vocal_id) {
                Some(Node::Vocal(v)) if v.parent_id == consonant.id => {}
                Some(Node::Vocal(_)) => {
                    return Err(format!("nested vocal {vocal_id} has a foreign parent"))
                }
                Some(_) => return Err(format!("nested child {vocal_id} is not a vocal")),
                None => return Err(format!("dangling nested vocal id {vocal_id}")),
            }
        }
        Ok(())
    }
}
