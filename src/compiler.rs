//! Text-to-geometry compiler.
//!
//! Builds the whole entity tree for a sentence: segments the text, creates
//! Word/Consonant/Vocal nodes with their decoration dots and line slots,
//! re-parents vowels that follow a consonant into that consonant, and runs
//! the initial layout pass. Compilation always rebuilds from scratch; a text
//! edit replaces the previous tree rather than patching it.

use crate::constants::{CONSONANT_RADIUS, DOT_RADIUS, SENTENCE_RADIUS, VOCAL_RADIUS, WORD_RADIUS};
use crate::layout::apply_initial_layout;
use crate::letters::{classify, Classification};
use crate::segment::segment_sentence;
use crate::types::{
    Circle, Consonant, Dot, LineSlot, Node, NodeId, Sentence, SentenceTree, Vocal, Word,
};
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

/// Compiles a sentence string into a fully laid out tree.
///
/// Invalid characters are silently dropped during segmentation, and words
/// reduced to nothing are dropped from the sentence; an input with no valid
/// letters still yields a sentence with zero words.
pub fn compile(text: &str) -> SentenceTree {
    let mut tree = build_tree(text);
    apply_initial_layout(&mut tree);
    debug!(
        "compiled {:?} into {} words, {} nodes, {} line slots",
        text,
        tree.sentence().words.len(),
        tree.nodes.len(),
        tree.line_slots.len()
    );
    tree
}

fn build_tree(text: &str) -> SentenceTree {
    let mut nodes: HashMap<NodeId, Node> = HashMap::new();
    let mut line_slots: HashMap<NodeId, LineSlot> = HashMap::new();
    let sentence_id = Uuid::new_v4();

    let mut word_ids = Vec::new();
    for word_tokens in segment_sentence(text) {
        word_ids.push(build_word(
            &mut nodes,
            &mut line_slots,
            sentence_id,
            &word_tokens,
        ));
    }

    nodes.insert(
        sentence_id,
        Node::Sentence(Sentence {
            id: sentence_id,
            text: text.to_string(),
            circle: Circle::with_radius(SENTENCE_RADIUS),
            words: word_ids,
            line_slots: Vec::new(),
        }),
    );

    SentenceTree {
        root: sentence_id,
        nodes,
        line_slots,
    }
}

fn build_word(
    nodes: &mut HashMap<NodeId, Node>,
    line_slots: &mut HashMap<NodeId, LineSlot>,
    sentence_id: NodeId,
    tokens: &[String],
) -> NodeId {
    let word_id = Uuid::new_v4();

    let mut letter_ids = Vec::new();
    for token in tokens {
        // Tokens reaching this point already passed the validity filter.
        let Some(classification) = classify(token) else {
            continue;
        };
        letter_ids.push(build_letter(
            nodes,
            line_slots,
            word_id,
            token,
            classification,
        ));
    }
    let top_level = nest_word_vocals(nodes, &letter_ids);

    nodes.insert(
        word_id,
        Node::Word(Word {
            id: word_id,
            parent_id: sentence_id,
            text: tokens.concat(),
            circle: Circle::with_radius(WORD_RADIUS),
            letters: top_level,
            line_slots: Vec::new(),
        }),
    );
    word_id
}

fn build_letter(
    nodes: &mut HashMap<NodeId, Node>,
    line_slots: &mut HashMap<NodeId, LineSlot>,
    word_id: NodeId,
    token: &str,
    classification: Classification,
) -> NodeId {
    let letter_id = Uuid::new_v4();
    match classification {
        Classification::Vocal {
            placement,
            decoration,
        } => {
            let slots = build_line_slots(line_slots, letter_id, decoration.line_slots());
            nodes.insert(
                letter_id,
                Node::Vocal(Vocal {
                    id: letter_id,
                    parent_id: word_id,
                    text: token.to_string(),
                    circle: Circle::with_radius(VOCAL_RADIUS),
                    line_slots: slots,
                    placement,
                    decoration,
                }),
            );
        }
        Classification::Consonant {
            placement,
            decoration,
        } => {
            let dots = (0..decoration.dots())
                .map(|_| {
                    let dot_id = Uuid::new_v4();
                    nodes.insert(
                        dot_id,
                        Node::Dot(Dot {
                            id: dot_id,
                            parent_id: letter_id,
                            circle: Circle::with_radius(DOT_RADIUS),
                            filled: true,
                        }),
                    );
                    dot_id
                })
                .collect();
            let slots = build_line_slots(line_slots, letter_id, decoration.line_slots());
            nodes.insert(
                letter_id,
                Node::Consonant(Consonant {
                    id: letter_id,
                    parent_id: word_id,
                    text: token.to_string(),
                    circle: Circle::with_radius(CONSONANT_RADIUS),
                    dots,
                    line_slots: slots,
                    vocal: None,
                    placement,
                    decoration,
                }),
            );
        }
    }
    letter_id
}

fn build_line_slots(
    line_slots: &mut HashMap<NodeId, LineSlot>,
    parent_id: NodeId,
    count: usize,
) -> Vec<NodeId> {
    (0..count)
        .map(|_| {
            let slot_id = Uuid::new_v4();
            line_slots.insert(
                slot_id,
                LineSlot {
                    id: slot_id,
                    parent_id,
                    angle: 0.0,
                    distance: 0.0,
                    connection: None,
                },
            );
            slot_id
        })
        .collect()
}

/// Re-parents each vocal that immediately follows a consonant into that
/// consonant, returning the word's remaining top-level letters.
///
/// The scan runs over the original letter sequence, so only the first vocal
/// after a consonant nests; a second vocal in a row stays a sibling of the
/// word.
fn nest_word_vocals(nodes: &mut HashMap<NodeId, Node>, letters: &[NodeId]) -> Vec<NodeId> {
    let mut top_level = Vec::with_capacity(letters.len());
    for (i, letter_id) in letters.iter().enumerate() {
        let follows_consonant = i > 0
            && matches!(nodes[&letters[i - 1]], Node::Consonant(_))
            && matches!(nodes[letter_id], Node::Vocal(_));
        if follows_consonant {
            let consonant_id = letters[i - 1];
            if let Some(Node::Consonant(consonant)) = nodes.get_mut(&consonant_id) {
                consonant.vocal = Some(*letter_id);
            }
            if let Some(Node::Vocal(vocal)) = nodes.get_mut(letter_id) {
                vocal.parent_id = consonant_id;
            }
        } else {
            top_level.push(*letter_id);
        }
    }
    top_level
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Structural signature of a tree: everything except the freshly
    /// generated ids, in traversal order.
    fn signature(tree: &SentenceTree) -> String {
        let mut out = String::new();
        let sentence = tree.sentence();
        out.push_str(&format!("sentence {:?} {:?}\n", sentence.text, sentence.circle));
        for word_id in &sentence.words {
            let word = tree.node(*word_id).as_word().expect("word");
            out.push_str(&format!("  word {:?} {:?}\n", word.text, word.circle));
            for letter_id in &word.letters {
                signature_letter(tree, *letter_id, &mut out);
            }
        }
        out
    }

    fn signature_letter(tree: &SentenceTree, letter_id: uuid::Uuid, out: &mut String) {
        match tree.node(letter_id) {
            Node::Consonant(c) => {
                out.push_str(&format!(
                    "    consonant {:?} {:?} {:?} {:?}\n",
                    c.text, c.placement, c.decoration, c.circle
                ));
                for dot_id in &c.dots {
                    out.push_str(&format!("      dot {:?}\n", tree.node(*dot_id).circle()));
                }
                for slot_id in &c.line_slots {
                    let slot = tree.line_slot(*slot_id);
                    out.push_str(&format!("      slot {} {}\n", slot.angle, slot.distance));
                }
                if let Some(vocal_id) = c.vocal {
                    out.push_str("      nested\n");
                    signature_letter(tree, vocal_id, out);
                }
            }
            Node::Vocal(v) => {
                out.push_str(&format!(
                    "    vocal {:?} {:?} {:?} {:?}\n",
                    v.text, v.placement, v.decoration, v.circle
                ));
                for slot_id in &v.line_slots {
                    let slot = tree.line_slot(*slot_id);
                    out.push_str(&format!("      slot {} {}\n", slot.angle, slot.distance));
                }
            }
            _ => panic!("expected a letter"),
        }
    }

    #[test]
    fn test_tree_shape_for_full_alphabet_sentence() {
        let tree = compile("aeiou bjtth chkshy dlrz gnvqu hpwx fmsng");

        assert_eq!(tree.sentence().words.len(), 7);
        // 1 sentence + 7 words + 5 vocals + 24 consonants + 20 dots
        assert_eq!(tree.nodes.len(), 57);
        // 2 slots from vocals (i, u) + 24 from line-decorated consonants
        assert_eq!(tree.line_slots.len(), 26);
    }

    #[test]
    fn test_nesting_reparents_vocal_after_consonant() {
        let tree = compile("ba");
        let sentence = tree.sentence();
        assert_eq!(sentence.words.len(), 1);

        let word = tree.node(sentence.words[0]).as_word().expect("word");
        assert_eq!(word.letters.len(), 1);

        let consonant = tree.node(word.letters[0]).as_consonant().expect("consonant");
        assert_eq!(consonant.text, "b");

        let vocal_id = consonant.vocal.expect("nested vocal");
        let vocal = tree.node(vocal_id).as_vocal().expect("vocal");
        assert_eq!(vocal.text, "a");
        assert_eq!(vocal.parent_id, consonant.id);
        assert!(!word.letters.contains(&vocal_id));
    }

    #[test]
    fn test_only_first_vocal_after_consonant_nests() {
        let tree = compile("baa");
        let word = tree.node(tree.sentence().words[0]).as_word().expect("word");

        // b keeps the first a; the second a stays a top-level sibling.
        assert_eq!(word.letters.len(), 2);
        let consonant = tree.node(word.letters[0]).as_consonant().expect("consonant");
        assert!(consonant.vocal.is_some());
        let second = tree.node(word.letters[1]).as_vocal().expect("vocal");
        assert_eq!(second.parent_id, word.id);
    }

    #[test]
    fn test_vocal_without_preceding_consonant_stays_top_level() {
        let tree = compile("ab");
        let word = tree.node(tree.sentence().words[0]).as_word().expect("word");
        assert_eq!(word.letters.len(), 2);
        assert!(tree.node(word.letters[0]).as_vocal().is_some());
        let consonant = tree.node(word.letters[1]).as_consonant().expect("consonant");
        assert_eq!(consonant.vocal, None);
    }

    #[test]
    fn test_word_text_drops_invalid_characters() {
        let tree = compile("b1a");
        let word = tree.node(tree.sentence().words[0]).as_word().expect("word");
        assert_eq!(word.text, "ba");
    }

    #[test]
    fn test_sentence_text_keeps_raw_input() {
        let tree = compile("ba !!! ka");
        assert_eq!(tree.sentence().text, "ba !!! ka");
        assert_eq!(tree.sentence().words.len(), 2);
    }

    #[test]
    fn test_empty_input_compiles_to_empty_sentence() {
        for text in ["", "   ", "123 !?"] {
            let tree = compile(text);
            assert!(tree.sentence().words.is_empty());
            assert_eq!(tree.nodes.len(), 1);
            assert!(tree.line_slots.is_empty());
        }
    }

    #[test]
    fn test_compile_is_deterministic_up_to_ids() {
        let text = "the quick brown fox";
        let first = compile(text);
        let second = compile(text);
        assert_eq!(signature(&first), signature(&second));
    }

    #[test]
    fn test_dot_nodes_are_filled() {
        let tree = compile("d");
        let dots: Vec<_> = tree
            .nodes
            .values()
            .filter_map(|node| match node {
                Node::Dot(dot) => Some(dot),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 3);
        assert!(dots.iter().all(|dot| dot.filled));
    }
}
