//! Intent classification for inbound turns.
//!
//! A deterministic, pure function: no I/O, no state. A turn is an image
//! request iff the lowercased content contains any keyword from either
//! group below; a single hit is enough, the groups need not co-occur.
//!
//! For image turns, the prompt is the content with request phrasing
//! (`<verb> [a|an|the]? <noun> [of [a|an|the]?]?`) and politeness filler
//! stripped. When stripping leaves nothing, the original content is used
//! as the prompt.

use std::sync::LazyLock;

use regex::Regex;

use parley_types::chat::TurnKind;

/// Action verbs that signal a generation request.
pub const ACTION_VERBS: [&str; 6] = ["generate", "create", "make", "draw", "design", "produce"];

/// Visual-object nouns that signal an image subject.
pub const VISUAL_NOUNS: [&str; 11] = [
    "image",
    "picture",
    "photo",
    "illustration",
    "art",
    "drawing",
    "visual",
    "graphic",
    "poster",
    "logo",
    "meme",
];

/// Politeness and request filler stripped from image prompts.
pub const FILLER_PHRASES: [&str; 5] = ["please", "can you", "could you", "i want", "i need"];

static STRIP_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    let verbs = ACTION_VERBS.join("|");
    let nouns = VISUAL_NOUNS.join("|");
    Regex::new(&format!(
        r"(?i)\b(?:{verbs})\s+(?:(?:an|a|the)\s+)?(?:{nouns})\b(?:\s+of\b(?:\s+(?:an|a|the)\b)?)?"
    ))
    .expect("strip-phrase pattern is valid")
});

static STRIP_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    let fillers = FILLER_PHRASES.join("|");
    Regex::new(&format!(r"(?i)\b(?:{fillers})\b")).expect("strip-filler pattern is valid")
});

/// The classified intent of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: TurnKind,
    pub prompt: String,
}

/// Classify raw message content as a text or image turn.
pub fn classify(content: &str) -> Intent {
    let lower = content.to_lowercase();
    let is_image = ACTION_VERBS
        .iter()
        .chain(VISUAL_NOUNS.iter())
        .any(|keyword| lower.contains(keyword));

    if !is_image {
        return Intent {
            kind: TurnKind::Text,
            prompt: content.to_string(),
        };
    }

    let stripped = STRIP_PHRASE.replace_all(content, " ");
    let stripped = STRIP_FILLER.replace_all(&stripped, " ");
    let prompt = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    Intent {
        kind: TurnKind::Image,
        prompt: if prompt.is_empty() {
            content.to_string()
        } else {
            prompt
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_question_is_text() {
        let intent = classify("what is the capital of France");
        assert_eq!(intent.kind, TurnKind::Text);
        assert_eq!(intent.prompt, "what is the capital of France");
    }

    #[test]
    fn test_generate_image_phrase_stripped() {
        let intent = classify("generate an image of a cat");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "cat");
    }

    #[test]
    fn test_politeness_filler_stripped() {
        let intent = classify("please draw a picture of a red fox");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "red fox");
    }

    #[test]
    fn test_single_noun_hit_is_enough() {
        // No action verb, so there is no request phrase to strip.
        let intent = classify("a sunset photo");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "a sunset photo");
    }

    #[test]
    fn test_single_verb_hit_is_enough() {
        // "make" alone classifies as image even without a visual noun.
        let intent = classify("make me happy");
        assert_eq!(intent.kind, TurnKind::Image);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let intent = classify("GENERATE An IMAGE of A Dog");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "Dog");
    }

    #[test]
    fn test_fully_stripped_content_falls_back_to_original() {
        let intent = classify("generate an image");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "generate an image");
    }

    #[test]
    fn test_cleaning_reaches_fixed_point() {
        // Re-classifying a cleaned prompt never strips further.
        let once = classify("please draw a picture of a red fox");
        let twice = classify(&once.prompt);
        assert_eq!(twice.prompt, once.prompt);
    }

    #[test]
    fn test_cleaned_prompt_keeps_residual_keyword() {
        // A residual noun keeps the image classification but the prompt is stable.
        let once = classify("create a poster of my favourite drawing");
        let twice = classify(&once.prompt);
        assert_eq!(twice.prompt, once.prompt);
    }

    #[test]
    fn test_whitespace_collapsed_after_stripping() {
        let intent = classify("could you   generate a   graphic of   mountains");
        assert_eq!(intent.kind, TurnKind::Image);
        assert_eq!(intent.prompt, "mountains");
    }
}
