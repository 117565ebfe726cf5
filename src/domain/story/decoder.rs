use serde::Deserialize;
use serde_json::Value;

use super::error::DecodeError;
use super::model::{Sentence, StoryDocument, TextSpan};

const FENCE: &str = "```";

/// Story item body. Models emit it flat or wrapped in a `sentence` object
/// (the shape used by the prompt's worked example); the wrapper is removed first.
#[derive(Deserialize)]
struct RawSentence {
    children: Vec<TextSpan>,
}

#[derive(Deserialize)]
struct RawStory {
    story: Vec<Value>,
}

/// Remove a surrounding code fence, but only when both the opening marker
/// (with an optional language tag) and the closing marker are present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let Some(inner) = after_open.strip_suffix(FENCE) else {
        return trimmed;
    };

    // Language tag is the run of alphanumerics right after the opening marker
    let body = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    body.trim()
}

/// Parse raw model output into a story document
pub fn decode_story(raw: &str) -> Result<StoryDocument, DecodeError> {
    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(DecodeError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::ParseFailure(e.to_string()))?;

    let raw_story: RawStory =
        serde_json::from_value(value).map_err(|e| DecodeError::ShapeError(e.to_string()))?;

    if raw_story.story.is_empty() {
        return Err(DecodeError::ShapeError(
            "story contains no sentences".to_string(),
        ));
    }

    let sentences = raw_story
        .story
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_sentence(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoryDocument::new(sentences))
}

fn decode_sentence(index: usize, mut item: Value) -> Result<Sentence, DecodeError> {
    let wrapped = item.as_object_mut().and_then(|object| object.remove("sentence"));
    let item = wrapped.unwrap_or(item);

    let raw: RawSentence = serde_json::from_value(item).map_err(|e| {
        DecodeError::ShapeError(format!(
            "sentence {} must have a children list of typed spans: {}",
            index, e
        ))
    })?;

    Ok(Sentence::new(raw.children))
}
