use serde::{Deserialize, Serialize};

/// Learner proficiency the story is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    #[serde(rename = "Absolute Beginner", alias = "AbsoluteBeginner")]
    AbsoluteBeginner,
    #[serde(rename = "Beginner")]
    Beginner,
    #[serde(rename = "Intermediate")]
    Intermediate,
    #[serde(rename = "Advanced")]
    Advanced,
    #[serde(rename = "Expert")]
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 5] = [
        DifficultyLevel::AbsoluteBeginner,
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
        DifficultyLevel::Expert,
    ];

    /// Display label, also used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::AbsoluteBeginner => "Absolute Beginner",
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Expert => "Expert",
        }
    }

    /// Parse a label, accepting both "Absolute Beginner" and "AbsoluteBeginner"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Absolute Beginner" | "AbsoluteBeginner" => Some(DifficultyLevel::AbsoluteBeginner),
            "Beginner" => Some(DifficultyLevel::Beginner),
            "Intermediate" => Some(DifficultyLevel::Intermediate),
            "Advanced" => Some(DifficultyLevel::Advanced),
            "Expert" => Some(DifficultyLevel::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated parameters of a story generation request.
/// Persisted verbatim as the document's `metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub native_language: String,
    pub target_language: String,
    pub genre: String,
    pub difficulty_level: DifficultyLevel,
    pub voice: String,
}

/// One span of a sentence, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TextSpan {
    Word {
        text: String,
        #[serde(default)]
        transliteration: String,
        #[serde(default)]
        translation: String,
    },
    Punctuation {
        text: String,
    },
    Translation {
        text: String,
    },
}

impl TextSpan {
    pub fn text(&self) -> &str {
        match self {
            TextSpan::Word { text, .. }
            | TextSpan::Punctuation { text }
            | TextSpan::Translation { text } => text,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self, TextSpan::Punctuation { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub children: Vec<TextSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_link: Option<String>,
}

impl Sentence {
    pub fn new(children: Vec<TextSpan>) -> Self {
        Self {
            children,
            audio_link: None,
        }
    }

    /// Text sent to speech synthesis: every non-punctuation span, in order
    pub fn speakable_text(&self) -> String {
        self.children
            .iter()
            .filter(|span| !span.is_punctuation())
            .map(TextSpan::text)
            .collect()
    }
}

/// The persisted record: ordered sentences plus the request that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDocument {
    pub story: Vec<Sentence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StoryRequest>,
}

impl StoryDocument {
    pub fn new(story: Vec<Sentence>) -> Self {
        Self {
            story,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, request: StoryRequest) -> Self {
        self.metadata = Some(request);
        self
    }
}
