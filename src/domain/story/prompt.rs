use super::model::DifficultyLevel;

/// Clause used when the difficulty level is not recognized
pub const FALLBACK_DIFFICULTY_CLAUSE: &str = "Use extremely simple vocabulary and grammar.";

/// Worked example anchoring the output schema (Japanese story, English translation)
const EXAMPLE_OUTPUT: &str = r#"
{
    "story": [
        {
            "sentence": {
                "children": [
                    {"type": "word", "text": "今日", "transliteration": "kyou", "translation": "today"},
                    {"type": "word", "text": "は", "transliteration": "wa", "translation": "(topic marker)"},
                    {"type": "word", "text": "天気", "transliteration": "tenki", "translation": "weather"},
                    {"type": "word", "text": "が", "transliteration": "ga", "translation": "(subject marker)"},
                    {"type": "word", "text": "いい", "transliteration": "ii", "translation": "good"},
                    {"type": "word", "text": "です", "transliteration": "desu", "translation": "(polite ending)"},
                    {"type": "punctuation", "text": "。"},
                    {"type": "translation", "text": "The weather is good today."}
                ]
            }
        },
        {
            "sentence": {
                "children": [
                    {"type": "word", "text": "明日", "transliteration": "ashita", "translation": "tomorrow"},
                    {"type": "word", "text": "も", "transliteration": "mo", "translation": "also"},
                    {"type": "word", "text": "晴れる", "transliteration": "hareru", "translation": "will be sunny"},
                    {"type": "word", "text": "でしょう", "transliteration": "deshou", "translation": "probably"},
                    {"type": "punctuation", "text": "。"},
                    {"type": "translation", "text": "It will probably be sunny tomorrow too."}
                ]
            }
        }
    ]
}
"#;

/// Fixed descriptive clause for a difficulty level
pub fn difficulty_clause(level: DifficultyLevel) -> &'static str {
    match level {
        DifficultyLevel::AbsoluteBeginner => "Use extremely simple vocabulary and grammar.",
        DifficultyLevel::Beginner => "Use very simple vocabulary and grammar.",
        DifficultyLevel::Intermediate => "Use simple vocabulary and grammar.",
        DifficultyLevel::Advanced => "Use typical vocabulary and grammar.",
        DifficultyLevel::Expert => "Use sophisticated vocabulary and grammar.",
    }
}

/// Build the instruction sent to the generative model.
///
/// `difficulty_level` is a label such as "Beginner"; anything unrecognized
/// falls back to the simplest-vocabulary clause.
pub fn build_prompt(
    native_language: &str,
    target_language: &str,
    genre: &str,
    difficulty_level: &str,
) -> String {
    let clause = DifficultyLevel::from_label(difficulty_level)
        .map(difficulty_clause)
        .unwrap_or(FALLBACK_DIFFICULTY_CLAUSE);

    format!(
        "Write a story in {target_language}. {clause} \
         The story should be in the genre of {genre}. \
         Format the output in JSON format. Here is an example, in this case the story is in Japanese \
         and the translation is in English, but for you the story needs to be in {target_language} \
         and the translation in {native_language} {EXAMPLE_OUTPUT}"
    )
}
