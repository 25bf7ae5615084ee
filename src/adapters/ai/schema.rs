//! Structured-output schemas and response parsing.
//!
//! The model is asked for strict JSON matching these schemas; anything
//! nonconforming (malformed JSON, missing fields, wrong question count,
//! out-of-range confidence) is a hard `SchemaMismatch` failure. No partial
//! deck or analysis is ever surfaced.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::decision::{Analysis, Question};
use crate::domain::foundation::Confidence;
use crate::ports::AiError;

/// JSON schema for a deck of exactly `count` styled questions.
pub fn questions_schema(count: u8) -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "minItems": count,
                "maxItems": count,
                "description": format!("Exactly {count} yes/no questions with styling to help analyze the decision"),
                "items": {
                    "type": "object",
                    "properties": {
                        "question": {
                            "type": "string",
                            "description": "A yes/no question to help analyze the decision"
                        },
                        "background": {
                            "type": "string",
                            "description": "A CSS gradient or color for the card background (e.g., 'linear-gradient(135deg, #667eea 0%, #764ba2 100%)' or '#4F46E5')"
                        },
                        "foreground": {
                            "type": "string",
                            "description": "A hex color for the text that contrasts well with the background (e.g., '#FFFFFF' or '#1F2937')"
                        },
                        "emoji": {
                            "type": "string",
                            "description": "A single emoji that represents the theme or mood of the question"
                        }
                    },
                    "required": ["question", "background", "foreground", "emoji"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["questions"],
        "additionalProperties": false
    })
}

/// JSON schema for the analysis result.
pub static ANALYSIS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "recommendation": {
                "type": "string",
                "description": "A short, punchy recommendation (max 8 words) - be direct and actionable"
            },
            "reasoning": {
                "type": "string",
                "description": "Markdown-formatted explanation with bullet points, bold text for key insights, and clear structure"
            },
            "confidence": {
                "type": "number",
                "description": "Confidence level in the recommendation, as a number from 0 to 100"
            }
        },
        "required": ["recommendation", "reasoning", "confidence"],
        "additionalProperties": false
    })
});

#[derive(Debug, Deserialize)]
struct QuestionItemPayload {
    question: String,
    background: String,
    foreground: String,
    emoji: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<QuestionItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    recommendation: String,
    reasoning: String,
    confidence: f64,
}

/// Parses and validates a question-deck reply.
pub fn parse_questions(content: &str, count: u8) -> Result<Vec<Question>, AiError> {
    let payload: QuestionsPayload = serde_json::from_str(content)
        .map_err(|e| AiError::schema_mismatch(format!("malformed questions reply: {e}")))?;

    if payload.questions.len() != usize::from(count) {
        return Err(AiError::schema_mismatch(format!(
            "expected {count} questions, got {}",
            payload.questions.len()
        )));
    }

    payload
        .questions
        .into_iter()
        .map(|q| {
            Question::new(q.question, q.background, q.foreground, q.emoji)
                .map_err(|e| AiError::schema_mismatch(format!("invalid question card: {e}")))
        })
        .collect()
}

/// Parses and validates an analysis reply.
pub fn parse_analysis(content: &str) -> Result<Analysis, AiError> {
    let payload: AnalysisPayload = serde_json::from_str(content)
        .map_err(|e| AiError::schema_mismatch(format!("malformed analysis reply: {e}")))?;

    if !(0.0..=100.0).contains(&payload.confidence) || !payload.confidence.is_finite() {
        return Err(AiError::schema_mismatch(format!(
            "confidence {} outside [0, 100]",
            payload.confidence
        )));
    }
    let confidence = Confidence::new(payload.confidence.round() as u8);

    Analysis::new(payload.recommendation, payload.reasoning, confidence)
        .map_err(|e| AiError::schema_mismatch(format!("invalid analysis: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_json(n: usize) -> String {
        let items: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r##"{{"question":"Question {i}?","background":"#4F46E5","foreground":"#FFFFFF","emoji":"🎯"}}"##
                )
            })
            .collect();
        format!(r#"{{"questions":[{}]}}"#, items.join(","))
    }

    #[test]
    fn parse_questions_accepts_exact_count() {
        let questions = parse_questions(&deck_json(3), 3).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].text(), "Question 0?");
    }

    #[test]
    fn parse_questions_rejects_wrong_count() {
        assert!(matches!(
            parse_questions(&deck_json(2), 3),
            Err(AiError::SchemaMismatch(_))
        ));
        assert!(matches!(
            parse_questions(&deck_json(4), 3),
            Err(AiError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn parse_questions_rejects_malformed_json_and_bad_cards() {
        assert!(parse_questions("not json", 1).is_err());
        let blank_text = r##"{"questions":[{"question":"  ","background":"#111","foreground":"#fff","emoji":"🎯"}]}"##;
        assert!(parse_questions(blank_text, 1).is_err());
    }

    #[test]
    fn parse_analysis_accepts_valid_reply() {
        let reply = r#"{"recommendation":"Go for it!","reasoning":"- **Strong yes signal.**","confidence":82.4}"#;
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.recommendation(), "Go for it!");
        assert_eq!(analysis.confidence().value(), 82);
    }

    #[test]
    fn parse_analysis_rejects_out_of_range_confidence() {
        let high = r#"{"recommendation":"Yes","reasoning":"ok","confidence":101}"#;
        let negative = r#"{"recommendation":"Yes","reasoning":"ok","confidence":-1}"#;
        assert!(parse_analysis(high).is_err());
        assert!(parse_analysis(negative).is_err());
    }

    #[test]
    fn questions_schema_pins_item_count() {
        let schema = questions_schema(5);
        assert_eq!(schema["properties"]["questions"]["minItems"], 5);
        assert_eq!(schema["properties"]["questions"]["maxItems"], 5);
    }
}
