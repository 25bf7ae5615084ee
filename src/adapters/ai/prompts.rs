//! Prompt templates for the two model calls.

use crate::domain::decision::Question;

/// Builds the question-generation prompt.
pub fn question_generation(prompt: &str, count: u8) -> String {
    format!(
        r#"You are a decision-making assistant. The user needs help making a decision about:

"{prompt}"

Generate exactly {count} thoughtful yes/no questions that will help analyze this decision from different angles. For each question, also provide:
- A visually appealing CSS background (use gradients like 'linear-gradient(135deg, #667eea 0%, #764ba2 100%)' or solid colors)
- A foreground text color that contrasts well with the background for readability
- A single emoji that captures the theme or mood of the question

The questions should:
- Be answerable with a simple yes or no
- Cover different aspects like practical concerns, emotional factors, long-term impact, risks, and opportunities
- Help uncover the user's true priorities and concerns
- Be specific to the decision context provided

Make each card visually distinct with varied color schemes - use warm colors for emotional questions, cool colors for practical ones, etc. Be creative with the gradients!

Return only yes/no questions that can be answered by swiping right (yes) or left (no)."#
    )
}

/// Builds the analysis prompt from a completed Q&A transcript.
pub fn analysis(prompt: &str, questions: &[Question], answers: &[bool]) -> String {
    let transcript = qa_transcript(questions, answers);
    format!(
        r#"You are a decision-making analyst. The user asked for help with:

"{prompt}"

They answered the following questions by swiping right (yes) or left (no):

{transcript}

Based on their answers, provide:
1. A **short, punchy recommendation** (max 8 words) - be direct like "Go for it!" or "Wait and reassess" or "Yes, with caution"
2. A **markdown-formatted reasoning** that:
   - Uses **bold** for key insights
   - Uses bullet points to organize thoughts
   - References specific answers they gave
   - Keeps it concise but insightful (3-5 bullet points max)
3. A confidence score (0-100) based on how consistent and clear their answers are

Be supportive and insightful. Help them feel confident in their decision."#
    )
}

fn qa_transcript(questions: &[Question], answers: &[bool]) -> String {
    questions
        .iter()
        .zip(answers)
        .map(|(q, a)| format!("Q: {}\nA: {}", q.text(), if *a { "Yes" } else { "No" }))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question::new(text, "#4F46E5", "#FFFFFF", "🎯").unwrap()
    }

    #[test]
    fn generation_prompt_embeds_decision_and_count() {
        let p = question_generation("Should I move cities?", 3);
        assert!(p.contains("\"Should I move cities?\""));
        assert!(p.contains("exactly 3"));
    }

    #[test]
    fn transcript_pairs_questions_with_yes_no_in_order() {
        let qs = vec![question("Is it affordable?"), question("Will you regret it?")];
        let p = analysis("Should I move?", &qs, &[true, false]);
        let yes_at = p.find("Q: Is it affordable?\nA: Yes").unwrap();
        let no_at = p.find("Q: Will you regret it?\nA: No").unwrap();
        assert!(yes_at < no_at);
    }
}
