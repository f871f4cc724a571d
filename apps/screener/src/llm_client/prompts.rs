// Prompt templates for résumé feedback.

/// Number of résumé characters embedded in the feedback prompt.
pub const RESUME_EXCERPT_CHARS: usize = 1000;

pub const FEEDBACK_PROMPT_TEMPLATE: &str = "\
Analyze the following resume text and provide a brief feedback.
The system predicted the role as: {role} with a match percentage of {match_percentage}%.

Resume Text: {resume_text}... (truncated)

Provide:
1. Key Strengths found in the resume.
2. Missing Keywords for the role of {role}.
3. Personalized advice to improve the resume for this role.

Format: Keep it clear and professional. Use bullet points.";

/// Fills the feedback template with the first `RESUME_EXCERPT_CHARS` characters of the résumé.
pub fn feedback_prompt(resume_text: &str, role: &str, match_percentage: f64) -> String {
    let excerpt: String = resume_text.chars().take(RESUME_EXCERPT_CHARS).collect();
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{match_percentage}", &format!("{match_percentage:?}"))
        .replace("{resume_text}", &excerpt)
}
