/// Summarization instruction. `{docs}` receives the truncated source text.
pub const SUMMARIZE_TEMPLATE: &str = "\
You are responsible for summarizing the lecture materials of your major in a way that is easy for students to understand. \
Please organize and summarize the given sentences, and ignore external links and unnecessary words.
script: {docs}";

/// Question generation instruction. `{summary}` receives the summary.
pub const GENERATE_QUESTIONS_TEMPLATE: &str = "\
You are responsible for creating 10 questions to help students understand the summarized lecture materials of your major.
Avoid non-essential questions.
Questions should be short answer or essay format.
Technical terms and proper nouns related to the major should be used in English. Generate answers to questions concisely, focusing on keywords.
The output format is as follows.

Output format:

Q1: Content of question 1
A1: Content of answer 1

Q2: Content of question 2
A2: Content of answer 2

Q3: Content of question 3
A3: Content of answer 3

Continue the same layout up to Q10 and A10.

script: {summary}";

/// Translation instruction. `{language}` is the target language and
/// `{script}` the generated question set.
pub const TRANSLATE_TEMPLATE: &str = "\
Translate the given sentences into {language} in a natural way, following the format. Keep technical terms and proper nouns in English.
{script}";

pub fn summarize_prompt(docs: &str) -> String {
    SUMMARIZE_TEMPLATE.replace("{docs}", docs)
}

pub fn generate_questions_prompt(summary: &str) -> String {
    GENERATE_QUESTIONS_TEMPLATE.replace("{summary}", summary)
}

pub fn translate_prompt(language: &str, script: &str) -> String {
    // `{script}` last so placeholders inside the generated text stay literal.
    TRANSLATE_TEMPLATE
        .replace("{language}", language)
        .replace("{script}", script)
}
