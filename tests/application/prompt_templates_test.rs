use lecturelens::application::services::prompt_templates::{
    generate_questions_prompt, summarize_prompt, translate_prompt,
};

#[test]
fn given_docs_when_building_summarize_prompt_then_embeds_them_once() {
    let prompt = summarize_prompt("Process scheduling basics");

    assert!(prompt.contains("script: Process scheduling basics"));
    assert!(!prompt.contains("{docs}"));
}

#[test]
fn given_summary_when_building_question_prompt_then_requests_ten_pairs_in_layout() {
    let prompt = generate_questions_prompt("A summary.");

    assert!(prompt.contains("10 questions"));
    assert!(prompt.contains("Q1: Content of question 1\nA1: Content of answer 1"));
    assert!(prompt.contains("in English"));
    assert!(prompt.ends_with("script: A summary."));
}

#[test]
fn given_script_with_braces_when_building_translation_prompt_then_keeps_them_literal() {
    let prompt = translate_prompt("Korean", "Q1: What does {language} mean here?");

    assert!(prompt.contains("into Korean"));
    assert!(prompt.contains("Q1: What does {language} mean here?"));
    assert!(prompt.contains("Keep technical terms and proper nouns in English"));
}
