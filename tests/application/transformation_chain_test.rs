use std::sync::Arc;

use lecturelens::application::ports::LlmClientError;
use lecturelens::application::services::{
    ChainStage, GenerationFailure, TransformationChain, truncate_chars,
};
use lecturelens::domain::{ChainOptions, NormalizedText};

use crate::helpers::{ScriptedLlmClient, ten_pairs};

fn chain(llm: &Arc<ScriptedLlmClient>, options: ChainOptions) -> TransformationChain {
    TransformationChain::new(llm.clone(), options)
}

#[tokio::test]
async fn given_long_text_when_running_then_summarize_prompt_embeds_at_most_limit_chars() {
    let llm = Arc::new(ScriptedLlmClient::replying(&["summary", &ten_pairs()]));
    let source = format!("{}{}", "a".repeat(50), "b".repeat(50));
    let chain = chain(&llm, ChainOptions::default().with_truncation_limit(50));

    chain.run(&NormalizedText::new(source)).await.unwrap();

    let summarize_prompt = &llm.prompts()[0];
    let (_, embedded) = summarize_prompt.rsplit_once("script: ").unwrap();
    assert_eq!(embedded, "a".repeat(50));
}

#[test]
fn given_multibyte_text_when_truncating_then_never_splits_a_character() {
    let text = "강의".repeat(10);

    let cut = truncate_chars(&text, 3);

    assert_eq!(cut, "강의강");
    assert_eq!(truncate_chars(&text, 1_000), text);
}

#[tokio::test]
async fn given_translation_disabled_when_running_then_makes_two_calls_and_leaves_translation_unset() {
    let questions = ten_pairs();
    let llm = Arc::new(ScriptedLlmClient::replying(&["the summary", &questions]));
    let chain = chain(&llm, ChainOptions::default());

    let artifact = chain
        .run(&NormalizedText::new("lecture text".to_string()))
        .await
        .unwrap();

    assert_eq!(llm.call_count(), 2);
    assert_eq!(artifact.summary, "the summary");
    assert_eq!(artifact.question_set, questions);
    assert!(artifact.translated_question_set.is_none());
    assert_eq!(artifact.questions(), questions);
}

#[tokio::test]
async fn given_translation_enabled_when_running_then_each_stage_feeds_the_next() {
    let llm = Arc::new(ScriptedLlmClient::replying(&[
        "the summary",
        "Q1: What is a mutex?\nA1: A lock.",
        "Q1: mutex란 무엇인가?\nA1: 락.",
    ]));
    let chain = chain(&llm, ChainOptions::default().with_translation("Korean"));

    let artifact = chain
        .run(&NormalizedText::new("lecture text".to_string()))
        .await
        .unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("lecture text"));
    assert!(prompts[1].contains("the summary"));
    assert!(prompts[2].contains("Korean"));
    assert!(prompts[2].contains("Q1: What is a mutex?"));
    assert_eq!(
        artifact.translated_question_set.as_deref(),
        Some("Q1: mutex란 무엇인가?\nA1: 락.")
    );
    assert_eq!(artifact.question_set, "Q1: What is a mutex?\nA1: A lock.");
}

#[tokio::test]
async fn given_summarize_call_fails_when_running_then_aborts_with_summarize_stage() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![Err(LlmClientError::RateLimited)]));
    let chain = chain(&llm, ChainOptions::default().with_translation("Korean"));

    let error = chain
        .run(&NormalizedText::new("text".to_string()))
        .await
        .unwrap_err();

    assert_eq!(error.stage, ChainStage::Summarize);
    assert!(matches!(
        error.cause,
        GenerationFailure::Client(LlmClientError::RateLimited)
    ));
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn given_blank_question_completion_when_running_then_fails_at_generate_questions() {
    let llm = Arc::new(ScriptedLlmClient::replying(&["summary", "   \n"]));
    let chain = chain(&llm, ChainOptions::default().with_translation("Korean"));

    let error = chain
        .run(&NormalizedText::new("text".to_string()))
        .await
        .unwrap_err();

    assert_eq!(error.stage, ChainStage::GenerateQuestions);
    assert!(matches!(error.cause, GenerationFailure::EmptyCompletion));
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn given_malformed_question_layout_when_running_then_passes_text_through_unchanged() {
    let llm = Arc::new(ScriptedLlmClient::replying(&["summary", "Just some prose."]));
    let chain = chain(&llm, ChainOptions::default());

    let artifact = chain
        .run(&NormalizedText::new("text".to_string()))
        .await
        .unwrap();

    assert_eq!(artifact.question_set, "Just some prose.");
}

#[tokio::test]
async fn given_single_stage_when_run_directly_then_returns_completion() {
    let llm = Arc::new(ScriptedLlmClient::replying(&["retry output"]));
    let chain = chain(&llm, ChainOptions::default());

    let output = chain
        .run_stage(ChainStage::Translate, "prompt")
        .await
        .unwrap();

    assert_eq!(output, "retry output");
    assert_eq!(llm.prompts(), vec!["prompt".to_string()]);
}
