use lecturelens::domain::{ChainArtifact, ChainOptions, DEFAULT_TRUNCATION_LIMIT, PipelineResult};

fn artifact(translated: Option<&str>) -> ChainArtifact {
    ChainArtifact {
        summary: "summary".to_string(),
        question_set: "Q1: What?\nA1: That.".to_string(),
        translated_question_set: translated.map(str::to_string),
    }
}

#[test]
fn given_no_translation_when_mapping_to_result_then_questions_are_the_generated_set() {
    let result = PipelineResult::from(artifact(None));

    assert_eq!(result.summary, "summary");
    assert_eq!(result.questions, "Q1: What?\nA1: That.");
}

#[test]
fn given_translation_when_mapping_to_result_then_questions_are_the_translated_set() {
    let artifact = artifact(Some("Q1: 무엇?\nA1: 그것."));

    assert_eq!(artifact.questions(), "Q1: 무엇?\nA1: 그것.");
    assert_eq!(PipelineResult::from(artifact).questions, "Q1: 무엇?\nA1: 그것.");
}

#[test]
fn given_default_chain_options_when_created_then_truncates_at_ten_thousand_without_translation() {
    let options = ChainOptions::default();

    assert_eq!(options.truncation_limit, DEFAULT_TRUNCATION_LIMIT);
    assert_eq!(DEFAULT_TRUNCATION_LIMIT, 10_000);
    assert!(options.translation.is_none());
}

#[test]
fn given_pipeline_result_when_serialized_then_has_summary_and_questions_fields() {
    let json = serde_json::to_value(PipelineResult::from(artifact(None))).unwrap();

    assert_eq!(json["summary"], "summary");
    assert_eq!(json["questions"], "Q1: What?\nA1: That.");
}
