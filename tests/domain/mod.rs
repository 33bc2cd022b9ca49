mod chain_artifact_test;
