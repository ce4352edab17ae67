// Shared helpers for unit tests across the crate

use std::path::PathBuf;

use tempfile::TempDir;

use crate::models::CourseTranslationMap;
use crate::value::ContentValue;

pub fn create_test_content_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

pub fn parse(json: &str) -> ContentValue {
    serde_json::from_str(json).expect("test JSON should parse")
}

/// Wrap a single lesson body as `c1.modules.m1.lessons.l1`
pub fn single_lesson_json(lesson: &str) -> String {
    format!(
        r#"{{
            "c1": {{
                "title": "Course One",
                "description": "A course",
                "duration": "1h",
                "tags": ["solana"],
                "modules": {{
                    "m1": {{
                        "title": "Module One",
                        "description": "A module",
                        "lessons": {{ "l1": {lesson} }}
                    }}
                }}
            }}
        }}"#
    )
}

/// Wrap a list of block objects in a lesson with markdown content
pub fn single_block_list_json(blocks: &str) -> String {
    single_lesson_json(&format!(
        r#"{{"title": "Lesson", "content": "Body", "duration": "5m", "blocks": [{blocks}]}}"#
    ))
}

/// A quiz question with the given options and answer index
pub fn question_json(id: &str, options: &[&str], answer_index: i64) -> String {
    let options = serde_json::to_string(options).expect("options serialize");
    format!(
        r#"{{"id": "{id}", "prompt": "Pick one", "options": {options}, "answerIndex": {answer_index}, "explanation": "Because"}}"#
    )
}

pub fn quiz_json(id: &str, questions: &[String]) -> String {
    format!(
        r#"{{"type": "quiz", "id": "{id}", "title": "Quiz", "questions": [{}]}}"#,
        questions.join(",")
    )
}

/// Two courses with quizzes, terminals and explorers spread across modules
pub fn sample_tree() -> CourseTranslationMap {
    serde_json::from_str(SAMPLE_TREE).expect("sample tree should decode")
}

pub const SAMPLE_TREE: &str = r##"{
    "solana-fundamentals": {
        "title": "Solana Fundamentals",
        "description": "Accounts, transactions and programs",
        "duration": "3h",
        "tags": ["solana", "beginner"],
        "modules": {
            "module-getting-started": {
                "title": "Getting Started",
                "description": "Tooling",
                "lessons": {
                    "l1": {
                        "title": "Install the CLI",
                        "content": "# Install\n\nUse the `solana` CLI to talk to a cluster.",
                        "duration": "10 min",
                        "blocks": [
                            {
                                "type": "terminal",
                                "id": "install",
                                "title": "Install",
                                "steps": [
                                    {"cmd": "solana --version", "output": "solana-cli 1.18.0", "note": "Check the install"}
                                ]
                            },
                            {
                                "type": "quiz",
                                "id": "cli-quiz",
                                "title": "CLI check",
                                "questions": [
                                    {"id": "q1", "prompt": "Which command prints the version?", "options": ["solana --version", "solana balance"], "answerIndex": 0, "explanation": "The version flag"},
                                    {"id": "q2", "prompt": "Default cluster?", "options": ["devnet", "mainnet-beta", "localnet"], "answerIndex": 1, "explanation": "Config default"}
                                ]
                            }
                        ]
                    },
                    "l2": {
                        "title": "Keypairs",
                        "content": "A keypair holds your wallet secret.",
                        "duration": "8 min",
                        "hints": ["Never share the secret key"]
                    }
                }
            },
            "module-accounts": {
                "title": "Accounts",
                "description": "Everything is an account",
                "lessons": {
                    "l1": {
                        "title": "Account model",
                        "content": "Every cuenta stores lamports and data.",
                        "duration": "12 min",
                        "blocks": [
                            {
                                "type": "explorer",
                                "id": "account-explorer",
                                "title": "Inspect an account",
                                "explorer": "AccountExplorer",
                                "props": {"address": "11111111111111111111111111111111"}
                            },
                            {
                                "type": "quiz",
                                "id": "account-quiz",
                                "title": "Accounts",
                                "questions": [
                                    {"id": "q1", "prompt": "What pays rent?", "options": ["lamports", "tokens"], "answerIndex": 0, "explanation": "Rent is paid in lamports"}
                                ]
                            }
                        ]
                    }
                }
            }
        }
    },
    "anchor-development": {
        "title": "Anchor Development",
        "description": "Programs with Anchor",
        "duration": "4h",
        "tags": ["anchor"],
        "modules": {
            "module-intro": {
                "title": "Intro",
                "description": "First program",
                "lessons": {
                    "hello": {
                        "title": "Hello Anchor",
                        "content": "Run `anchor init` to scaffold a workspace.",
                        "duration": "15 min",
                        "blocks": [
                            {
                                "type": "quiz",
                                "id": "anchor-quiz",
                                "title": "Anchor basics",
                                "questions": [
                                    {"id": "q1", "prompt": "Which macro marks the program module?", "options": ["#[program]", "#[account]"], "answerIndex": 0, "explanation": "The program attribute"}
                                ]
                            }
                        ]
                    }
                }
            }
        }
    }
}"##;
