use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One renderable unit within a lesson, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Quiz(QuizBlock),
    Terminal(TerminalBlock),
    Explorer(ExplorerBlock),
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Quiz(b) => &b.id,
            Block::Terminal(b) => &b.id,
            Block::Explorer(b) => &b.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Block::Quiz(b) => &b.title,
            Block::Terminal(b) => &b.title,
            Block::Explorer(b) => &b.title,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Quiz(_) => BlockType::Quiz,
            Block::Terminal(_) => BlockType::Terminal,
            Block::Explorer(_) => BlockType::Explorer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizBlock {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    pub explanation: String,
}

impl Question {
    /// The option marked as correct, if the index is in range
    pub fn answer(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

/// A recorded shell session shown step by step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalBlock {
    pub id: String,
    pub title: String,
    pub steps: Vec<TerminalStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalStep {
    pub cmd: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Props for an interactive widget implemented outside this crate.
///
/// `explorer` names the component; `props` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerBlock {
    pub id: String,
    pub title: String,
    pub explorer: String,
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
}

/// The known block discriminators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Quiz,
    Terminal,
    Explorer,
}

impl BlockType {
    pub const ALL: [BlockType; 3] = [BlockType::Quiz, BlockType::Terminal, BlockType::Explorer];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Quiz => "quiz",
            BlockType::Terminal => "terminal",
            BlockType::Explorer => "explorer",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type: {0}")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}
