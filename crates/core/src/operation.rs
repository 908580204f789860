//! Generation operations understood by the external script.
//!
//! The operation name is always the first argument passed to the script.

use std::fmt;

/// Operation name for keyword expansion from a seed keyword.
pub const OP_GENERATE_KEYWORDS: &str = "generate_keywords";

/// Operation name for title suggestions for a keyword.
pub const OP_GENERATE_TITLES: &str = "generate_titles";

/// Operation name for topic outlines for a title.
pub const OP_GENERATE_TOPICS: &str = "generate_topics";

/// Operation name for full content for a topic.
pub const OP_GENERATE_CONTENT: &str = "generate_content";

/// One of the fixed set of script subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GenerateKeywords,
    GenerateTitles,
    GenerateTopics,
    GenerateContent,
}

impl Operation {
    /// The name passed to the script as its first argument.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateKeywords => OP_GENERATE_KEYWORDS,
            Self::GenerateTitles => OP_GENERATE_TITLES,
            Self::GenerateTopics => OP_GENERATE_TOPICS,
            Self::GenerateContent => OP_GENERATE_CONTENT,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
