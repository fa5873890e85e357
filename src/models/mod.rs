use serde::{Deserialize, Serialize};

/// Which of the two submitted lists a form field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Column tag ending in `1`
    First,
    /// Column tag ending in any other digit
    Second,
}

/// The two movie lists decoded from one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieLists {
    pub list_a: Vec<String>,
    pub list_b: Vec<String>,
}

impl MovieLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a title to the list selected by `column`
    pub fn push(&mut self, column: Column, title: String) {
        match column {
            Column::First => self.list_a.push(title),
            Column::Second => self.list_b.push(title),
        }
    }

    /// Total number of titles across both lists
    pub fn len(&self) -> usize {
        self.list_a.len() + self.list_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_a.is_empty() && self.list_b.is_empty()
    }
}

/// One movie the model thinks both people would enjoy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    /// Free text as the model wrote it, e.g. "75%" or "high"
    #[serde(deserialize_with = "likelihood_text")]
    pub likelihood: String,
}

/// Accepts a likelihood written as a string or as a bare JSON number
fn likelihood_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Likelihood {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Likelihood::deserialize(deserializer)? {
        Likelihood::Text(text) => text,
        Likelihood::Number(number) => number.to_string(),
    })
}

/// Suggestions for one request, in the order the model listed them
pub type SuggestionResult = Vec<Suggestion>;

/// Reply shape the model is asked to produce and the parser accepts.
///
/// The prompt's example is serialized from this type, so renaming a field
/// here changes both sides at once. Bump [`SCHEMA_VERSION`] when it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SuggestionReply {
    pub common_movies: Vec<Suggestion>,
}

pub const SCHEMA_VERSION: u32 = 1;

/// Number of suggestions the prompt asks for. Replies with more or fewer are still accepted.
pub const REQUESTED_SUGGESTIONS: usize = 3;

impl SuggestionReply {
    /// Placeholder reply embedded in the prompt to show the expected shape
    pub fn example() -> Self {
        let placeholder = Suggestion {
            name: "<movie_name>".to_string(),
            likelihood: "<percentage>".to_string(),
        };
        Self {
            common_movies: vec![placeholder; REQUESTED_SUGGESTIONS],
        }
    }
}

// ============================================================================
// OpenAI Chat Completions Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request body for POST /chat/completions
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// A request carrying a single user message
    pub fn user_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: Some(prompt.to_string()),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Text of the first candidate reply, if the provider sent one
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}
