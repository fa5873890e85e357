use crate::models::{SuggestionReply, REQUESTED_SUGGESTIONS, SCHEMA_VERSION};

/// Builds the completion prompt for two movie lists.
///
/// The output depends only on the two lists. Empty lists are embedded as `[]`
/// and the model is still asked for suggestions.
pub fn build_prompt(list_a: &[String], list_b: &[String]) -> String {
    format!(
        "I will provide two lists of movies that two different people like. \
         You must respond with a list of {count} different movies that both people would like, \
         with the name of each movie and a percentage likelihood of both people liking it. \
         Respond only with JSON in exactly the shape shown below.\n\
         List 1: {list_a:?}\n\
         List 2: {list_b:?}\n\
         \n\
         Reply schema v{version}:\n\
         {shape}",
        count = REQUESTED_SUGGESTIONS,
        version = SCHEMA_VERSION,
        shape = reply_shape(),
    )
}

/// Example reply rendered from [`SuggestionReply`], the same type the parser decodes into
fn reply_shape() -> String {
    // Serializing a plain struct of strings cannot fail
    serde_json::to_string_pretty(&SuggestionReply::example()).unwrap_or_default()
}
