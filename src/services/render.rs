use std::fmt::Write;

use crate::models::Suggestion;
use crate::services::suggestions::{DegradedOutput, Outcome};

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Renders the "Common Movies" fragment, one list item per suggestion
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut items = String::new();
    for suggestion in suggestions {
        let _ = write!(
            items,
            r#"
          <li class="list-group-item">
            <strong>{}</strong> - Likelihood: {}
          </li>"#,
            escape_html(&suggestion.name),
            escape_html(&suggestion.likelihood),
        );
    }

    format!(
        r#"<div class="container mt-3">
  <div class="row">
    <div class="col">
      <h3>Common Movies</h3>
      <ul class="list-group">{items}
      </ul>
    </div>
  </div>
</div>"#
    )
}

/// Renders an error banner followed by an empty suggestions list
pub fn render_degraded(degraded: &DegradedOutput) -> String {
    format!(
        "<h1 class=\"text-red-500\" role=\"alert\">{}</h1>\n{}",
        escape_html(&degraded.message),
        render_suggestions(&[]),
    )
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Suggestions(suggestions) => render_suggestions(suggestions),
        Outcome::Degraded(degraded) => render_degraded(degraded),
    }
}
