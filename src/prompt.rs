//! Prompt construction for the completion service
//!
//! Pure string formatting: same inputs, same bytes out. The "return only
//! the SQL" directive is load-bearing — nothing downstream strips prose
//! from the response, so a chatty reply reaches the database verbatim and
//! fails there.

/// Build the single instruction text sent to the completion service.
///
/// The user query is embedded unmodified; an empty query still produces a
/// well-formed prompt.
pub fn build_prompt(schema_text: &str, user_query: &str) -> String {
    format!(
        "Given the following database schema:\n{schema_text}\n\n\
         Convert this natural language query to SQL:\n{user_query}\n\n\
         Return only the SQL query without any explanation."
    )
}
