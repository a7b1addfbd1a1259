use super::context::PromptContext;
use super::model::UserRequest;

const SYSTEM_PROMPT: &str = r#"You are an expert restaurant recommendation assistant.
Your goal is to recommend the best restaurants from the provided list based on the user's city and budget.

Rules:
1. Select the top {top_k} restaurants that best match the request.
2. Order them from best (rank 1) to worst (rank {top_k}).
3. ONLY choose restaurants from the candidate list. Copy each name EXACTLY as written. NEVER invent names.
4. Give a short, specific reason for EACH recommendation, citing attributes from the list
   (e.g. "Rated 4.5 by over 2000 diners", "Great value at 400 for two", "Known for Biryani").
5. Do not repeat the same reason for different restaurants.
6. Output STRICT JSON only. No markdown, no text before or after the JSON.

Output format:
[
  {"name": "Restaurant Name", "rank": 1, "reason": "Specific reason"},
  {"name": "Another Restaurant", "rank": 2, "reason": "Specific reason"}
]"#;

/// The two chat messages sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system_message: String,
    pub user_message: String,
}

pub fn build_prompt(context: &PromptContext, request: &UserRequest, top_k: usize) -> Prompt {
    let system_message = SYSTEM_PROMPT.replace("{top_k}", &top_k.to_string());

    let user_message = format!(
        r#"User request:
- City: {}
- Maximum budget (for two): {}

Candidate restaurants (one per line: name | rating | votes | price for two | type | cuisines | popular dishes):
{}

Return the top {} recommendations as a JSON array in the required format, using only names from the candidate list."#,
        request.city(),
        request.max_price(),
        context.as_str(),
        top_k
    );

    Prompt {
        system_message,
        user_message,
    }
}
