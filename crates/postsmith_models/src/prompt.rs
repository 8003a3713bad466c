//! System instruction and response schema for post generation.

use serde_json::{Value, json};

/// Instruction sent with every post-generation request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a professional social media content creator specializing in Instagram and TikTok.
Your task is to produce a complete post with a title, caption, hashtags and an image idea \
from the brief supplied by the user.

The content must be objective, natural and focused on engagement.
The output must ALWAYS follow the JSON response schema.

IMPORTANT RULES:
Always answer with valid JSON and no text before or after it.
Never break the schema format.
Never explain the answer.
Never repeat the user's input.
Never use markdown.
Hashtags must be specific and relevant to the niche.
The caption must open with a hook, develop the idea and close with a light call to action.
The visual_prompt field must describe a clear, specific image that is useful to image generation models.
";

/// JSON schema (Gemini `Schema` dialect) for a generated post.
///
/// ```
/// let schema = postsmith_models::post_response_schema();
/// assert_eq!(schema["properties"]["variations"]["type"], "OBJECT");
/// ```
pub fn post_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "title_variations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "caption": { "type": "STRING" },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "visual_prompt": { "type": "STRING" },
            "variations": {
                "type": "OBJECT",
                "properties": {
                    "short_version": { "type": "STRING" },
                    "funny_version": { "type": "STRING" }
                },
                "required": ["short_version", "funny_version"]
            }
        },
        "required": ["title", "caption", "hashtags", "visual_prompt", "variations"]
    })
}
