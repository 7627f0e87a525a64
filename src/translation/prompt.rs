pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a translator. \
     Translate the user's {source_language} text into {target_language}. \
     Only provide the translation and nothing else.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(source_language: &str, target_language: &str) -> String {
    // Placeholders are for string replacement, not format arguments
    SYSTEM_PROMPT_TEMPLATE
        .replace("{source_language}", source_language)
        .replace("{target_language}", target_language)
}
