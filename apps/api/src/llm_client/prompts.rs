// Prompt fragments shared by the attribute extractors.

/// Shared schema rules for attribute extraction prompts.
pub const FIXED_SCHEMA_RULES: &str = "\
    Rules:\n\
    - If something is not explicitly mentioned, return \"\" for text fields and [] for lists.\n\
    - Do NOT change field names.\n\
    - Do NOT omit any field.\n\
    - Always return valid JSON in exactly this schema.";
