//! Migration v3: canonical tag lists

pub(super) const SELECT_TAGGED_PROMPTS_SQL: &str = "SELECT id, tags FROM prompts WHERE tags IS NOT NULL";

pub(super) const UPDATE_PROMPT_TAGS_SQL: &str = "UPDATE prompts SET tags = ?1 WHERE id = ?2";
