//! Migration v2: nullable `results.model_id` and dangling reference repair

pub(super) const REBUILD_RESULTS_SQL: &str = "
BEGIN;

CREATE TABLE results_v2 (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prompt_id INTEGER NOT NULL,
    model_id INTEGER,
    response TEXT NOT NULL,
    selected INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    FOREIGN KEY (prompt_id) REFERENCES prompts(id) ON DELETE CASCADE,
    FOREIGN KEY (model_id) REFERENCES models(id) ON DELETE SET NULL
);

INSERT INTO results_v2 (id, prompt_id, model_id, response, selected, created_at)
SELECT id, prompt_id, model_id, response, selected, created_at FROM results;

DROP TABLE results;
ALTER TABLE results_v2 RENAME TO results;

CREATE INDEX IF NOT EXISTS idx_results_prompt_id ON results(prompt_id);
CREATE INDEX IF NOT EXISTS idx_results_model_id ON results(model_id);
CREATE INDEX IF NOT EXISTS idx_results_created_at ON results(created_at);

COMMIT;
";

pub(super) const DELETE_DANGLING_PROMPT_REFS_SQL: &str =
    "DELETE FROM results WHERE prompt_id NOT IN (SELECT id FROM prompts)";

pub(super) const CLEAR_DANGLING_MODEL_REFS_SQL: &str = "UPDATE results SET model_id = NULL
   WHERE model_id IS NOT NULL AND model_id NOT IN (SELECT id FROM models)";
