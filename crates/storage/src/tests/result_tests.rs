use chatlist_core::{ModelId, ModelInput, NewResult, PromptId, ResultId, format_timestamp};

use super::{create_test_storage, model_input};
use crate::{ResultFilter, StorageError};

#[test]
fn record_result_for_missing_prompt_is_rejected() {
    let (storage, _temp_dir) = create_test_storage();
    let model = storage.upsert_model(None, &model_input("GPT-4")).unwrap();

    let err = storage.record_result(&NewResult::new(PromptId(99), Some(model.id), "lost")).unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
    assert_eq!(storage.get_stats().unwrap().result_count, 0);
}

#[test]
fn missing_model_is_recorded_without_reference() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Who wrote this?", None).unwrap();

    let result = storage.record_result(&NewResult::new(prompt.id, Some(ModelId(404)), "nobody")).unwrap();
    assert_eq!(result.model_id, None);
    assert_eq!(storage.get_result(result.id).unwrap().unwrap().model_id, None);
}

#[test]
fn inactive_model_keeps_reference() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Still counts", None).unwrap();
    let dormant = storage
        .upsert_model(None, &ModelInput::new("Dormant", "https://api.example.com", "KEY", false))
        .unwrap();

    let result = storage.record_result(&NewResult::new(prompt.id, Some(dormant.id), "late answer")).unwrap();
    assert_eq!(result.model_id, Some(dormant.id));
}

#[test]
fn batch_shares_timestamp_and_rolls_back_on_error() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Batch me", None).unwrap();
    let model = storage.upsert_model(None, &model_input("GPT-4")).unwrap();

    let recorded = storage
        .record_results(&[
            NewResult::new(prompt.id, Some(model.id), "one"),
            NewResult::new(prompt.id, None, "two").selected(true),
        ])
        .unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].created_at, recorded[1].created_at);
    assert!(recorded[1].selected);

    let err = storage
        .record_results(&[
            NewResult::new(prompt.id, Some(model.id), "three"),
            NewResult::new(PromptId(12345), Some(model.id), "four"),
        ])
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(storage.list_results_for_prompt(prompt.id).unwrap().len(), 2);
}

#[test]
fn empty_batch_records_nothing() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.record_results(&[]).unwrap().is_empty());
}

#[test]
fn set_selected_is_idempotent() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Pick one", None).unwrap();
    let result = storage.record_result(&NewResult::new(prompt.id, None, "this one")).unwrap();
    assert!(!result.selected);

    storage.set_selected(result.id, true).unwrap();
    storage.set_selected(result.id, true).unwrap();
    assert!(storage.get_result(result.id).unwrap().unwrap().selected);

    storage.set_selected(result.id, false).unwrap();
    assert!(!storage.get_result(result.id).unwrap().unwrap().selected);
}

#[test]
fn set_selected_on_missing_result_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.set_selected(ResultId(8), true).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "result", .. }));
}

#[test]
fn results_for_prompt_in_recording_order() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Order", None).unwrap();
    let first = storage.record_result(&NewResult::new(prompt.id, None, "first")).unwrap();
    let second = storage.record_result(&NewResult::new(prompt.id, None, "second")).unwrap();
    assert!(second.created_at > first.created_at);

    let listed: Vec<ResultId> =
        storage.list_results_for_prompt(prompt.id).unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(listed, vec![first.id, second.id]);

    // clock ticks once for the prompt, once per single-result batch
    assert_eq!(format_timestamp(&first.created_at), "2024-05-01 09:00:01");
}

#[test]
fn list_results_applies_filters() {
    let (storage, _temp_dir) = create_test_storage();
    let sorting = storage.create_prompt("Sorting", None).unwrap();
    let poetry = storage.create_prompt("Poetry", None).unwrap();
    let gpt = storage.upsert_model(None, &model_input("GPT-4")).unwrap();
    let groq = storage.upsert_model(None, &model_input("Groq")).unwrap();

    storage.record_result(&NewResult::new(sorting.id, Some(gpt.id), "gpt sort").selected(true)).unwrap();
    storage.record_result(&NewResult::new(sorting.id, Some(groq.id), "groq sort")).unwrap();
    let latest = storage.record_result(&NewResult::new(poetry.id, Some(gpt.id), "gpt poem").selected(true)).unwrap();

    let all = storage.list_results(&ResultFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, latest.id);

    let by_prompt = storage.list_results(&ResultFilter { prompt_id: Some(sorting.id), ..Default::default() }).unwrap();
    assert_eq!(by_prompt.len(), 2);

    let by_model = storage.list_results(&ResultFilter { model_id: Some(gpt.id), ..Default::default() }).unwrap();
    assert_eq!(by_model.len(), 2);

    let chosen = storage
        .list_results(&ResultFilter { prompt_id: Some(sorting.id), model_id: None, selected_only: true })
        .unwrap();
    assert_eq!(chosen.len(), 1);
    assert_eq!(chosen[0].response, "gpt sort");
}

#[test]
fn stats_count_every_table() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Count me", None).unwrap();
    let active = storage.upsert_model(None, &model_input("Active")).unwrap();
    storage.upsert_model(None, &ModelInput::new("Idle", "https://x", "KEY", false)).unwrap();
    storage.record_result(&NewResult::new(prompt.id, Some(active.id), "a").selected(true)).unwrap();
    storage.record_result(&NewResult::new(prompt.id, None, "b")).unwrap();
    storage.put_setting("export_path", "/tmp/out").unwrap();

    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.prompt_count, 1);
    assert_eq!(stats.model_count, 2);
    assert_eq!(stats.active_model_count, 1);
    assert_eq!(stats.result_count, 2);
    assert_eq!(stats.selected_result_count, 1);
    assert_eq!(stats.orphaned_result_count, 1);
    assert_eq!(stats.setting_count, 1);
}

#[test]
fn undecodable_result_row_fails_the_listing() {
    let (storage, _temp_dir) = create_test_storage();
    let prompt = storage.create_prompt("Broken answers", None).unwrap();
    storage.record_result(&NewResult::new(prompt.id, None, "fine")).unwrap();
    storage
        .pool
        .get()
        .unwrap()
        .execute(
            "INSERT INTO results (prompt_id, model_id, response, selected, created_at)
               VALUES (?1, NULL, 'bad', 0, 'not a date')",
            [prompt.id.0],
        )
        .unwrap();

    let err = storage.list_results_for_prompt(prompt.id).unwrap_err();
    assert!(matches!(err, StorageError::DataCorruption { .. }));
    assert!(storage.list_results(&ResultFilter::default()).is_err());
}
