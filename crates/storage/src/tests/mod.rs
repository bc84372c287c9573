//! Test utilities and module declarations for storage tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chatlist_core::{Clock, ModelInput, NewResult, parse_timestamp};
use chrono::{Duration, NaiveDateTime};
use tempfile::TempDir;

use crate::Storage;

/// Clock that moves forward one second on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    start: NaiveDateTime,
    ticks: AtomicI64,
}

impl SteppingClock {
    #[expect(clippy::unwrap_used, reason = "test code")]
    pub fn starting_at(ts: &str) -> Self {
        Self { start: parse_timestamp(ts).unwrap(), ticks: AtomicI64::new(0) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let clock = Arc::new(SteppingClock::starting_at("2024-05-01 09:00:00"));
    let storage = Storage::with_clock(&db_path, clock).unwrap();
    (storage, temp_dir)
}

pub fn model_input(name: &str) -> ModelInput {
    ModelInput::new(name, "https://api.example.com/v1/chat/completions", "EXAMPLE_API_KEY", true)
}

mod result_tests;

#[test]
fn prompt_model_result_lifecycle() {
    let (storage, _temp_dir) = create_test_storage();

    // given: a prompt, a model and one recorded answer
    let prompt = storage.create_prompt("Write a sort function", None).unwrap();
    let model = storage.upsert_model(None, &model_input("GPT-4")).unwrap();
    let result = storage
        .record_result(&NewResult::new(prompt.id, Some(model.id), "def sort(items): ..."))
        .unwrap();

    let listed = storage.list_results_for_prompt(prompt.id).unwrap();
    assert_eq!(listed, vec![result.clone()]);

    // when: the model is deleted
    assert_eq!(storage.delete_model(model.id).unwrap(), 1);

    // then: the result survives without a model reference
    let listed = storage.list_results_for_prompt(prompt.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].model_id, None);
    assert_eq!(listed[0].response, "def sort(items): ...");

    // when: the prompt is deleted
    assert_eq!(storage.delete_prompt(prompt.id).unwrap(), 1);

    // then: the result is gone as well
    assert!(storage.get_result(result.id).unwrap().is_none());
    assert_eq!(storage.get_stats().unwrap().result_count, 0);
}

#[test]
fn data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("chatlist.db");

    let prompt_id = {
        let storage = Storage::new(&db_path).unwrap();
        storage.put_setting("request_timeout", "30").unwrap();
        storage.create_prompt("Persist me", Some("io")).unwrap().id
    };

    let storage = Storage::new(&db_path).unwrap();
    assert_eq!(storage.get_prompt(prompt_id).unwrap().unwrap().prompt, "Persist me");
    assert_eq!(storage.get_setting("request_timeout").unwrap().as_deref(), Some("30"));
}
