use anyhow::Result;
use chatlist_storage::{StatsStore, Storage};

use crate::print_json;

pub(crate) async fn run(storage: &Storage) -> Result<()> {
    print_json(&StatsStore::get_stats(storage).await?)
}
