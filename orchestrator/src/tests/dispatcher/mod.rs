pub mod direct;

use mockall::predicate::eq;
use rstest::rstest;

use crate::core::client::database::MockDatabaseClient;
use crate::core::client::queue::MockQueueClient;
use crate::core::client::search_index::MockSearchIndexClient;
use crate::service::config_diff::ConfigDiff;
use crate::service::dispatcher::{build_dataset_manager, decide_update, UpdateDecision};
use crate::tests::common::{dataset, DS_ID};
use crate::tests::config::TestConfigBuilder;
use crate::types::action::{ActionIntent, ActionPriority, DatasetAction, DispatchOutcome};
use crate::types::dataset::Dataset;
use crate::types::params::DispatchStrategy;

#[rstest]
#[case(ConfigDiff::InstrParamsDiff, false, UpdateDecision::Add { del_first: true })]
#[case(ConfigDiff::InstrParamsDiff, true, UpdateDecision::Add { del_first: true })]
#[case(ConfigDiff::NewMolDb, false, UpdateDecision::Add { del_first: false })]
#[case(ConfigDiff::NewMolDb, true, UpdateDecision::Add { del_first: false })]
#[case(ConfigDiff::Equal, true, UpdateDecision::Reindex { priority: ActionPriority::High })]
#[case(ConfigDiff::Equal, false, UpdateDecision::Nothing)]
fn update_decision_table(#[case] diff: ConfigDiff, #[case] metadata_changed: bool, #[case] expected: UpdateDecision) {
    assert_eq!(decide_update(diff, metadata_changed), expected);
}

#[test]
fn priorities_map_to_queue_levels() {
    assert_eq!(ActionPriority::default(), ActionPriority::Low);
    assert_eq!([ActionPriority::Low, ActionPriority::Standard, ActionPriority::High].map(u8::from), [0, 1, 2]);
    assert!(ActionPriority::High > ActionPriority::Standard);
}

/// Expect `times` status changes of a stored dataset, each one a row update plus an index sync
pub(crate) fn expect_status_update(db: &mut MockDatabaseClient, search_index: &mut MockSearchIndexClient, times: usize) {
    db.expect_update_dataset().times(times).returning(|_| Ok(()));
    search_index.expect_sync_dataset().with(eq(DS_ID)).times(times).returning(|_| Ok(()));
}

#[rstest]
#[tokio::test]
async fn process_routes_delete_of_queued_manager_at_high_priority(dataset: Dataset) {
    let stored = dataset.clone();
    let mut db = MockDatabaseClient::new();
    db.expect_get_dataset().returning(move |_| Ok(Some(stored.clone())));
    let mut search_index = MockSearchIndexClient::new();
    expect_status_update(&mut db, &mut search_index, 1);

    let mut queue = MockQueueClient::new();
    queue.expect_publish_status().times(1).returning(|_| Ok(()));
    queue
        .expect_publish_action()
        .withf(|message, priority| message.action == DatasetAction::Delete && *priority == ActionPriority::High)
        .times(1)
        .returning(|_, _| Ok(()));

    let config = TestConfigBuilder::new()
        .configure_database(db)
        .configure_search_index(search_index)
        .configure_queue_client(queue)
        .build();
    let manager = build_dataset_manager(DispatchStrategy::Queued, config);

    let intent = ActionIntent::new(dataset, DatasetAction::Delete).with_priority(ActionPriority::Low);
    let outcome = manager.process(intent).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Enqueued { action: DatasetAction::Delete, priority: ActionPriority::High });
}
