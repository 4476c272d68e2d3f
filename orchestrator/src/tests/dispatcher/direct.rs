use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use mockall::predicate::eq;
use mockall::Sequence;
use rstest::rstest;

use super::expect_status_update;
use crate::core::client::database::{DatabaseError, MockDatabaseClient};
use crate::core::client::job::{JobFactoryError, MockAnnotationJobFactory};
use crate::core::client::mol_db::MockMolDbClient;
use crate::core::client::queue::MockQueueClient;
use crate::core::client::search_index::MockSearchIndexClient;
use crate::core::client::storage::{MockImageStoreClient, MockRawDataClient};
use crate::error::OrchestratorError;
use crate::service::dispatcher::{DatasetManager, DirectDatasetManager};
use crate::tests::common::{dataset, hmdb, DS_ID};
use crate::tests::config::TestConfigBuilder;
use crate::types::action::{ActionExtras, ActionPriority, DatasetAction, DispatchOutcome};
use crate::types::dataset::{Dataset, DatasetStatus, MolDbRef};
use crate::types::image::{ImageKind, StorageClass};
use crate::types::mol_db::{FinishedJob, MolDbInfo};
use crate::types::params::{DeliveryMode, DispatchParams};
use crate::types::queue::DatasetStatusMessage;

#[rstest]
#[tokio::test]
async fn add_saves_and_starts_annotation(dataset: Dataset) {
    let mut db = MockDatabaseClient::new();
    db.expect_get_dataset().times(1).returning(|_| Ok(None));
    db.expect_insert_dataset().times(1).returning(|_| Ok(()));

    let mut search_index = MockSearchIndexClient::new();
    search_index.expect_sync_dataset().with(eq(DS_ID)).times(1).returning(|_| Ok(()));

    let mut job_factory = MockAnnotationJobFactory::new();
    job_factory.expect_run().withf(|ds| ds.id == DS_ID).times(1).returning(|_| Ok(()));

    // Saving on add never publishes the status
    let mut queue = MockQueueClient::new();
    queue.expect_publish_status().never();

    let config = TestConfigBuilder::new()
        .configure_database(db)
        .configure_search_index(search_index)
        .configure_job_factory(job_factory)
        .configure_queue_client(queue)
        .build();

    let outcome = DirectDatasetManager::new(config).add(dataset, ActionExtras::default(), ActionPriority::Low).await;

    assert_eq!(outcome.unwrap(), DispatchOutcome::Executed(DatasetAction::Add));
}

#[rstest]
#[tokio::test]
async fn add_with_del_first_deletes_before_saving(dataset: Dataset) {
    let mut seq = Sequence::new();
    let mut db = MockDatabaseClient::new();
    let mut image_store = MockImageStoreClient::new();
    let mut search_index = MockSearchIndexClient::new();
    let mut queue = MockQueueClient::new();

    db.expect_get_ion_image_storage_class().times(1).in_sequence(&mut seq).returning(|_| Ok(StorageClass::Db));
    db.expect_get_iso_image_ids()
        .with(eq(DS_ID))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![vec![Some("iso-1".to_string()), None, Some("iso-2".to_string())]]));
    image_store
        .expect_delete_image_by_id()
        .with(eq(StorageClass::Db), eq(ImageKind::IsoImage), eq("iso-1"))
        .times(1)
        .returning(|_, _, _| Ok(()));
    image_store
        .expect_delete_image_by_id()
        .with(eq(StorageClass::Db), eq(ImageKind::IsoImage), eq("iso-2"))
        .times(1)
        .returning(|_, _, _| Ok(()));
    search_index.expect_delete_dataset().with(eq(DS_ID)).times(1).in_sequence(&mut seq).returning(|_| Ok(()));
    db.expect_delete_dataset().with(eq(DS_ID)).times(1).in_sequence(&mut seq).returning(|_| Ok(()));
    queue
        .expect_publish_status()
        .with(eq(DatasetStatusMessage::new(DS_ID, DatasetStatus::Deleted)))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    db.expect_get_dataset().times(1).in_sequence(&mut seq).returning(|_| Ok(None));
    db.expect_insert_dataset().times(1).in_sequence(&mut seq).returning(|_| Ok(()));
    search_index.expect_sync_dataset().times(1).in_sequence(&mut seq).returning(|_| Ok(()));

    let mut job_factory = MockAnnotationJobFactory::new();
    job_factory.expect_run().times(1).in_sequence(&mut seq).returning(|_| Ok(()));

    let config = TestConfigBuilder::new()
        .configure_database(db)
        .configure_image_store(image_store)
        .configure_search_index(search_index)
        .configure_queue_client(queue)
        .configure_job_factory(job_factory)
        .build();

    let outcome = DirectDatasetManager::new(config).add(dataset, ActionExtras::del_first(), ActionPriority::Low).await;

    assert_eq!(outcome.unwrap(), DispatchOutcome::Executed(DatasetAction::Add));
}

#[rstest]
#[tokio::test]
async fn job_factory_errors_propagate_unmodified(dataset: Dataset) {
    let mut db = MockDatabaseClient::new();
    db.expect_get_dataset().returning(|_| Ok(None));
    db.expect_insert_dataset().returning(|_| Ok(()));
    let mut search_index = MockSearchIndexClient::new();
    search_index.expect_sync_dataset().returning(|_| Ok(()));

    let mut job_factory = MockAnnotationJobFactory::new();
    job_factory.expect_run().times(1).returning(|ds| {
        Err(JobFactoryError::Rejected { ds_id: ds.id.clone(), reason: "no spectra found".to_string() })
    });

    let config = TestConfigBuilder::new()
        .configure_database(db)
        .configure_search_index(search_index)
        .configure_job_factory(job_factory)
        .build();

    let err = DirectDatasetManager::new(config).add(dataset, ActionExtras::default(), ActionPriority::Low).await;

    let err = err.unwrap_err();
    assert_eq!(err.to_string(), format!("Annotation job for dataset {} rejected: no spectra found", DS_ID));
    assert_matches!(err, OrchestratorError::JobFactoryError(JobFactoryError::Rejected { .. }));
}

#[rstest]
#[tokio::test]
async fn update_reindexes_selected_databases_and_drops_the_rest(mut dataset: Dataset, hmdb: MolDbInfo) {
    dataset.status = DatasetStatus::Finished;
    let stored = dataset.clone();

    let mut db = MockDatabaseClient::new();
    db.expect_get_dataset().times(2).returning(move |_| Ok(Some(stored.clone())));
    db.expect_update_dataset().withf(|ds| ds.status == DatasetStatus::Indexing).times(1).returning(|_| Ok(()));
    db.expect_update_dataset().withf(|ds| ds.status == DatasetStatus::Finished).times(1).returning(|_| Ok(()));
    db.expect_get_finished_jobs()
        .with(eq(DS_ID))
        .times(1)
        .returning(|_| Ok(vec![FinishedJob { id: 10, mol_db_id: 1 }, FinishedJob { id: 11, mol_db_id: 2 }]));
    db.expect_delete_job().with(eq(11i64)).times(1).returning(|_| Ok(()));

    let mut mol_db = MockMolDbClient::new();
    let hmdb_info = hmdb.clone();
    mol_db.expect_find_db_by_id().with(eq(1i64)).returning(move |_| Ok(hmdb_info.clone()));
    mol_db.expect_find_db_by_id().with(eq(2i64)).returning(|_| {
        Ok(MolDbInfo { id: 2, name: "ChEBI".to_string(), version: "2018".to_string() })
    });

    let mut search_index = MockSearchIndexClient::new();
    search_index.expect_sync_dataset().times(2).returning(|_| Ok(()));
    search_index.expect_delete_dataset().with(eq(DS_ID)).times(1).returning(|_| Ok(()));
    let isotope_generation = dataset.config.isotope_generation.clone();
    search_index
        .expect_index_dataset()
        .withf(move |ds_id, db, iso| ds_id == DS_ID && *db == hmdb && *iso == isotope_generation)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut seq = Sequence::new();
    let mut queue = MockQueueClient::new();
    for status in [DatasetStatus::Indexing, DatasetStatus::Finished] {
        queue
            .expect_publish_status()
            .with(eq(DatasetStatusMessage::new(DS_ID, status)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
    }

    let config = TestConfigBuilder::new()
        .configure_database(db)
        .configure_mol_db(mol_db)
        .configure_search_index(search_index)
        .configure_queue_client(queue)
        .build();

    let outcome = DirectDatasetManager::new(config).update(dataset, ActionPriority::High).await;

    assert_eq!(outcome.unwrap(), DispatchOutcome::Executed(DatasetAction::Update));
}

#[rstest]
#[case::versions_compared(true, vec![10], vec!["2018"])]
#[case::names_compared(false, vec![], vec!["2016", "2018"])]
#[tokio::test]
async fn update_after_removing_a_database_version(
    mut dataset: Dataset,
    #[case] reindex_on_removed_mol_db: bool,
    #[case] deleted_jobs: Vec<i64>,
    #[case] indexed_versions: Vec<&'static str>,
) {
    dataset.status = DatasetStatus::Finished;
    dataset.config.databases = vec![MolDbRef::new("HMDB", Some("2018"))];
    let stored = dataset.clone();

    let mut db = MockDatabaseClient::new();
    let mut search_index = MockSearchIndexClient::new();
    db.expect_get_dataset().returning(move |_| Ok(Some(stored.clone())));
    expect_status_update(&mut db, &mut search_index, 2);
    db.expect_get_finished_jobs()
        .returning(|_| Ok(vec![FinishedJob { id: 10, mol_db_id: 1 }, FinishedJob { id: 11, mol_db_id: 3 }]));
    for job_id in deleted_jobs {
        db.expect_delete_job().with(eq(job_id)).times(1).returning(|_| Ok(()));
    }

    let mut mol_db = MockMolDbClient::new();
    mol_db.expect_find_db_by_id().returning(|id| {
        let version = if id == 1 { "2016" } else { "2018" };
        Ok(MolDbInfo { id, name: "HMDB".to_string(), version: version.to_string() })
    });

    search_index.expect_delete_dataset().times(1).returning(|_| Ok(()));
    let indexed = Arc::new(Mutex::new(Vec::new()));
    let indexed_clone = indexed.clone();
    search_index.expect_index_dataset().returning(move |_, mol_db, _| {
        indexed_clone.lock().unwrap().push(mol_db.version.clone());
        Ok(())
    });

    let config = TestConfigBuilder::new()
        .configure_dispatch_params(DispatchParams {
            delivery_mode: DeliveryMode::Local,
            reindex_on_removed_mol_db,
            ..Default::default()
        })
        .configure_database(db)
        .configure_mol_db(mol_db)
        .configure_search_index(search_index)
        .build();

    DirectDatasetManager::new(config).update(dataset, ActionPriority::High).await.unwrap();

    assert_eq!(*indexed.lock().unwrap(), indexed_versions);
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_dataset_skips_image_cleanup(dataset: Dataset) {
    let mut db = MockDatabaseClient::new();
    db.expect_get_ion_image_storage_class()
        .times(1)
        .returning(|id| Err(DatabaseError::DatasetNotFound(id.to_string())));
    db.expect_get_iso_image_ids().never();
    db.expect_delete_dataset().with(eq(DS_ID)).times(1).returning(|_| Ok(()));

    let mut search_index = MockSearchIndexClient::new();
    search_index.expect_delete_dataset().times(1).returning(|_| Ok(()));

    let mut raw_data = MockRawDataClient::new();
    raw_data
        .expect_delete_input_data()
        .with(eq(DS_ID), eq("s3a://datasets/brain_section"))
        .times(1)
        .returning(|_, _| Ok(()));

    // Local mode publishes no DELETED notification
    let mut queue = MockQueueClient::new();
    queue.expect_publish_status().never();

    let config = TestConfigBuilder::new()
        .configure_dispatch_params(DispatchParams { delivery_mode: DeliveryMode::Local, ..Default::default() })
        .configure_database(db)
        .configure_search_index(search_index)
        .configure_raw_data(raw_data)
        .configure_queue_client(queue)
        .build();

    let outcome = DirectDatasetManager::new(config).delete(dataset, ActionExtras::del_raw_data()).await;

    assert_eq!(outcome.unwrap(), DispatchOutcome::Executed(DatasetAction::Delete));
}

#[rstest]
#[tokio::test]
async fn delete_propagates_other_storage_failures(dataset: Dataset) {
    let mut db = MockDatabaseClient::new();
    db.expect_get_ion_image_storage_class()
        .times(1)
        .returning(|_| Err(DatabaseError::ConnectionError("connection reset".to_string())));
    db.expect_delete_dataset().never();

    let mut search_index = MockSearchIndexClient::new();
    search_index.expect_delete_dataset().never();

    let config = TestConfigBuilder::new().configure_database(db).configure_search_index(search_index).build();

    let result = DirectDatasetManager::new(config).delete(dataset, ActionExtras::default()).await;

    assert_matches!(result, Err(OrchestratorError::DatabaseError(DatabaseError::ConnectionError(_))));
}
