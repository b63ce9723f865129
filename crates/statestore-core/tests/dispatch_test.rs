mod common;

use common::{CallLog, RecordingStore, executor, record, registry};
use statestore_core::{CloudProvider, StateStoreCredentials, StateStoreDetails, StepOutcome};

/// Adapter calls a full provisioning run makes for each provider
fn expected_calls(provider: CloudProvider) -> Vec<&'static str> {
    match provider {
        CloudProvider::Aws => vec![
            "aws.create_bucket:k1-state-store",
            "aws.create_bucket:k1-artifacts",
        ],
        CloudProvider::Civo => vec![
            "civo.get_access_credentials:k1-state-store:nyc1",
            "civo.create_storage_bucket:CIVO-AK:k1-state-store:nyc1",
        ],
        CloudProvider::DigitalOcean => vec![
            "digitalocean.spaces_credentials",
            "digitalocean.create_space_bucket:nyc3.digitaloceanspaces.com:k1-state-store",
        ],
        CloudProvider::Vultr => vec![
            "vultr.create_object_storage:ewr:k1-state-store",
            "vultr.create_object_storage_bucket:ewr1.vultrobjects.com:k1-state-store",
        ],
    }
}

#[tokio::test]
async fn test_each_provider_calls_only_its_own_adapter() {
    for provider in CloudProvider::ALL {
        let store = RecordingStore::with(record(provider)).await;
        let log = CallLog::default();

        executor(store.clone(), registry(&log))
            .provision("demo")
            .await
            .unwrap();

        assert_eq!(log.entries(), expected_calls(provider), "{provider}");
        assert!(
            log.entries()
                .iter()
                .all(|call| call.starts_with(&format!("{provider}."))),
            "{provider}"
        );
    }
}

#[tokio::test]
async fn test_canonical_results_per_provider() {
    for provider in CloudProvider::ALL {
        let store = RecordingStore::with(record(provider)).await;
        let report = executor(store.clone(), registry(&CallLog::default()))
            .provision("demo")
            .await
            .unwrap();
        let r = store.record("demo").await;

        assert!(r.state_store_creds_check, "{provider}");
        assert!(report.credentials.is_completed(), "{provider}");

        let (credentials, details) = match provider {
            CloudProvider::Aws => (
                StateStoreCredentials {
                    access_key_id: "AWS-AK".into(),
                    secret_access_key: "AWS-SK".into(),
                    name: None,
                    id: None,
                },
                StateStoreDetails {
                    name: "k1-state-store".into(),
                    aws_state_store_bucket: Some("k1-state-store".into()),
                    aws_artifacts_bucket: Some("k1-artifacts".into()),
                    ..Default::default()
                },
            ),
            CloudProvider::Civo => (
                StateStoreCredentials {
                    access_key_id: "CIVO-AK".into(),
                    secret_access_key: "CIVO-SK".into(),
                    name: Some("k1-state-store".into()),
                    id: Some("cred-123".into()),
                },
                StateStoreDetails {
                    name: "k1-state-store".into(),
                    id: Some("bucket-456".into()),
                    ..Default::default()
                },
            ),
            CloudProvider::DigitalOcean => (
                StateStoreCredentials {
                    access_key_id: "DO-AK".into(),
                    secret_access_key: "DO-SK".into(),
                    name: Some("k1-state-store".into()),
                    id: None,
                },
                StateStoreDetails {
                    name: "k1-state-store".into(),
                    hostname: Some("nyc3.digitaloceanspaces.com".into()),
                    ..Default::default()
                },
            ),
            CloudProvider::Vultr => (
                StateStoreCredentials {
                    access_key_id: "VULTR-AK".into(),
                    secret_access_key: "VULTR-SK".into(),
                    name: Some("k1-state-store".into()),
                    id: Some("os-789".into()),
                },
                StateStoreDetails {
                    name: "k1-state-store".into(),
                    id: Some("os-789".into()),
                    hostname: Some("ewr1.vultrobjects.com".into()),
                    ..Default::default()
                },
            ),
        };

        assert_eq!(r.state_store_credentials, credentials, "{provider}");
        assert_eq!(r.state_store_details, details, "{provider}");

        if provider == CloudProvider::Civo {
            assert!(r.state_store_create_check);
            assert!(report.create.is_completed());
        } else {
            assert!(!r.state_store_create_check, "{provider}");
            assert_eq!(report.create, StepOutcome::NotApplicable);
        }
    }
}
