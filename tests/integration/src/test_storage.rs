//! S3 backend error mapping tests.

#[cfg(test)]
mod tests {
    use quarantine_core::{ObjectLocation, ObjectStore, S3ObjectStore, StorageError};

    use crate::{cleanup_bucket, create_test_bucket, put_test_object, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_map_missing_source_key_to_not_found() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nokey").await;
        let target = create_test_bucket(&client, "target").await;
        let store = S3ObjectStore::new(client.clone());

        let source = ObjectLocation::new(&bucket, "nonexistent.bin");
        let err = store
            .copy_object(&source.relocate(&target), &source)
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::NotFound { location: source });

        cleanup_bucket(&client, &bucket).await;
        cleanup_bucket(&client, &target).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_map_missing_destination_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "src").await;
        put_test_object(&client, &bucket, "file.bin", b"data").await;
        let store = S3ObjectStore::new(client.clone());

        let source = ObjectLocation::new(&bucket, "file.bin");
        let err = store
            .copy_object(&source.relocate(test_bucket_name("ghost")), &source)
            .await
            .unwrap_err();
        assert!(
            matches!(err, StorageError::NoSuchBucket { .. }),
            "unexpected error: {err:?}"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_object_size() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "size").await;
        put_test_object(&client, &bucket, "file.bin", b"0123456789").await;
        let store = S3ObjectStore::new(client.clone());

        let size = store
            .object_size(&ObjectLocation::new(&bucket, "file.bin"))
            .await
            .expect("object_size");
        assert_eq!(size, 10);

        let err = store
            .object_size(&ObjectLocation::new(&bucket, "missing.bin"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_missing_key_without_error() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "del").await;
        let store = S3ObjectStore::new(client.clone());

        store
            .delete_object(&ObjectLocation::new(&bucket, "never-existed.bin"))
            .await
            .expect("delete of missing key is idempotent");

        cleanup_bucket(&client, &bucket).await;
    }
}
