use region_matrix_core::contract::{AggregationResult, RegionsDocument, ServicesDocument};
use region_matrix_core::storage_keys::{regions_object_key, services_object_key, JSON_CONTENT_TYPE};
use serde::Serialize;
use tracing::info;

use crate::adapters::object_store::ObjectStore;
use crate::error::RegionMatrixError;

/// Writes `data/regions.json` and `data/services.json` concurrently. Returns
/// the keys written. Nothing is written when `bucket` is unset.
pub async fn upload_result<O>(
    store: &O,
    bucket: Option<&str>,
    result: &AggregationResult,
) -> Result<Vec<String>, RegionMatrixError>
where
    O: ObjectStore + ?Sized,
{
    let bucket = bucket
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RegionMatrixError::MissingBucket)?;

    let regions_key = regions_object_key();
    let services_key = services_object_key();
    let regions_body = pretty_json(
        "regions document",
        &RegionsDocument {
            regions: &result.regions,
        },
    )?;
    let services_body = pretty_json(
        "services document",
        &ServicesDocument {
            services: &result.services,
        },
    )?;

    tokio::try_join!(
        write_document(store, bucket, &regions_key, regions_body),
        write_document(store, bucket, &services_key, services_body),
    )?;

    info!(
        bucket,
        regions = result.regions.len(),
        services = result.services.len(),
        "uploaded aggregation result"
    );
    Ok(vec![regions_key, services_key])
}

fn pretty_json(
    document: &'static str,
    value: &impl Serialize,
) -> Result<Vec<u8>, RegionMatrixError> {
    serde_json::to_vec_pretty(value)
        .map_err(|source| RegionMatrixError::Serialization { document, source })
}

async fn write_document<O>(
    store: &O,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
) -> Result<(), RegionMatrixError>
where
    O: ObjectStore + ?Sized,
{
    let bytes = body.len();
    store
        .put_object(bucket, key, body, JSON_CONTENT_TYPE)
        .await
        .map_err(|source| RegionMatrixError::Upload {
            key: key.to_string(),
            source,
        })?;
    info!(bucket, key, bytes, "wrote document");
    Ok(())
}
