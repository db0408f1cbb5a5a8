//! Builds the region list and the per-service region-support matrix.
//!
//! Region attributes are fetched with a bounded fan-out. Services are processed
//! one at a time with a fixed pause after each, since every service costs a
//! couple of listings against a rate-limited store. A service that fails is
//! logged and left out of the result; failures outside the service loop abort
//! the run.

use futures::{stream, StreamExt, TryStreamExt};
use region_matrix_core::contract::{AggregationResult, Region, Service};
use region_matrix_core::matrix::{build_region, build_service, listed_names, sort_services};
use region_matrix_core::parameter_paths::{
    region_attributes_path, regions_path, service_attributes_path, service_regions_path,
    services_path,
};
use tracing::{error, info};

use crate::adapters::parameter_store::ParameterStore;
use crate::config::AggregatorConfig;
use crate::error::StoreError;
use crate::pagination::fetch_all_by_path;

pub struct RegionServiceAggregator<'a, S: ?Sized> {
    store: &'a S,
    config: &'a AggregatorConfig,
}

impl<'a, S> RegionServiceAggregator<'a, S>
where
    S: ParameterStore + ?Sized,
{
    pub fn new(store: &'a S, config: &'a AggregatorConfig) -> Self {
        Self { store, config }
    }

    /// Runs a full aggregation. `requested_services` bypasses service
    /// discovery when provided.
    pub async fn aggregate(
        &self,
        requested_services: Option<&[String]>,
    ) -> Result<AggregationResult, StoreError> {
        let regions = self.fetch_regions().await?;
        info!(region_count = regions.len(), "fetched regions");

        let service_names = match requested_services {
            Some(names) => names.to_vec(),
            None => self.discover_services().await?,
        };
        info!(service_count = service_names.len(), "processing services");

        let services = self.build_services(&service_names, &regions).await;
        info!(
            service_count = services.len(),
            skipped = service_names.len() - services.len(),
            "aggregation complete"
        );

        Ok(AggregationResult { regions, services })
    }

    /// Regions in listing order, each with its flattened attributes.
    pub async fn fetch_regions(&self) -> Result<Vec<Region>, StoreError> {
        let policy = &self.config.retry;
        let store = self.store;
        let names = listed_names(&fetch_all_by_path(store, &regions_path(), policy).await?);

        stream::iter(names)
            .map(move |name| async move {
                let path = region_attributes_path(&name);
                let entries = fetch_all_by_path(store, &path, policy).await?;
                Ok::<_, StoreError>(build_region(name, &entries))
            })
            .buffered(self.config.region_fetch_concurrency.max(1))
            .try_collect()
            .await
    }

    pub async fn discover_services(&self) -> Result<Vec<String>, StoreError> {
        let entries = fetch_all_by_path(self.store, &services_path(), &self.config.retry).await?;
        Ok(listed_names(&entries))
    }

    /// Processes services sequentially and returns the successful ones sorted
    /// by name.
    pub async fn build_services(&self, names: &[String], regions: &[Region]) -> Vec<Service> {
        let mut services = Vec::with_capacity(names.len());

        for name in names {
            match self.build_service(name, regions).await {
                Ok(service) => {
                    let supported = service.supported_regions().count();
                    info!(service = %name, supported_regions = supported, "processed service");
                    services.push(service);
                }
                Err(failure) => {
                    error!(service = %name, error = %failure, "skipping service");
                }
            }
            tokio::time::sleep(self.config.service_delay).await;
        }

        sort_services(&mut services);
        services
    }

    pub async fn build_service(
        &self,
        name: &str,
        regions: &[Region],
    ) -> Result<Service, StoreError> {
        let policy = &self.config.retry;
        let attributes =
            fetch_all_by_path(self.store, &service_attributes_path(name), policy).await?;
        let supported = fetch_all_by_path(self.store, &service_regions_path(name), policy).await?;
        Ok(build_service(name, &attributes, &supported, regions))
    }
}
