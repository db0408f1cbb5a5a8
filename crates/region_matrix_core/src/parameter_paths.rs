//! Paths into the public global-infrastructure parameter hierarchy.

pub const GLOBAL_INFRASTRUCTURE_ROOT: &str = "/aws/service/global-infrastructure";

pub fn regions_path() -> String {
    format!("{GLOBAL_INFRASTRUCTURE_ROOT}/regions")
}

pub fn region_attributes_path(region: &str) -> String {
    format!("{}/{}", regions_path(), region.trim_matches('/'))
}

pub fn services_path() -> String {
    format!("{GLOBAL_INFRASTRUCTURE_ROOT}/services")
}

pub fn service_attributes_path(service: &str) -> String {
    format!("{}/{}", services_path(), service.trim_matches('/'))
}

pub fn service_regions_path(service: &str) -> String {
    format!("{}/regions", service_attributes_path(service))
}
