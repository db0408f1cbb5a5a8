use std::collections::BTreeSet;

use crate::contract::{Attributes, ParameterEntry, Region, RegionSupport, Service};

/// Names carried in the values of a listing, in listing order. Region and
/// service listings store the resource name as the parameter value.
pub fn listed_names(entries: &[ParameterEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.value.clone()).collect()
}

/// Flattens an attribute listing into `leaf name -> value`. A later entry with
/// the same leaf name replaces an earlier one.
pub fn flatten_attributes(entries: &[ParameterEntry]) -> Attributes {
    entries
        .iter()
        .map(|entry| (entry.leaf_name().to_string(), entry.value.clone()))
        .collect()
}

pub fn build_region(name: impl Into<String>, attribute_entries: &[ParameterEntry]) -> Region {
    let mut attributes = flatten_attributes(attribute_entries);
    attributes.remove("name");
    Region {
        name: name.into(),
        attributes,
    }
}

/// One boolean per known region, keyed alphabetically. Supported names that
/// are not known regions are ignored.
pub fn region_support<'a>(
    known_regions: impl IntoIterator<Item = &'a str>,
    supported: &BTreeSet<String>,
) -> RegionSupport {
    known_regions
        .into_iter()
        .map(|region| (region.to_string(), supported.contains(region)))
        .collect()
}

pub fn build_service(
    name: impl Into<String>,
    attribute_entries: &[ParameterEntry],
    region_entries: &[ParameterEntry],
    known_regions: &[Region],
) -> Service {
    let supported: BTreeSet<String> = listed_names(region_entries).into_iter().collect();
    let regions = region_support(
        known_regions.iter().map(|region| region.name.as_str()),
        &supported,
    );

    let mut attributes = flatten_attributes(attribute_entries);
    attributes.retain(|key, _| key != "service" && !regions.contains_key(key));

    Service {
        service: name.into(),
        attributes,
        regions,
    }
}

pub fn sort_services(services: &mut [Service]) {
    services.sort_by(|left, right| left.service.cmp(&right.service));
}
