//! Static AWS region catalogue.

/// Every region a bucket is probed under. The list is fixed at build time;
/// ordering determines probe priority for the sequential tool channel.
pub const REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "me-south-1",
    "me-central-1",
    "sa-east-1",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-iso-east-1",
    "us-iso-west-1",
    "us-isob-east-1",
];

/// Display label for an optional region.
pub fn region_label(region: Option<&str>) -> &str {
    region.unwrap_or("No Region")
}

/// Iterate the "no region" slot first, then every named region.
pub fn all_region_slots() -> impl Iterator<Item = Option<&'static str>> {
    std::iter::once(None).chain(REGIONS.iter().copied().map(Some))
}
