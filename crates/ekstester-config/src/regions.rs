//! Known AWS regions
//!
//! Each region maps to the IATA code of a nearby airport, used as a short
//! region tag in generated resource names.

/// Region to airport code table
pub const REGION_TO_AIRPORT: &[(&str, &str)] = &[
    ("ap-east-1", "hkg"),
    ("ap-northeast-1", "nrt"),
    ("ap-northeast-2", "icn"),
    ("ap-south-1", "bom"),
    ("ap-southeast-1", "sin"),
    ("ap-southeast-2", "syd"),
    ("ca-central-1", "yul"),
    ("cn-north-1", "pek"),
    ("cn-northwest-1", "zhy"),
    ("eu-central-1", "fra"),
    ("eu-north-1", "arn"),
    ("eu-west-1", "dub"),
    ("eu-west-2", "lhr"),
    ("eu-west-3", "cdg"),
    ("me-south-1", "bah"),
    ("sa-east-1", "gru"),
    ("us-east-1", "iad"),
    ("us-east-2", "cmh"),
    ("us-gov-east-1", "osu"),
    ("us-gov-west-1", "pdt"),
    ("us-west-1", "sfo"),
    ("us-west-2", "pdx"),
];

/// Airport code for a region, or `None` if the region is unknown
pub fn airport(region: &str) -> Option<&'static str> {
    REGION_TO_AIRPORT
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, code)| *code)
}

/// Returns true if `region` is a known AWS region
pub fn is_known(region: &str) -> bool {
    airport(region).is_some()
}
