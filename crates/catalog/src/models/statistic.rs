use serde::Deserialize;

/// One named numeric metric attached to an extension record.
///
/// Observed names include `install`, `averagerating`, `ratingcount` and
/// `weightedRating`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub statistic_name: String,
    pub value: f64,
}
