/// The rendered Markdown output for one resolved identifier, prior to
/// aggregation.
///
/// Fragments are ephemeral: they exist only until the aggregator sorts and
/// joins them into the final document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Lowercased matched display name. The aggregator orders fragments by
    /// this key alone, so document order never depends on submission or
    /// completion order.
    pub sort_key: String,
    pub markdown: String,
}
