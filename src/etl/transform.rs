//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming data items
///
/// Implementors define how to transform items:
/// - Data cleaning (text to numbers)
/// - Data enrichment (derived columns)
/// - Format conversion
/// - Validation
///
/// # Example
/// ```
/// use bankcap::etl::Transformer;
/// use eyre::Result;
///
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     type Input = i64;
///     type Output = i64;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input * 2)
///     }
/// }
///
/// let out = Doubler.transform_many(vec![1, 2, 3]).unwrap();
/// assert_eq!(out, vec![2, 4, 6]);
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items, preserving input order and cardinality
    ///
    /// Override this for optimized batch processing
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
