//! Loader trait for loading data to destinations

use async_trait::async_trait;
use eyre::Result;

/// Loader trait for loading data to a destination
///
/// Implementors define how to load items to destinations:
/// - File systems
/// - Databases
///
/// Loads are full overwrites of the destination, not appends; running the
/// same load twice leaves only the second dataset.
///
/// # Example
/// ```no_run
/// use bankcap::etl::Loader;
/// use async_trait::async_trait;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     path: PathBuf,
/// }
///
/// #[async_trait]
/// impl Loader for FileLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         let count = items.len();
///         std::fs::write(&self.path, items.join("\n"))?;
///         Ok(count)
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination, preserving item order
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, connection, validation, etc.)
    async fn load(&self, items: Vec<Self::Item>) -> Result<usize>;
}
