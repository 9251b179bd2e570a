//! Cache Key Generation
//!
//! Derives stable cache keys from an operation name and its ordered arguments.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Builds the cache key for `operation` called with `args`.
///
/// `args` is serialized to JSON in the order given (pass a tuple for several
/// arguments) and hashed together with the operation name. The key keeps the
/// operation as a readable prefix: `"{operation}:{sha256 hex}"`.
pub fn cache_key<A>(operation: &str, args: &A) -> Result<String>
where
    A: Serialize + ?Sized,
{
    let encoded = serde_json::to_vec(args)?;

    let mut hasher = Sha256::new();
    hasher.update(operation.as_bytes());
    hasher.update([0u8]);
    hasher.update(&encoded);

    Ok(format!("{}:{}", operation, hex::encode(hasher.finalize())))
}
