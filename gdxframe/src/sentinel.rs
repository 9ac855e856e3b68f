//! Process-wide special value table
//!
//! The codec is asked for its sentinel codes whenever a session starts. The
//! first table that loads successfully is kept for the whole process so a
//! later failure can fall back to it instead of aborting. Once set, the
//! snapshot is read-only until [`SentinelTable::clear_cache`].

use std::sync::RwLock;

use gdxframe_core::{GdxCodec, SpecialValues};
use tracing::{debug, warn};

use crate::error::{Error, Result};

static SNAPSHOT: RwLock<Option<SpecialValues>> = RwLock::new(None);

/// Loader for the special value table
pub struct SentinelTable;

impl SentinelTable {
    /// Read the codec's sentinel codes
    ///
    /// On failure the cached snapshot is returned with a warning. Fails only
    /// when no table was ever loaded in this process.
    pub fn load<C: GdxCodec>(codec: &C) -> Result<SpecialValues> {
        let loaded = codec
            .special_values()
            .ok_or_else(|| codec.last_error_text())
            .and_then(|codes| SpecialValues::from_codes(codes).map_err(|e| e.to_string()));

        match loaded {
            Ok(table) => {
                let mut slot = SNAPSHOT.write().unwrap_or_else(|e| e.into_inner());
                if slot.is_none() {
                    *slot = Some(table);
                    debug!(codes = ?table.codes(), "special value snapshot cached");
                }
                Ok(table)
            }
            Err(reason) => match Self::cached() {
                Some(table) => {
                    warn!(%reason, "special values unavailable, using cached snapshot");
                    Ok(table)
                }
                None => Err(Error::Sentinel(reason)),
            },
        }
    }

    /// First table that loaded successfully
    pub fn cached() -> Option<SpecialValues> {
        *SNAPSHOT.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Forget the cached table
    pub fn clear_cache() {
        let mut slot = SNAPSHOT.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;
    use gdxframe_core::constants::sentinel;

    #[test]
    fn test_load_populates_cache() {
        let codec = JsonCodec::new();
        let table = SentinelTable::load(&codec).unwrap();
        assert_eq!(table.codes(), sentinel::DEFAULT_TABLE);
        assert!(SentinelTable::cached().is_some());
    }

    #[test]
    fn test_bad_table_falls_back_after_success() {
        SentinelTable::load(&JsonCodec::new()).unwrap();

        let broken = JsonCodec::new().with_special_values([0.0; 5]);
        let table = SentinelTable::load(&broken).unwrap();
        assert!(SentinelTable::cached().is_some());
        assert_eq!(table.codes().len(), 5);
    }
}
