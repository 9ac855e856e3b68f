//! Scoped ownership of an open container
//!
//! [`OpenContainer`] borrows the session's codec for as long as a container
//! is open and closes it when dropped, whatever path the caller leaves by.
//! Writers call [`OpenContainer::finish`] to see close failures, since that
//! is where the codec commits data.

use std::ops::{Deref, DerefMut};

use gdxframe_core::GdxCodec;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub(crate) struct OpenContainer<'a, C: GdxCodec> {
    codec: &'a mut C,
    path: String,
    open: bool,
}

impl<'a, C: GdxCodec> OpenContainer<'a, C> {
    /// Open `path` for reading
    pub(crate) fn read(codec: &'a mut C, path: &str) -> Result<Self> {
        if !codec.open_read(path) {
            let reason = codec.last_error_text();
            codec.close();
            return Err(Error::open(path, reason));
        }
        debug!(path, "container opened for reading");
        Ok(Self {
            codec,
            path: path.to_string(),
            open: true,
        })
    }

    /// Create `path` for writing
    pub(crate) fn write(codec: &'a mut C, path: &str, producer: &str) -> Result<Self> {
        if !codec.open_write(path, producer) {
            let reason = codec.last_error_text();
            codec.close();
            return Err(Error::open(path, reason));
        }
        debug!(path, producer, "container opened for writing");
        Ok(Self {
            codec,
            path: path.to_string(),
            open: true,
        })
    }

    /// Close now and report failure
    pub(crate) fn finish(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        if self.codec.close() {
            debug!(path = %self.path, "container closed");
            Ok(())
        } else {
            Err(Error::codec(format!(
                "closing {}: {}",
                self.path,
                self.codec.last_error_text()
            )))
        }
    }
}

impl<C: GdxCodec> Deref for OpenContainer<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.codec
    }
}

impl<C: GdxCodec> DerefMut for OpenContainer<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.codec
    }
}

impl<C: GdxCodec> Drop for OpenContainer<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "failed to close container");
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;

    #[test]
    fn test_open_failure_reports_codec_text() {
        let mut codec = JsonCodec::new();
        let err = OpenContainer::read(&mut codec, "/no/such/container.json")
            .err()
            .unwrap();
        match err {
            Error::Open { path, reason } => {
                assert_eq!(path, "/no/such/container.json");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_drop_releases_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let path = path.to_str().unwrap();
        let mut codec = JsonCodec::new();
        {
            let _container = OpenContainer::write(&mut codec, path, "test").unwrap();
        }
        assert!(!codec.is_open());
        {
            let container = OpenContainer::read(&mut codec, path).unwrap();
            container.finish().unwrap();
        }
        assert!(!codec.is_open());
    }
}
