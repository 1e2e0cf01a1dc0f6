use crate::error::{DssError, DssResult};
use bytes::Bytes;
use log::debug;
use reqwest::Response;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Largest slice written to disk between two flushes
pub const EXPORT_CHUNK_SIZE: usize = 10_000;

/// Exclusive claim on a client's transport, released on drop
#[derive(Debug)]
pub struct TransportGuard {
    busy: Arc<AtomicBool>,
}

impl TransportGuard {
    pub(crate) fn acquire(busy: &Arc<AtomicBool>) -> DssResult<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DssError::TransportBusy)?;

        Ok(Self {
            busy: Arc::clone(busy),
        })
    }
}

impl Drop for TransportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Raw body of a project export.
///
/// The client that opened it refuses every other call until the stream is
/// drained, closed or dropped.
#[derive(Debug)]
pub struct ExportStream {
    response: Response,
    _guard: TransportGuard,
}

impl ExportStream {
    pub(crate) fn new(response: Response, guard: TransportGuard) -> Self {
        Self {
            response,
            _guard: guard,
        }
    }

    /// Length announced by the server, if any
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Next chunk of the body, `None` once the stream is exhausted
    pub async fn chunk(&mut self) -> DssResult<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }

    /// Drain the rest of the body into memory
    pub async fn bytes(self) -> DssResult<Bytes> {
        Ok(self.response.bytes().await?)
    }

    /// Copy the rest of the body into `writer`, flushing after every slice
    /// of at most [`EXPORT_CHUNK_SIZE`] bytes. Returns the number of bytes
    /// written.
    pub async fn write_to<W>(&mut self, writer: &mut W) -> DssResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.chunk().await? {
            for slice in chunk.chunks(EXPORT_CHUNK_SIZE) {
                writer.write_all(slice).await?;
                writer.flush().await?;
                written += slice.len() as u64;
            }
        }
        debug!("Export stream drained, {} bytes written", written);

        Ok(written)
    }

    /// Release the transport without reading the rest of the body
    pub fn close(self) {}
}
