//! Transport trait seam for the control link

use async_trait::async_trait;
use bravia_core::BraviaResult;
use tokio::io::{AsyncRead, AsyncWrite};

/// Full-duplex byte link to the display
///
/// Anything readable and writable can stand in for the serial line, which is
/// what lets the client run against an in-memory duplex pipe in tests.
pub trait ControlLink: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> ControlLink for T {}

/// Transport layer able to claim a control link
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the physical layer connection
    ///
    /// # Errors
    ///
    /// Returns a connection error if the underlying device cannot be claimed
    /// (missing, busy, or permission denied).
    async fn connect(&self) -> BraviaResult<Box<dyn ControlLink>>;
}
