//! Lazy, pull-based sequence of partial completions

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Error;
use crate::request::ChatCompletion;

/// Channel capacity between producer task and consumer.
/// Small on purpose: once full the producer suspends,
/// so the consumer's pull pace throttles the transport.
const CHUNK_BUFFER: usize = 16;

/// One partial completion, or the failure that ended
/// the stream
pub type ChunkResult = Result<ChatCompletion, Error>;

/// A lazy, forward-only, finite sequence of partial
/// completions.
///
/// Backed by a producer task feeding a bounded channel.
/// `next` yields chunks in provider emission order and
/// `None` once the provider signals completion. A
/// mid-stream failure arrives as an `Err` item at the
/// point it occurred; chunks already yielded stay valid.
///
/// Dropping the stream aborts the producer task, which
/// drops its half-open HTTP response and releases the
/// transport resource.
pub struct CompletionStream
{   rx: mpsc::Receiver<ChunkResult>
  , task: JoinHandle<()>
}

impl CompletionStream
{   /// Wire a stream to an already-spawned producer task
    pub fn new(
      rx: mpsc::Receiver<ChunkResult>
    , task: JoinHandle<()>
    ) -> Self
    {   CompletionStream
        {   rx
          , task
        }
    }

    /// Spawn a producer future and return the stream
    /// fed by it. The producer gets the sending half of
    /// a bounded channel; its sends suspend while the
    /// consumer is not pulling.
    pub fn spawn<F, Fut>(producer: F) -> Self
    where
      F: FnOnce(mpsc::Sender<ChunkResult>) -> Fut
    , Fut: std::future::Future<Output = ()> + Send + 'static
    {   let (tx, rx) = mpsc::channel(CHUNK_BUFFER);
        let task = tokio::spawn(producer(tx));
        CompletionStream::new(rx, task)
    }

    /// Pull the next partial completion.
    /// `None` means the provider finished.
    pub async fn next(&mut self) -> Option<ChunkResult>
    {   self.rx.recv().await
    }

    /// Drain the stream to exhaustion, concatenating
    /// the first choice of every chunk
    pub async fn collect_text(mut self)
      -> Result<String, Error>
    {   let mut text = String::new();
        while let Some(chunk) = self.next().await
        {   text.push_str(chunk?.first());
        }
        Ok(text)
    }
}

impl Stream for CompletionStream
{   type Item = ChunkResult;

    fn poll_next(
      mut self: Pin<&mut Self>
    , cx: &mut Context<'_>
    ) -> Poll<Option<Self::Item>>
    {   self.rx.poll_recv(cx)
    }
}

impl Drop for CompletionStream
{   fn drop(&mut self)
    {   if !self.task.is_finished()
        {   debug!("Stream abandoned, aborting producer");
            self.task.abort();
        }
    }
}
