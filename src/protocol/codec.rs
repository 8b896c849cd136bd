//! Newline-delimited JSON framing
//!
//! Each frame is one JSON value terminated by `\n`. [`Wire`] accumulates
//! reads into a `BytesMut`, splits complete lines off the front and enforces
//! a maximum frame length so a misbehaving peer cannot grow the buffer
//! without bound.
//!
//! EOF between frames is a clean close and yields `None`; EOF in the middle
//! of a frame is [`Error::ConnectionClosed`].

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// Default maximum frame length (64 KiB)
pub const DEFAULT_MAX_FRAME: usize = 64 * 1024;

/// Framed JSON transport over any byte stream
#[derive(Debug)]
pub struct Wire<S> {
    stream: S,
    buffer: BytesMut,
    max_frame: usize,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Wire<S> {
    /// Wrap a stream with the default frame limit
    pub fn new(stream: S) -> Self {
        Self::with_max_frame(stream, DEFAULT_MAX_FRAME)
    }

    /// Wrap a stream with a custom frame limit
    pub fn with_max_frame(stream: S, max_frame: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4 * 1024),
            max_frame,
        }
    }

    /// Read the next frame, or `None` on clean EOF
    pub async fn read_frame<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let line = self.buffer.split_to(pos + 1);
                let value =
                    serde_json::from_slice(&line[..pos]).map_err(Error::MalformedFrame)?;
                return Ok(Some(value));
            }

            if self.buffer.len() > self.max_frame {
                return Err(Error::FrameTooLarge {
                    len: self.buffer.len(),
                    max: self.max_frame,
                });
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(Error::ConnectionClosed);
            }
        }
    }

    /// Write one frame and flush it
    pub async fn write_frame<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut payload = serde_json::to_vec(value).map_err(Error::MalformedFrame)?;
        if payload.len() >= self.max_frame {
            return Err(Error::FrameTooLarge {
                len: payload.len(),
                max: self.max_frame,
            });
        }

        payload.push(b'\n');
        self.stream.write_all(&payload).await?;
        self.stream.flush().await?;
        Ok(())
    }
}
