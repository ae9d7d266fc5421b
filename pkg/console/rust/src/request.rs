// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Backend requests tied to the lifetime of the page that issued them.
//!
//! A page creates one [`CancellationToken`] for itself and spawns each fetch
//! as a [`CancelableRequest`] under it. Cancelling the page token, cancelling
//! the request, or dropping the request handle all abort the in-flight
//! future; nothing keeps running after its page is gone.

use log::{debug, error};
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::errors::{Error, Result};

pub struct CancelableRequest<T> {
    token: CancellationToken,
    handle: Option<JoinHandle<Result<T>>>,
}

impl<T: Send + 'static> CancelableRequest<T> {
    /// Spawn `future` on the current runtime under a child of `parent`.
    pub fn spawn<F>(parent: &CancellationToken, future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let token = parent.child_token();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => Err(Error::Cancelled),
                result = future => result,
            }
        });
        CancelableRequest {
            token,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the request to finish. Yields [`Error::Cancelled`] if it was
    /// cancelled first.
    pub async fn wait(mut self) -> Result<T> {
        let Some(handle) = self.handle.take() else {
            return Err(Error::Cancelled);
        };
        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => {
                error!("request task failed: {e}");
                Err(Error::TaskFailed(e.to_string()))
            }
        }
    }
}

impl<T> Drop for CancelableRequest<T> {
    fn drop(&mut self) {
        if self.handle.is_some() && !self.token.is_cancelled() {
            debug!("dropping unfinished request, cancelling");
        }
        self.token.cancel();
    }
}
