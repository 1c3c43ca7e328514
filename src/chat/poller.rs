use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{management::TokenManager, spotify::SpotifyApi, types::CurrentTrack};

/// Background task refreshing the "now playing" status at a fixed interval.
///
/// The first poll happens right away. Failures are logged and never reach the
/// chat. The task ends on [`stop`](Self::stop) or when the poller is dropped.
pub struct NowPlayingPoller {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    current: watch::Receiver<Option<CurrentTrack>>,
}

impl NowPlayingPoller {
    pub fn start(tokens: TokenManager, api: SpotifyApi, period: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = poll_once(&tokens, &api, &tx) => {}
                }
            }
            debug!("now playing poller stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
            current: rx,
        }
    }

    /// Latest known track, `None` when nothing is playing or nothing was fetched yet.
    pub fn current(&self) -> Option<CurrentTrack> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentTrack>> {
        self.current.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancels the task and waits for it to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "now playing poller ended abnormally");
            }
        }
    }
}

impl Drop for NowPlayingPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_once(
    tokens: &TokenManager,
    api: &SpotifyApi,
    tx: &watch::Sender<Option<CurrentTrack>>,
) {
    let token = match tokens.current_access_token().await {
        Ok(Some(token)) => token,
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "cannot read access token for now playing poll");
            return;
        }
    };

    match api.currently_playing(&token).await {
        Ok(track) => {
            tx.send_replace(track);
        }
        Err(e) => warn!(error = %e, "failed to fetch currently playing track"),
    }
}
