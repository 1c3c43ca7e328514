use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use crate::{
    chat::NowPlayingPoller,
    error::Result,
    management::Recommender,
    mood,
    types::{ConversationMessage, CurrentTrack, Mood, PlaylistRecord},
};

pub const GREETING: &str = "Hello! I'm your music mood assistant. How are you feeling today?";
pub const APOLOGY: &str = "Let's try that again - how are you feeling right now?";

/// What a chat turn ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Recommended { mood: Mood, count: usize },
    NoResults { mood: Mood },
    Failed,
    /// The credential is gone. The owner of the session has to send the user
    /// back to sign-in; the transcript already carries the apology.
    ReauthRequired,
}

/// One user's conversation: transcript, current mood, latest
/// recommendations and the busy flag shown while a search is in flight.
pub struct ChatSession {
    recommender: Recommender,
    transcript: Vec<ConversationMessage>,
    current_mood: Option<Mood>,
    recommendations: Vec<PlaylistRecord>,
    busy: watch::Sender<bool>,
    poller: Option<NowPlayingPoller>,
}

impl ChatSession {
    pub fn new(recommender: Recommender) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            recommender,
            transcript: vec![ConversationMessage::from_bot(GREETING, None)],
            current_mood: None,
            recommendations: Vec::new(),
            busy,
            poller: None,
        }
    }

    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }

    pub fn last_message(&self) -> Option<&ConversationMessage> {
        self.transcript.last()
    }

    pub fn current_mood(&self) -> Option<Mood> {
        self.current_mood
    }

    pub fn recommendations(&self) -> &[PlaylistRecord] {
        &self.recommendations
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Free text entry point: detect the mood, then recommend for it.
    pub async fn send_message(&mut self, text: &str) -> TurnOutcome {
        self.transcript.push(ConversationMessage::from_user(text));

        let mood = mood::classify(text);
        let result = self.fetch(mood).await;

        self.finish_turn(mood, result, |m| {
            format!("Sounds like you're feeling {m}! Here are some playlists to match.")
        })
    }

    /// Explicit mood pick: skip detection and recommend directly.
    pub async fn select_mood(&mut self, mood: Mood) -> TurnOutcome {
        self.current_mood = Some(mood);
        self.transcript
            .push(ConversationMessage::from_user(format!("I'm feeling {mood} today.")));

        let result = self.fetch(mood).await;

        self.finish_turn(mood, result, |m| {
            format!("Great! Here are some {m} playlists I think you'll enjoy.")
        })
    }

    /// Resets the transcript to the greeting.
    pub fn clear(&mut self) {
        self.transcript = vec![ConversationMessage::from_bot(GREETING, None)];
    }

    /// Starts the now-playing poll for the lifetime of this session. A poller
    /// that is already running is kept.
    pub fn start_now_playing(&mut self, period: Duration) {
        if self.poller.as_ref().is_some_and(|p| p.is_running()) {
            return;
        }

        self.poller = Some(NowPlayingPoller::start(
            self.recommender.tokens().clone(),
            self.recommender.api().clone(),
            period,
        ));
    }

    pub fn now_playing(&self) -> Option<CurrentTrack> {
        self.poller.as_ref().and_then(|p| p.current())
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    /// Ends background work owned by the session.
    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    async fn fetch(&self, mood: Mood) -> Result<Vec<PlaylistRecord>> {
        let _busy = BusyGuard::raise(&self.busy);
        self.recommender.fetch_playlists(mood).await
    }

    fn finish_turn(
        &mut self,
        mood: Mood,
        result: Result<Vec<PlaylistRecord>>,
        reply: impl FnOnce(Mood) -> String,
    ) -> TurnOutcome {
        match result {
            Ok(playlists) if playlists.is_empty() => {
                self.current_mood = Some(mood);
                self.recommendations.clear();
                self.transcript.push(ConversationMessage::from_bot(
                    format!("Sorry, we couldn't find any playlists for {mood}. Try another one!"),
                    Some(mood),
                ));
                TurnOutcome::NoResults { mood }
            }
            Ok(playlists) => {
                let count = playlists.len();
                self.current_mood = Some(mood);
                self.recommendations = playlists;
                self.transcript
                    .push(ConversationMessage::from_bot(reply(mood), Some(mood)));
                TurnOutcome::Recommended { mood, count }
            }
            Err(e) => {
                warn!(%mood, error = %e, "recommendation failed");
                self.transcript
                    .push(ConversationMessage::from_bot(APOLOGY, None));
                if e.requires_reauth() {
                    TurnOutcome::ReauthRequired
                } else {
                    TurnOutcome::Failed
                }
            }
        }
    }
}

/// Holds the busy flag up until dropped, whatever way the fetch ends.
struct BusyGuard<'a>(&'a watch::Sender<bool>);

impl<'a> BusyGuard<'a> {
    fn raise(busy: &'a watch::Sender<bool>) -> Self {
        busy.send_replace(true);
        Self(busy)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
