#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use moodtunes::{
    management::{
        CredentialStore, MemoryCredentialStore, Recommender, TokenManager,
        store::{KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP},
    },
    spotify::SpotifyApi,
    utils,
};
use serde_json::{Value, json};

/// Canned answer of one fake endpoint.
pub struct Canned {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Canned {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }
}

pub struct FakeState {
    pub search: Mutex<Canned>,
    pub refresh: Mutex<Canned>,
    pub playing: Mutex<Canned>,
    pub token: Mutex<Canned>,
    pub search_hits: AtomicUsize,
    pub refresh_hits: AtomicUsize,
    pub playing_hits: AtomicUsize,
    pub token_hits: AtomicUsize,
    pub last_search_query: Mutex<HashMap<String, String>>,
    pub last_refresh_query: Mutex<HashMap<String, String>>,
    pub last_token_form: Mutex<HashMap<String, String>>,
    pub last_authorization: Mutex<Option<String>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            search: Mutex::new(Canned::ok(json!({ "playlists": { "items": [] } }))),
            refresh: Mutex::new(Canned::ok(json!({ "access_token": "refreshed-token" }))),
            playing: Mutex::new(Canned {
                status: StatusCode::NO_CONTENT,
                body: None,
            }),
            token: Mutex::new(Canned::ok(json!({
                "access_token": "upstream-token",
                "token_type": "Bearer",
                "expires_in": 3600
            }))),
            search_hits: AtomicUsize::new(0),
            refresh_hits: AtomicUsize::new(0),
            playing_hits: AtomicUsize::new(0),
            token_hits: AtomicUsize::new(0),
            last_search_query: Mutex::new(HashMap::new()),
            last_refresh_query: Mutex::new(HashMap::new()),
            last_token_form: Mutex::new(HashMap::new()),
            last_authorization: Mutex::new(None),
        }
    }
}

fn answer(canned: &Mutex<Canned>) -> Response {
    let canned = canned.lock().unwrap();
    match &canned.body {
        Some(body) => (canned.status, Json(body.clone())).into_response(),
        None => canned.status.into_response(),
    }
}

fn remember_authorization(state: &FakeState, headers: &HeaderMap) {
    *state.last_authorization.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
}

async fn search(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.search_hits.fetch_add(1, Ordering::SeqCst);
    remember_authorization(&state, &headers);
    *state.last_search_query.lock().unwrap() = query;
    answer(&state.search)
}

async fn refresh(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.refresh_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_refresh_query.lock().unwrap() = query;
    answer(&state.refresh)
}

async fn playing(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    state.playing_hits.fetch_add(1, Ordering::SeqCst);
    remember_authorization(&state, &headers);
    answer(&state.playing)
}

async fn token(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_hits.fetch_add(1, Ordering::SeqCst);
    remember_authorization(&state, &headers);
    *state.last_token_form.lock().unwrap() = form;
    answer(&state.token)
}

/// In-process stand-in for the Spotify Web API, the accounts service and the
/// refresh relay, listening on an ephemeral local port.
pub struct FakeSpotify {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/v1/search", get(search))
            .route("/v1/me/player/currently-playing", get(playing))
            .route("/refresh_token", get(refresh))
            .route("/api/token", post(token))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn api(&self) -> SpotifyApi {
        SpotifyApi::new(
            format!("{}/v1", self.base_url),
            format!("{}/refresh_token", self.base_url),
        )
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.base_url)
    }

    pub fn set_search(&self, status: StatusCode, body: Value) {
        *self.state.search.lock().unwrap() = Canned {
            status,
            body: Some(body),
        };
    }

    pub fn set_search_playlists(&self, items: Vec<Value>) {
        self.set_search(StatusCode::OK, json!({ "playlists": { "items": items } }));
    }

    pub fn set_refresh(&self, status: StatusCode, body: Value) {
        *self.state.refresh.lock().unwrap() = Canned {
            status,
            body: Some(body),
        };
    }

    pub fn set_playing(&self, status: StatusCode, body: Option<Value>) {
        *self.state.playing.lock().unwrap() = Canned { status, body };
    }

    pub fn set_token(&self, status: StatusCode, body: Value) {
        *self.state.token.lock().unwrap() = Canned {
            status,
            body: Some(body),
        };
    }

    pub fn search_hits(&self) -> usize {
        self.state.search_hits.load(Ordering::SeqCst)
    }

    pub fn refresh_hits(&self) -> usize {
        self.state.refresh_hits.load(Ordering::SeqCst)
    }

    pub fn playing_hits(&self) -> usize {
        self.state.playing_hits.load(Ordering::SeqCst)
    }

    pub fn token_hits(&self) -> usize {
        self.state.token_hits.load(Ordering::SeqCst)
    }

    pub fn last_search_query(&self) -> HashMap<String, String> {
        self.state.last_search_query.lock().unwrap().clone()
    }

    pub fn last_refresh_query(&self) -> HashMap<String, String> {
        self.state.last_refresh_query.lock().unwrap().clone()
    }

    pub fn last_token_form(&self) -> HashMap<String, String> {
        self.state.last_token_form.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

pub fn playlist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "images": [{ "url": format!("https://i.scdn.co/image/{}", id) }],
        "external_urls": { "spotify": format!("https://open.spotify.com/playlist/{}", id) },
        "tracks": { "total": 25 },
        "owner": { "display_name": "Spotify" }
    })
}

pub async fn store_with_credential(
    access_token: &str,
    refresh_token: &str,
    issued_at_millis: i64,
) -> Arc<MemoryCredentialStore> {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set(KEY_ACCESS_TOKEN, access_token).await.unwrap();
    store.set(KEY_REFRESH_TOKEN, refresh_token).await.unwrap();
    store
        .set(KEY_TOKEN_TIMESTAMP, &issued_at_millis.to_string())
        .await
        .unwrap();
    store
}

/// Store holding a credential issued right now.
pub async fn signed_in_store() -> Arc<MemoryCredentialStore> {
    store_with_credential("valid-token", "refresh-1", utils::now_millis()).await
}

pub async fn stored_keys(store: &MemoryCredentialStore) -> Vec<Option<String>> {
    let mut values = Vec::new();
    for key in [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP] {
        values.push(store.get(key).await.unwrap());
    }
    values
}

pub fn recommender(fake: &FakeSpotify, store: Arc<MemoryCredentialStore>) -> Recommender {
    let api = fake.api();
    let tokens = TokenManager::new(store, api.clone());
    Recommender::new(api, tokens)
}
