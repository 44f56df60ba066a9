use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use reelshelf_types::session::Session;

use crate::routes::AppState;

pub const SESSION_COOKIE: &str = "reelshelf_session";

/// Identifies one interactive client context. Inserted into request
/// extensions by [`resolve_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// In-process map of client context -> session. Only authenticated sessions
/// are held; an id with no entry is anonymous. Nothing here survives a restart.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a known context, or hand out a fresh id for an anonymous one.
    /// Returns the id to use and whether it is new. Fresh ids are not recorded.
    pub async fn resume(&self, presented: Option<Uuid>) -> (SessionId, bool) {
        if let Some(id) = presented {
            if self.sessions.read().await.contains_key(&id) {
                return (SessionId(id), false);
            }
        }

        (SessionId(Uuid::new_v4()), true)
    }

    pub async fn load(&self, id: SessionId) -> Session {
        self.sessions
            .read()
            .await
            .get(&id.0)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn store(&self, id: SessionId, session: Session) {
        let mut sessions = self.sessions.write().await;
        match session {
            Session::Anonymous => {
                sessions.remove(&id.0);
            }
            session @ Session::Authenticated { .. } => {
                sessions.insert(id.0, session);
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Map the session cookie onto a registry entry, issuing a new cookie when
/// the client has none or presents one with no authenticated session behind it.
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok());

    let (id, fresh) = state.sessions.resume(presented).await;
    req.extensions_mut().insert(id);

    let response = next.run(req).await;

    if fresh {
        debug!("Opened session {} ({} known)", id.0, state.sessions.len().await);
        (jar.add(session_cookie(id)), response).into_response()
    } else {
        response
    }
}

fn session_cookie(id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.0.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
