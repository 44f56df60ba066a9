use std::sync::Arc;

use axum::{
    Extension, Form, Router,
    extract::{Path, Query, State},
    middleware,
    response::Html,
    routing::{get, post},
};

use reelshelf_types::api::{AddVideoForm, DeleteVideoForm, LoginForm, Page, PageQuery, SignupForm};
use reelshelf_types::session::Session;

use crate::error::Result;
use crate::middleware::{SessionId, SessionRegistry, resolve_session};
use crate::pages;
use crate::session::{Action, Notice, SessionController};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub controller: SessionController,
    pub sessions: SessionRegistry,
}

impl AppStateInner {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            sessions: SessionRegistry::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/videos", post(add_video))
        .route("/videos/{id}/delete", post(delete_video))
        .layer(middleware::from_fn_with_state(state.clone(), resolve_session))
        .with_state(state)
}

pub async fn index(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let session = state.sessions.load(id).await;
    render(state, session, query.page, None).await
}

pub async fn login(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>> {
    let action = Action::Login {
        username: form.username,
        password: form.password,
    };
    apply(state, id, action, Page::ViewVideos).await
}

pub async fn signup(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Form(form): Form<SignupForm>,
) -> Result<Html<String>> {
    let action = Action::Signup {
        username: form.new_username,
        password: form.new_password,
    };
    apply(state, id, action, Page::ViewVideos).await
}

pub async fn add_video(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Form(form): Form<AddVideoForm>,
) -> Result<Html<String>> {
    let action = Action::AddVideo {
        name: form.name,
        duration: form.duration,
    };
    apply(state, id, action, Page::ViewVideos).await
}

pub async fn delete_video(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Path(video_id): Path<i64>,
    Form(form): Form<DeleteVideoForm>,
) -> Result<Html<String>> {
    apply(state, id, Action::DeleteVideo { id: video_id }, form.page).await
}

/// Run one action against the caller's session, remember the resulting
/// session, then draw the screen it leads to.
async fn apply(state: AppState, id: SessionId, action: Action, page: Page) -> Result<Html<String>> {
    let session = state.sessions.load(id).await;

    // Store access is blocking; keep it off the async runtime
    let worker = state.clone();
    let transition =
        tokio::task::spawn_blocking(move || worker.controller.handle(session, action)).await??;

    state.sessions.store(id, transition.session.clone()).await;
    render(state, transition.session, page, transition.notice).await
}

async fn render(
    state: AppState,
    session: Session,
    page: Page,
    notice: Option<Notice>,
) -> Result<Html<String>> {
    let screen =
        tokio::task::spawn_blocking(move || state.controller.screen(&session, page)).await??;
    Ok(Html(pages::render(&screen, notice.as_ref())))
}
