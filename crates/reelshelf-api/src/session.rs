use tracing::{info, warn};

use reelshelf_types::api::Page;
use reelshelf_types::models::Video;
use reelshelf_types::session::Session;

use crate::auth::CredentialStore;
use crate::error::Result;
use crate::videos::VideoCatalog;

/// One user interaction: a button press or form submit.
#[derive(Debug, Clone)]
pub enum Action {
    Login { username: String, password: String },
    Signup { username: String, password: String },
    AddVideo { name: String, duration: String },
    DeleteVideo { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Inline message shown above the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// Outcome of handling an action: the next session plus what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub notice: Option<Notice>,
}

impl Transition {
    fn stay(session: Session) -> Self {
        Self { session, notice: None }
    }

    fn with(session: Session, notice: Notice) -> Self {
        Self { session, notice: Some(notice) }
    }
}

/// What to draw for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Library {
        user: String,
        page: Page,
        videos: Vec<Video>,
    },
}

/// Routes interactions to the credential store while anonymous and to the
/// video catalog once authenticated.
pub struct SessionController {
    credentials: CredentialStore,
    catalog: VideoCatalog,
}

impl SessionController {
    pub fn new(credentials: CredentialStore, catalog: VideoCatalog) -> Self {
        Self { credentials, catalog }
    }

    pub fn handle(&self, session: Session, action: Action) -> Result<Transition> {
        match (session, action) {
            (Session::Anonymous, Action::Login { username, password }) => {
                if self.credentials.verify_user(&username, &password)? {
                    info!("'{}' logged in", username);
                    Ok(Transition::stay(Session::authenticated(username)))
                } else {
                    warn!("Failed login for '{}'", username);
                    Ok(Transition::with(
                        Session::Anonymous,
                        Notice::error("Invalid credentials"),
                    ))
                }
            }

            (Session::Anonymous, Action::Signup { username, password }) => {
                match self.credentials.create_user(&username, &password) {
                    Ok(()) => Ok(Transition::with(
                        Session::Anonymous,
                        Notice::success("Account created! Please login"),
                    )),
                    Err(e) if e.is_user_facing() => {
                        Ok(Transition::with(Session::Anonymous, Notice::error(e.to_string())))
                    }
                    Err(e) => Err(e),
                }
            }

            (Session::Anonymous, Action::AddVideo { .. } | Action::DeleteVideo { .. }) => {
                Ok(Transition::with(
                    Session::Anonymous,
                    Notice::error("Please log in first"),
                ))
            }

            // No re-login or signup from inside an authenticated session.
            (session @ Session::Authenticated { .. }, Action::Login { .. } | Action::Signup { .. }) => {
                Ok(Transition::stay(session))
            }

            (session @ Session::Authenticated { .. }, Action::AddVideo { name, duration }) => {
                self.catalog.add_video(&name, &duration)?;
                Ok(Transition::with(session, Notice::success("Video added successfully!")))
            }

            (session @ Session::Authenticated { .. }, Action::DeleteVideo { id }) => {
                let notice = if self.catalog.delete_video(id)? {
                    Notice::success("Video deleted")
                } else {
                    Notice::info("That video was already gone")
                };
                Ok(Transition::with(session, notice))
            }
        }
    }

    /// The list is re-read on every call so a render after a mutation shows
    /// the new state.
    pub fn screen(&self, session: &Session, page: Page) -> Result<Screen> {
        match session {
            Session::Anonymous => Ok(Screen::Login),
            Session::Authenticated { user } => {
                let videos = match page {
                    Page::ViewVideos | Page::DeleteVideos => self.catalog.list_videos()?,
                    Page::AddVideo => Vec::new(),
                };
                Ok(Screen::Library {
                    user: user.clone(),
                    page,
                    videos,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reelshelf_db::Database;

    use super::*;
    use crate::auth::cheap_hasher;

    fn controller() -> SessionController {
        let db = Arc::new(Database::open_in_memory().unwrap());
        SessionController::new(
            CredentialStore::with_hasher(db.clone(), cheap_hasher()),
            VideoCatalog::new(db),
        )
    }

    fn login(username: &str, password: &str) -> Action {
        Action::Login { username: username.into(), password: password.into() }
    }

    fn signup(username: &str, password: &str) -> Action {
        Action::Signup { username: username.into(), password: password.into() }
    }

    fn add(name: &str, duration: &str) -> Action {
        Action::AddVideo { name: name.into(), duration: duration.into() }
    }

    #[test]
    fn signup_does_not_log_in() {
        let c = controller();
        let t = c.handle(Session::Anonymous, signup("alice", "pw123")).unwrap();
        assert_eq!(t.session, Session::Anonymous);
        assert_eq!(t.notice, Some(Notice::success("Account created! Please login")));
    }

    #[test]
    fn login_success_and_failure() {
        let c = controller();
        c.handle(Session::Anonymous, signup("alice", "pw123")).unwrap();

        let bad = c.handle(Session::Anonymous, login("alice", "nope")).unwrap();
        assert_eq!(bad.session, Session::Anonymous);
        assert_eq!(bad.notice, Some(Notice::error("Invalid credentials")));

        let good = c.handle(Session::Anonymous, login("alice", "pw123")).unwrap();
        assert_eq!(good.session, Session::authenticated("alice"));
        assert_eq!(good.notice, None);
    }

    #[test]
    fn duplicate_signup_is_a_notice() {
        let c = controller();
        c.handle(Session::Anonymous, signup("alice", "pw123")).unwrap();

        let t = c.handle(Session::Anonymous, signup("alice", "other")).unwrap();
        assert_eq!(t.session, Session::Anonymous);
        let notice = t.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("already taken"));
    }

    #[test]
    fn anonymous_cannot_touch_catalog() {
        let c = controller();
        let t = c.handle(Session::Anonymous, add("Intro", "0:45")).unwrap();
        assert_eq!(t.session, Session::Anonymous);
        assert_eq!(t.notice.unwrap().kind, NoticeKind::Error);

        let alice = Session::authenticated("alice");
        match c.screen(&alice, Page::ViewVideos).unwrap() {
            Screen::Library { videos, .. } => assert!(videos.is_empty()),
            Screen::Login => panic!("expected library"),
        }
    }

    #[test]
    fn anonymous_delete_leaves_store_alone() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let c = SessionController::new(
            CredentialStore::with_hasher(db.clone(), cheap_hasher()),
            VideoCatalog::new(db.clone()),
        );
        let seeded = db.insert_video("Keep", "1:00").unwrap();

        let t = c.handle(Session::Anonymous, Action::DeleteVideo { id: seeded.id }).unwrap();
        assert_eq!(t.session, Session::Anonymous);
        assert_eq!(t.notice, Some(Notice::error("Please log in first")));

        let ids: Vec<i64> = db.list_videos().unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![seeded.id]);
    }

    #[test]
    fn authenticated_ignores_login_and_signup() {
        let c = controller();
        let alice = Session::authenticated("alice");
        let t = c.handle(alice.clone(), login("bob", "pw")).unwrap();
        assert_eq!(t, Transition::stay(alice.clone()));
        let t = c.handle(alice.clone(), signup("bob", "pw")).unwrap();
        assert_eq!(t, Transition::stay(alice));
    }

    #[test]
    fn screen_follows_session() {
        let c = controller();
        assert_eq!(c.screen(&Session::Anonymous, Page::AddVideo).unwrap(), Screen::Login);

        let screen = c.screen(&Session::authenticated("alice"), Page::AddVideo).unwrap();
        assert_eq!(
            screen,
            Screen::Library { user: "alice".into(), page: Page::AddVideo, videos: vec![] }
        );
    }

    #[test]
    fn end_to_end_scenario() {
        let c = controller();
        c.handle(Session::Anonymous, signup("alice", "pw123")).unwrap();

        let t = c.handle(Session::Anonymous, login("alice", "wrong")).unwrap();
        assert!(!t.session.is_logged_in());

        let session = c.handle(Session::Anonymous, login("alice", "pw123")).unwrap().session;
        assert_eq!(session.user(), Some("alice"));

        let t = c.handle(session, add("Intro", "0:45")).unwrap();
        assert_eq!(t.notice, Some(Notice::success("Video added successfully!")));
        let session = t.session;

        let Screen::Library { videos, .. } = c.screen(&session, Page::ViewVideos).unwrap() else {
            panic!("expected library");
        };
        assert_eq!(videos[0].name, "Intro");
        let id = videos[0].id;

        let t = c.handle(session, Action::DeleteVideo { id }).unwrap();
        assert_eq!(t.notice, Some(Notice::success("Video deleted")));

        let Screen::Library { videos, .. } = c.screen(&t.session, Page::DeleteVideos).unwrap() else {
            panic!("expected library");
        };
        assert!(videos.iter().all(|v| v.id != id));

        let t = c.handle(t.session, Action::DeleteVideo { id }).unwrap();
        assert_eq!(t.notice.unwrap().kind, NoticeKind::Info);
    }
}
