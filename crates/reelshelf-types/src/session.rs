/// Per-client authentication state.
///
/// Owned by the session controller and threaded through every handler call.
/// A fresh client context always starts out `Anonymous`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    /// `user` was an existing username when the session was authenticated.
    /// It is not re-validated afterwards.
    Authenticated { user: String },
}

impl Session {
    pub fn authenticated(user: impl Into<String>) -> Self {
        Session::Authenticated { user: user.into() }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user } => Some(user),
        }
    }
}
