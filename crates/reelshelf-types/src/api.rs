use serde::Deserialize;

// -- Navigation --

/// Sidebar operation selector on the main screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Page {
    #[default]
    #[serde(rename = "view")]
    ViewVideos,
    #[serde(rename = "add")]
    AddVideo,
    /// Same list as `ViewVideos`; deletion happens through per-item buttons.
    #[serde(rename = "delete")]
    DeleteVideos,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::ViewVideos, Page::AddVideo, Page::DeleteVideos];

    pub fn slug(self) -> &'static str {
        match self {
            Page::ViewVideos => "view",
            Page::AddVideo => "add",
            Page::DeleteVideos => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::ViewVideos => "View Videos",
            Page::AddVideo => "Add Video",
            Page::DeleteVideos => "Delete Videos",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Page,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub new_username: String,
    pub new_password: String,
}

// -- Videos --

#[derive(Debug, Deserialize)]
pub struct AddVideoForm {
    pub name: String,
    pub duration: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteVideoForm {
    /// Screen to return to after the delete.
    #[serde(default)]
    pub page: Page,
}
