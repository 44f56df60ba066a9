//! Server-rendered screens. Every piece of user-supplied text goes through
//! [`escape`] before it is written into markup.

use std::fmt::Write;

use reelshelf_types::api::Page;
use reelshelf_types::models::Video;

use crate::session::{Notice, NoticeKind, Screen};

const STYLE: &str = "
body { font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }
main { flex: 1; padding: 1.5rem 2rem; max-width: 48rem; }
aside { width: 14rem; padding: 1.5rem 1rem; background: #f0f2f6; }
aside a { display: block; padding: .35rem .5rem; color: inherit; text-decoration: none; }
aside a.current { font-weight: bold; background: #dde1e8; border-radius: 4px; }
.notice { padding: .75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.notice.success { background: #dff5e1; }
.notice.info { background: #e1ecfa; }
.notice.error { background: #fbe0e0; }
details { border: 1px solid #ddd; border-radius: 4px; padding: .5rem 1rem; margin-bottom: .5rem; }
form.panel { display: grid; gap: .5rem; max-width: 20rem; margin-bottom: 2rem; }
";

pub fn render(screen: &Screen, notice: Option<&Notice>) -> String {
    match screen {
        Screen::Login => login_page(notice),
        Screen::Library { user, page, videos } => library_page(user, *page, videos, notice),
    }
}

pub fn error_page(message: &str) -> String {
    layout(
        "Video Manager",
        None,
        &format!(
            "<main><h1>Something went wrong</h1><div class=\"notice error\">{}</div>\
             <p><a href=\"/\">Back</a></p></main>",
            escape(message)
        ),
    )
}

fn login_page(notice: Option<&Notice>) -> String {
    let body = format!(
        "<main>
<h1>Video Manager Login</h1>
{notice}
<h2>Login</h2>
<form class=\"panel\" method=\"post\" action=\"/login\">
  <label>Username <input name=\"username\" autocomplete=\"username\"></label>
  <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>
  <button type=\"submit\">Login</button>
</form>
<h2>Sign Up</h2>
<form class=\"panel\" method=\"post\" action=\"/signup\">
  <label>New Username <input name=\"new_username\" autocomplete=\"off\"></label>
  <label>New Password <input name=\"new_password\" type=\"password\" autocomplete=\"new-password\"></label>
  <button type=\"submit\">Create Account</button>
</form>
</main>",
        notice = notice_html(notice),
    );

    layout("Video Manager Login", None, &body)
}

fn library_page(user: &str, page: Page, videos: &[Video], notice: Option<&Notice>) -> String {
    let content = match page {
        Page::ViewVideos | Page::DeleteVideos => video_list(page, videos),
        Page::AddVideo => add_form(),
    };

    let body = format!(
        "<main>
<h1>Video Manager (Welcome {user})</h1>
{notice}
<h2>{heading}</h2>
{content}
</main>",
        user = escape(user),
        notice = notice_html(notice),
        heading = match page {
            Page::ViewVideos => "Your Video Library",
            Page::AddVideo => "Upload New Video",
            Page::DeleteVideos => "Delete Videos",
        },
    );

    layout("Video Manager", Some(page), &body)
}

fn video_list(page: Page, videos: &[Video]) -> String {
    if videos.is_empty() {
        return "<div class=\"notice info\">No videos found. \
                <a href=\"/?page=add\">Add one!</a></div>"
            .to_string();
    }

    let mut html = String::new();
    for video in videos {
        let name = escape(&video.name);
        let _ = write!(
            html,
            "<details>
  <summary>{name}</summary>
  <p>Duration: {duration}</p>
  <p>Uploaded: {uploaded}</p>
  <form method=\"post\" action=\"/videos/{id}/delete\">
    <input type=\"hidden\" name=\"page\" value=\"{page}\">
    <button type=\"submit\">Delete {name}</button>
  </form>
</details>
",
            duration = escape(&video.duration),
            uploaded = video.upload_date.format("%Y-%m-%d %H:%M:%S"),
            id = video.id,
            page = page.slug(),
        );
    }
    html
}

fn add_form() -> String {
    "<form class=\"panel\" method=\"post\" action=\"/videos\">
  <label>Video Title <input name=\"name\"></label>
  <label>Duration (e.g., 2:30) <input name=\"duration\"></label>
  <button type=\"submit\">Upload</button>
</form>"
        .to_string()
}

fn sidebar(current: Page) -> String {
    let mut html = String::from("<aside><h3>Actions</h3><nav>");
    for page in Page::ALL {
        let class = if page == current { " class=\"current\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"/?page={}\"{}>{}</a>",
            page.slug(),
            class,
            page.label()
        );
    }
    html.push_str("</nav></aside>");
    html
}

fn notice_html(notice: Option<&Notice>) -> String {
    let Some(notice) = notice else {
        return String::new();
    };
    let class = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Info => "info",
        NoticeKind::Error => "error",
    };
    format!("<div class=\"notice {}\">{}</div>", class, escape(&notice.text))
}

fn layout(title: &str, nav: Option<Page>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{sidebar}{body}
</body>
</html>
",
        sidebar = nav.map(sidebar).unwrap_or_default(),
    )
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn video(id: i64, name: &str) -> Video {
        Video {
            id,
            name: name.into(),
            duration: "2:30".into(),
            upload_date: DateTime::default(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn login_screen_has_both_forms() {
        let html = render(&Screen::Login, Some(&Notice::error("Invalid credentials")));
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("action=\"/signup\""));
        assert!(html.contains("notice error"));
        assert!(html.contains("Invalid credentials"));
        assert!(!html.contains("<aside>"));
    }

    #[test]
    fn library_lists_videos_with_delete_buttons() {
        let screen = Screen::Library {
            user: "alice".into(),
            page: Page::ViewVideos,
            videos: vec![video(7, "Intro"), video(3, "<script>")],
        };
        let html = render(&screen, None);

        assert!(html.contains("Welcome alice"));
        assert!(html.contains("action=\"/videos/7/delete\""));
        assert!(html.contains("Delete Intro"));
        assert!(html.contains("Duration: 2:30"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<a href=\"/?page=view\" class=\"current\">View Videos</a>"));
    }

    #[test]
    fn empty_library_suggests_adding() {
        let screen = Screen::Library {
            user: "alice".into(),
            page: Page::DeleteVideos,
            videos: vec![],
        };
        assert!(render(&screen, None).contains("No videos found."));
    }

    #[test]
    fn add_page_has_upload_form() {
        let screen = Screen::Library {
            user: "alice".into(),
            page: Page::AddVideo,
            videos: vec![],
        };
        let html = render(&screen, Some(&Notice::success("Video added successfully!")));
        assert!(html.contains("action=\"/videos\""));
        assert!(html.contains("Upload"));
        assert!(html.contains("notice success"));
    }
}
