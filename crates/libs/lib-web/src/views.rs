//! # Views
//!
//! The handful of HTML fragments the service renders. User-supplied text is
//! always passed through [`escape_html`].

use axum::response::Html;
use lib_utils::escape_html;

pub fn home_guest() -> Html<String> {
    Html(
        r#"<h2>Welcome!</h2>
<a href="/signup"><button>Sign up</button></a>
<a href="/login"><button>Log in</button></a>
"#
        .to_string(),
    )
}

pub fn home_member(name: &str) -> Html<String> {
    Html(format!(
        r#"<div>
    <div style="font-size: 1.5em; font-weight: bold;">Hello, {}!</div>
    <div style="margin-top: 10px;"><a href="/members"><button>Go to Members Area</button></a></div>
    <div style="margin-top: 5px;"><a href="/logout"><button>Logout</button></a></div>
</div>
"#,
        escape_html(name)
    ))
}

pub fn signup_form() -> Html<String> {
    Html(
        r#"<h2>Create User</h2>
<form method="POST" action="/signupSubmit">
    <input name="name" placeholder="name"><br>
    <input name="email" placeholder="email"><br>
    <input name="password" type="password" placeholder="password"><br>
    <button type="submit">Submit</button>
</form>
"#
        .to_string(),
    )
}

pub fn login_form() -> Html<String> {
    Html(
        r#"<h2>Log In</h2>
<form method="POST" action="/loginSubmit">
    <input name="email" placeholder="email"><br>
    <input name="password" type="password" placeholder="password"><br>
    <button type="submit">Submit</button>
</form>
"#
        .to_string(),
    )
}

/// A rejected form submission, with a link back to the form.
pub fn form_error(message: &str, retry_href: &str) -> Html<String> {
    Html(format!(
        "<p>{}</p>\n<a href=\"{}\">Try again</a>\n",
        escape_html(message),
        escape_html(retry_href)
    ))
}

pub fn members(name: &str) -> Html<String> {
    Html(format!(
        r#"<h2>Hello, {}.</h2>
<a href="/logout"><button>Sign out</button></a>
"#,
        escape_html(name)
    ))
}

pub fn not_found() -> Html<String> {
    Html(
        r#"<h2>Page not found - 404</h2>
<a href="/">Go Home</a>
"#
        .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_escaped() {
        let Html(body) = members("<b>Mallory</b>");
        assert!(body.contains("Hello, &lt;b&gt;Mallory&lt;/b&gt;."));

        let Html(body) = home_member("Tom & Jerry");
        assert!(body.contains("Hello, Tom &amp; Jerry!"));
    }

    #[test]
    fn test_form_error_links_back() {
        let Html(body) = form_error("\"name\" is not allowed to be empty", "/signup");
        assert!(body.contains("&quot;name&quot; is not allowed to be empty"));
        assert!(body.contains("<a href=\"/signup\">Try again</a>"));
    }
}
