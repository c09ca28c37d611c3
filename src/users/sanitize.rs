use crate::users::dto::PublicUser;
use crate::users::repo_types::User;

/// Escape HTML-significant characters in a free-text field so embedded
/// markup is inert when a client renders it. Plain text passes through
/// unchanged, so re-escaping already-plain output is a no-op.
fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the client-facing view of a stored user. Free-text fields are
/// escaped, an absent nickname becomes the empty string and the password
/// hash is dropped entirely.
pub fn public_view(user: User) -> PublicUser {
    PublicUser {
        id: user.id,
        user_name: escape_text(&user.user_name),
        full_name: escape_text(&user.full_name),
        nickname: user.nickname.as_deref().map(escape_text).unwrap_or_default(),
        date_created: user.date_created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn stored_user(full_name: &str, nickname: Option<&str>) -> User {
        User {
            id: 1,
            user_name: "alice1".to_string(),
            password: "$argon2id$fake".to_string(),
            full_name: full_name.to_string(),
            nickname: nickname.map(str::to_string),
            date_created: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn neutralizes_script_tags() {
        let view = public_view(stored_user("<script>alert(1)</script>", None));
        assert_eq!(view.full_name, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn escapes_quotes_and_ampersands() {
        let view = public_view(stored_user(r#"Bobby "Tables" & Co'"#, None));
        assert_eq!(view.full_name, "Bobby &quot;Tables&quot; &amp; Co&#x27;");
    }

    #[test]
    fn plain_text_is_unchanged_and_stable() {
        let once = escape_text("Alice A");
        assert_eq!(once, "Alice A");
        assert_eq!(escape_text(&once), once);
    }

    #[test]
    fn absent_nickname_becomes_empty_string() {
        let view = public_view(stored_user("Alice A", None));
        assert_eq!(view.nickname, "");
    }

    #[test]
    fn present_nickname_is_escaped() {
        let view = public_view(stored_user("Alice A", Some("<b>al</b>")));
        assert_eq!(view.nickname, "&lt;b&gt;al&lt;/b&gt;");
    }
}
