//! Shareable links carrying the greeting and the music track.

use super::greeting::{Greeting, DEFAULT_MESSAGE};
use url::Url;

pub const NAME_PARAM: &str = "name";
pub const MESSAGE_PARAM: &str = "msg";
pub const TRACK_PARAM: &str = "track";

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Sets `key` to `value` in the query of `url`, or removes it if `value` is `None`.
fn set_query_value(url: &mut Url, key: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let _ = url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// The link to share: `base` with `name` and `msg` set from the trimmed inputs,
/// or removed when they are empty.
pub fn share_link(base: &Url, name: &str, message: &str) -> Url {
    let mut url = base.clone();
    set_query_value(&mut url, NAME_PARAM, non_empty(name));
    set_query_value(&mut url, MESSAGE_PARAM, non_empty(message));
    url
}

/// The text accompanying a shared link: a "From:" line, then the message.
pub fn share_text(name: &str, message: &str) -> String {
    [
        non_empty(name).map(|n| format!("From: {}", n)),
        non_empty(message).map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("\n")
}

/// What gets copied when the link can only go to the clipboard.
pub fn clipboard_text(text: &str, link: &Url) -> String {
    if text.is_empty() {
        link.to_string()
    } else {
        format!("{}\n{}", text, link)
    }
}

/// The greeting carried by a shared link, if it carries one.
pub fn greeting_from_link(url: &Url) -> Option<Greeting> {
    let name = query_value(url, NAME_PARAM).and_then(|n| non_empty(&n).map(str::to_string));
    let message = query_value(url, MESSAGE_PARAM).and_then(|m| non_empty(&m).map(str::to_string));

    if name.is_none() && message.is_none() {
        return None;
    }

    Some(Greeting {
        name: name.unwrap_or_default(),
        message: message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
    })
}

/// `url` with its `track` parameter mirroring `track`.
pub fn with_track(url: &Url, track: &str) -> Url {
    let mut url = url.clone();
    set_query_value(&mut url, TRACK_PARAM, non_empty(track));
    url
}

pub fn track_from_link(url: &Url) -> Option<String> {
    query_value(url, TRACK_PARAM).filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_sets_and_removes_params() {
        let base = Url::parse("https://card.example/?name=Old&track=song.mp3").unwrap();

        let link = share_link(&base, "  Ploy ", "Happy New Year!");
        assert_eq!(query_value(&link, "name").as_deref(), Some("Ploy"));
        assert_eq!(query_value(&link, "msg").as_deref(), Some("Happy New Year!"));
        assert_eq!(query_value(&link, "track").as_deref(), Some("song.mp3"));

        let link = share_link(&link, "", "   ");
        assert_eq!(query_value(&link, "name"), None);
        assert_eq!(query_value(&link, "msg"), None);
    }

    #[test]
    fn test_share_text_drops_blank_lines() {
        assert_eq!(share_text("Ploy", "Hi"), "From: Ploy\nHi");
        assert_eq!(share_text("", "Hi"), "Hi");
        assert_eq!(share_text(" ", ""), "");
    }

    #[test]
    fn test_greeting_round_trips_through_a_link() {
        let base = Url::parse("https://card.example/").unwrap();
        assert_eq!(greeting_from_link(&base), None);

        let link = share_link(&base, "Ploy", "Good luck & health");
        let greeting = greeting_from_link(&link).unwrap();
        assert_eq!(greeting.name, "Ploy");
        assert_eq!(greeting.message, "Good luck & health");
    }

    #[test]
    fn test_track_param_is_mirrored() {
        let base = Url::parse("https://card.example/?msg=hi").unwrap();
        let link = with_track(&base, "https://youtu.be/abc123");

        assert_eq!(track_from_link(&link).as_deref(), Some("https://youtu.be/abc123"));
        assert!(greeting_from_link(&link).is_some());
        assert_eq!(track_from_link(&with_track(&link, "")), None);
    }
}
