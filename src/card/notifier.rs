//! Best-effort ways of telling the outside world something.
//!
//! Each capability (speech, share sheet, clipboard) is optional. A
//! [`NotifierChain`] tries them by rank and settles on the first that is
//! available and succeeds; the prompt at the end of the chain always works.

use super::share::clipboard_text;
use crate::error::{Error, Result};
use url::Url;

/// Something to announce or share.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub text: String,
    pub link: Option<Url>,
}

impl Notice {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            text: text.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: Url) -> Self {
        self.link = Some(link);
        self
    }

    /// Santa's quip, spoken when the sleigh is clicked.
    pub fn quip() -> Self {
        Notice::new("Santa", "Ho ho ho!")
    }
}

/// One way of delivering a [`Notice`].
pub trait Notifier {
    fn name(&self) -> &'static str;

    /// Whether the underlying capability exists at all.
    fn is_available(&self) -> bool;

    fn notify(&mut self, notice: &Notice) -> Result<()>;
}

/// Notifiers tried in order until one delivers.
#[derive(Default)]
pub struct NotifierChain {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `notifier` after the ones already in the chain.
    pub fn with(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    pub fn push(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Delivers `notice` and returns the name of the notifier that did, or
    /// `None` if every one was unavailable or failed.
    pub fn notify(&mut self, notice: &Notice) -> Option<&'static str> {
        for notifier in self.notifiers.iter_mut() {
            if !notifier.is_available() {
                log::debug!("Notifier `{}` unavailable.", notifier.name());
                continue;
            }

            match notifier.notify(notice) {
                Ok(()) => return Some(notifier.name()),
                Err(e) => log::warn!("Notifier `{}` failed: {}", notifier.name(), e),
            }
        }

        None
    }
}

/// Parameters of a spoken sentence.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// A speech synthesizer.
pub trait SpeechBackend {
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;
}

/// A system share sheet.
pub trait ShareBackend {
    fn share(&mut self, title: &str, text: &str, link: Option<&Url>) -> Result<()>;
}

pub trait ClipboardBackend {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Speaks the notice text in a deep, slightly slow voice.
pub struct SpeechNotifier {
    backend: Option<Box<dyn SpeechBackend>>,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechNotifier {
    pub fn new(backend: Option<Box<dyn SpeechBackend>>) -> Self {
        SpeechNotifier {
            backend,
            lang: "en-US".to_string(),
            rate: 0.9,
            pitch: 0.8,
        }
    }

    pub fn utterance(&self, text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            lang: self.lang.clone(),
            rate: self.rate,
            pitch: self.pitch,
        }
    }
}

impl Notifier for SpeechNotifier {
    fn name(&self) -> &'static str {
        "speech"
    }

    fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn notify(&mut self, notice: &Notice) -> Result<()> {
        let utterance = self.utterance(&notice.text);
        match self.backend.as_mut() {
            Some(backend) => backend.speak(&utterance),
            None => Err(Error::Media("no speech synthesizer".to_string())),
        }
    }
}

pub struct ShareNotifier {
    backend: Option<Box<dyn ShareBackend>>,
}

impl ShareNotifier {
    pub fn new(backend: Option<Box<dyn ShareBackend>>) -> Self {
        ShareNotifier { backend }
    }
}

impl Notifier for ShareNotifier {
    fn name(&self) -> &'static str {
        "share"
    }

    fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn notify(&mut self, notice: &Notice) -> Result<()> {
        match self.backend.as_mut() {
            Some(backend) => backend.share(&notice.title, &notice.text, notice.link.as_ref()),
            None => Err(Error::Media("no share sheet".to_string())),
        }
    }
}

/// Copies the text and the link, one per line.
pub struct ClipboardNotifier {
    backend: Option<Box<dyn ClipboardBackend>>,
}

impl ClipboardNotifier {
    pub fn new(backend: Option<Box<dyn ClipboardBackend>>) -> Self {
        ClipboardNotifier { backend }
    }
}

impl Notifier for ClipboardNotifier {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn notify(&mut self, notice: &Notice) -> Result<()> {
        let text = match &notice.link {
            Some(link) => clipboard_text(&notice.text, link),
            None => notice.text.clone(),
        };

        match self.backend.as_mut() {
            Some(backend) => {
                backend.write_text(&text)?;
                log::info!("Copied the greeting and its link.");
                Ok(())
            }
            None => Err(Error::Media("no clipboard".to_string())),
        }
    }
}

/// Leaves the link in the log for a manual copy. Always available.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptNotifier;

impl Notifier for PromptNotifier {
    fn name(&self) -> &'static str {
        "prompt"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn notify(&mut self, notice: &Notice) -> Result<()> {
        match &notice.link {
            Some(link) => log::info!("Copy this link: {}", link),
            None => log::info!("{}: {}", notice.title, notice.text),
        }
        Ok(())
    }
}

/// The ranked chain used to share a greeting.
pub fn share_chain(
    share: Option<Box<dyn ShareBackend>>,
    clipboard: Option<Box<dyn ClipboardBackend>>,
) -> NotifierChain {
    NotifierChain::new()
        .with(ShareNotifier::new(share))
        .with(ClipboardNotifier::new(clipboard))
        .with(PromptNotifier)
}

/// The chain used for Santa's quip. Without a synthesizer the quip is logged.
pub fn quip_chain(speech: Option<Box<dyn SpeechBackend>>) -> NotifierChain {
    NotifierChain::new()
        .with(SpeechNotifier::new(speech))
        .with(PromptNotifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl ClipboardBackend for Recorder {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    impl SpeechBackend for Recorder {
        fn speak(&mut self, utterance: &Utterance) -> Result<()> {
            self.0
                .borrow_mut()
                .push(format!("{}|{}|{}", utterance.text, utterance.rate, utterance.pitch));
            Ok(())
        }
    }

    struct FailingShare;

    impl ShareBackend for FailingShare {
        fn share(&mut self, _: &str, _: &str, _: Option<&Url>) -> Result<()> {
            Err(Error::Media("dismissed".to_string()))
        }
    }

    fn notice() -> Notice {
        Notice::new("New Year Greeting", "From: Ploy\nHi")
            .with_link(Url::parse("https://card.example/?msg=Hi").unwrap())
    }

    #[test]
    fn test_chain_falls_through_absent_capabilities() {
        let mut chain = share_chain(None, None);
        assert_eq!(chain.notify(&notice()), Some("prompt"));
    }

    #[test]
    fn test_failures_fall_through_to_the_clipboard() {
        let clipboard = Recorder::default();
        let mut chain = share_chain(Some(Box::new(FailingShare)), Some(Box::new(clipboard.clone())));

        assert_eq!(chain.notify(&notice()), Some("clipboard"));
        assert_eq!(
            clipboard.0.borrow().as_slice(),
            ["From: Ploy\nHi\nhttps://card.example/?msg=Hi"]
        );
    }

    #[test]
    fn test_quip_uses_the_santa_voice() {
        let speech = Recorder::default();
        let mut chain = quip_chain(Some(Box::new(speech.clone())));

        assert_eq!(chain.notify(&Notice::quip()), Some("speech"));
        assert_eq!(speech.0.borrow().as_slice(), ["Ho ho ho!|0.9|0.8"]);
        assert!(NotifierChain::new().notify(&Notice::quip()).is_none());
    }
}
