//! Everything around the tree on one card, driven by the window.

use super::audio_engine::{swipe_noise, AudioEngine, AudioEngineGuard};
use super::confetti::{
    confetti_burst, ConfettiPiece, CONFETTI_COUNT, CONFETTI_DURATION, CONFETTI_SPREAD,
};
use super::envelope::Envelope;
use super::greeting::{CardDialog, Greeting, KeyValueStore};
use super::media::Jukebox;
use super::notifier::{Notice, NotifierChain};
use super::share::{share_link, share_text, with_track};
use super::snow::{SnowAccumulation, SnowSettings};
use super::snowfall::{snowfall, Flake, SNOWFALL_COUNT};
use super::text::AnimatedText;
use glamx::Vec2;
use rand::Rng;
use url::Url;

/// Title revealed letter by letter once the card is open.
pub const CARD_TITLE: &str = "Happy\nNew Year!";

/// The card widgets of one window.
pub struct CardSession {
    greeting: Greeting,
    dialog: CardDialog,
    store: Box<dyn KeyValueStore>,
    jukebox: Jukebox,
    track: String,
    envelope: Envelope,
    snow: SnowAccumulation,
    snowfall: Vec<Flake>,
    confetti: Vec<ConfettiPiece>,
    confetti_age: f32,
    title: AnimatedText,
    open_for: Option<f32>,
    elapsed: f32,
    share_base: Url,
    share: NotifierChain,
    quip: NotifierChain,
    audio: Option<AudioEngineGuard>,
}

impl CardSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new<R: Rng + ?Sized>(
        greeting: Greeting,
        store: Box<dyn KeyValueStore>,
        mut jukebox: Jukebox,
        track: &str,
        share_base: Url,
        share: NotifierChain,
        quip: NotifierChain,
        size: (f32, f32),
        rng: &mut R,
    ) -> Self {
        if let Err(e) = jukebox.set_source(track) {
            log::warn!("Cannot use track {:?}: {}", track, e);
        }

        CardSession {
            greeting,
            dialog: CardDialog::new(),
            store,
            jukebox,
            track: track.to_string(),
            envelope: Envelope::new(),
            snow: SnowAccumulation::new(size.0, size.1, SnowSettings::default()),
            snowfall: snowfall(SNOWFALL_COUNT, rng),
            confetti: Vec::new(),
            confetti_age: 0.0,
            title: AnimatedText::new(CARD_TITLE),
            open_for: None,
            elapsed: 0.0,
            share_base,
            share,
            quip,
            audio: None,
        }
    }

    #[inline]
    pub fn greeting(&self) -> &Greeting {
        &self.greeting
    }

    #[inline]
    pub fn dialog(&self) -> &CardDialog {
        &self.dialog
    }

    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    #[inline]
    pub fn jukebox(&self) -> &Jukebox {
        &self.jukebox
    }

    #[inline]
    pub fn snow(&self) -> &SnowAccumulation {
        &self.snow
    }

    #[inline]
    pub fn snowfall(&self) -> &[Flake] {
        &self.snowfall
    }

    #[inline]
    pub fn confetti(&self) -> &[ConfettiPiece] {
        &self.confetti
    }

    /// Seconds since the current confetti burst.
    #[inline]
    pub fn confetti_age(&self) -> f32 {
        self.confetti_age
    }

    /// Seconds the card has been running.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The part of the title revealed so far, empty until the envelope opens.
    pub fn visible_title(&self) -> String {
        self.open_for
            .map(|t| self.title.visible_at(t))
            .unwrap_or_default()
    }

    /// Taps the envelope. The first tap starts the music and the swipe sound.
    pub fn tap_envelope<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.envelope.tap() {
            return false;
        }

        let engine = self.audio.get_or_insert_with(AudioEngine::acquire);
        let swipe = swipe_noise(engine.sample_rate(), rng);
        log::debug!("Playing a {} samples swipe.", swipe.len());

        let _ = self.jukebox.play();
        true
    }

    pub fn toggle_music(&mut self) -> bool {
        self.jukebox.toggle()
    }

    /// Throws a new confetti burst, replacing any running one.
    pub fn launch_confetti<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.confetti = confetti_burst(CONFETTI_COUNT, CONFETTI_SPREAD, CONFETTI_DURATION, rng);
        self.confetti_age = 0.0;
    }

    /// Wipes snow around the given points.
    pub fn clear_snow(&mut self, points: &[Vec2]) -> usize {
        self.snow.clear_at(points)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.snow.resize(width, height);
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let dt = dt.max(0.0);
        self.elapsed += dt;

        if self.envelope.update(dt) {
            self.open_for = Some(0.0);
            self.launch_confetti(rng);
        } else if let Some(t) = &mut self.open_for {
            *t += dt;
        }

        if !self.confetti.is_empty() {
            self.confetti_age += dt;
            let age = self.confetti_age;
            self.confetti.retain(|piece| !piece.is_done(age));
        }

        self.snow.update(dt, rng);
    }

    /// Starts editing the message.
    pub fn edit_message(&mut self) {
        self.dialog.open(&self.greeting.message);
    }

    pub fn type_message(&mut self, text: impl Into<String>) {
        self.dialog.edit(text);
    }

    /// Saves the draft. Returns `false` when nothing was saved to the store.
    pub fn save_message(&mut self) -> bool {
        match self.dialog.save() {
            Some(draft) => self.greeting.save(self.store.as_mut(), &draft),
            None => false,
        }
    }

    pub fn cancel_message(&mut self) {
        self.dialog.close();
    }

    /// The link carrying this card's greeting and track.
    pub fn link(&self) -> Url {
        let link = share_link(&self.share_base, &self.greeting.name, &self.greeting.message);
        with_track(&link, &self.track)
    }

    /// Shares the greeting. Returns the notifier that delivered it.
    pub fn share(&mut self) -> Option<&'static str> {
        let text = share_text(&self.greeting.name, &self.greeting.message);
        let notice = Notice::new("Happy New Year!", text).with_link(self.link());
        self.share.notify(&notice)
    }

    /// Asks Santa for a quip.
    pub fn quip(&mut self) -> Option<&'static str> {
        self.quip.notify(&Notice::quip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::envelope::OPENING_DELAY;
    use crate::card::greeting::{MemoryStore, MESSAGE_KEY};
    use crate::card::notifier::{quip_chain, share_chain};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(rng: &mut StdRng) -> CardSession {
        let base = Url::parse("https://cards.example/tree").unwrap();
        let greeting = Greeting {
            name: "Ana".to_string(),
            message: "Cheers".to_string(),
        };
        CardSession::new(
            greeting,
            Box::new(MemoryStore::new()),
            Jukebox::logged(),
            "music.mp3",
            base,
            share_chain(None, None),
            quip_chain(None),
            (420.0, 380.0),
            rng,
        )
    }

    #[test]
    fn test_first_tap_plays_and_opening_throws_confetti() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut card = session(&mut rng);

        assert!(card.tap_envelope(&mut rng));
        assert!(card.jukebox().is_playing());
        assert!(!card.tap_envelope(&mut rng));
        assert_eq!(card.visible_title(), "");

        card.update(OPENING_DELAY + 0.01, &mut rng);
        assert!(card.envelope().is_open());
        assert_eq!(card.confetti().len(), CONFETTI_COUNT);

        card.update(10.0, &mut rng);
        assert!(card.confetti().is_empty());
        assert_eq!(card.visible_title(), CARD_TITLE);
    }

    #[test]
    fn test_share_falls_back_to_the_prompt() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut card = session(&mut rng);

        let link = card.link();
        assert!(link.query_pairs().any(|(k, v)| k == "name" && v == "Ana"));
        assert!(link.query_pairs().any(|(k, v)| k == "track" && v == "music.mp3"));
        assert_eq!(card.share(), Some("prompt"));
        assert_eq!(card.quip(), Some("prompt"));
    }

    #[test]
    fn test_edited_message_is_saved() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut card = session(&mut rng);

        assert!(!card.save_message());
        card.edit_message();
        assert_eq!(card.dialog().draft(), "Cheers");
        card.type_message("Peace on earth");
        assert!(card.save_message());
        assert_eq!(card.greeting().message, "Peace on earth");
        assert!(card.store.get(MESSAGE_KEY).unwrap().is_some());
    }
}
