//! The greeting card around the tree: envelope, music, snow, confetti and
//! the editable, shareable message.
//!
//! Everything here is a plain model. Rendering and platform capabilities
//! (speech, share sheet, clipboard, audio output) plug in through traits.

pub use self::audio_engine::{swipe_gain, swipe_noise, AudioEngine, AudioEngineGuard};
pub use self::confetti::{confetti_burst, ConfettiPiece, ConfettiShape};
pub use self::envelope::{Envelope, EnvelopeState, OPENING_DELAY};
pub use self::greeting::{
    CardDialog, Greeting, JsonFileStore, KeyValueStore, MemoryStore, DEFAULT_MESSAGE, MESSAGE_KEY,
};
pub use self::media::{Jukebox, LoggedPlayer, MediaPlayer, MediaSource, DEFAULT_TRACK};
pub use self::notifier::{
    quip_chain, share_chain, ClipboardBackend, ClipboardNotifier, Notice, Notifier, NotifierChain,
    PromptNotifier, ShareBackend, ShareNotifier, SpeechBackend, SpeechNotifier, Utterance,
};
pub use self::session::{CardSession, CARD_TITLE};
pub use self::share::{
    clipboard_text, greeting_from_link, share_link, share_text, track_from_link, with_track,
};
pub use self::snow::{is_clear_gesture, SnowAccumulation, SnowFlake, SnowSettings};
pub use self::snowfall::{snowfall, Flake, SNOWFALL_COUNT};
pub use self::text::{AnimatedText, Glyph};

pub mod audio_engine;
pub mod confetti;
mod envelope;
mod greeting;
mod media;
mod notifier;
mod session;
mod share;
mod snow;
mod snowfall;
mod text;
