//! Background music: a local audio file or a video-sharing link.

use crate::error::{Error, Result};
use url::Url;

/// Track played when none is configured.
pub const DEFAULT_TRACK: &str = "music.mp3";

/// Where the music comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    /// A path or URL of an audio file.
    Audio(String),
    /// A video hosted on YouTube, identified by its id.
    Video { id: String },
}

fn is_video_host(host: &str) -> bool {
    host.contains("youtu.be") || host.contains("youtube.com")
}

impl MediaSource {
    /// Recognizes `youtu.be/<id>`, `youtube.com/watch?v=<id>` and
    /// `youtube.com/shorts/<id>` links; anything else is an audio file.
    ///
    /// A video link without a recognizable id is an error.
    pub fn parse(src: &str) -> Result<MediaSource> {
        let src = src.trim();
        if src.is_empty() {
            return Err(Error::Media("empty media source".to_string()));
        }

        let url = match Url::parse(src) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Ok(MediaSource::Audio(src.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        if !is_video_host(&host) {
            return Ok(MediaSource::Audio(src.to_string()));
        }

        let id = if host.contains("youtu.be") {
            url.path_segments()
                .and_then(|mut segments| segments.next())
                .map(str::to_string)
        } else {
            url.query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
                .or_else(|| {
                    let segments: Vec<&str> = url.path_segments()?.collect();
                    let idx = segments.iter().position(|s| *s == "shorts")?;
                    segments.get(idx + 1).map(|s| s.to_string())
                })
        };

        match id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(MediaSource::Video { id }),
            None => Err(Error::Media(format!("no video id in `{}`", src))),
        }
    }

    #[inline]
    pub fn is_video(&self) -> bool {
        matches!(self, MediaSource::Video { .. })
    }
}

/// A playback backend.
pub trait MediaPlayer {
    fn load(&mut self, source: &MediaSource) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

/// A player without audio output: it keeps the playing state and logs it.
#[derive(Clone, Debug, Default)]
pub struct LoggedPlayer {
    source: Option<MediaSource>,
    playing: bool,
}

impl MediaPlayer for LoggedPlayer {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        log::info!("Loaded {:?}.", source);
        self.source = Some(source.clone());
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| Error::Media("nothing loaded".to_string()))?;
        log::info!("Playing {:?}.", source);
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Picks the audio or the video backend depending on the source.
///
/// Playback failures are logged and leave the jukebox silent but usable.
pub struct Jukebox {
    source: Option<MediaSource>,
    audio: Box<dyn MediaPlayer>,
    video: Box<dyn MediaPlayer>,
}

impl Jukebox {
    pub fn new(audio: Box<dyn MediaPlayer>, video: Box<dyn MediaPlayer>) -> Self {
        Jukebox {
            source: None,
            audio,
            video,
        }
    }

    /// A jukebox whose backends only log.
    pub fn logged() -> Self {
        Self::new(Box::new(LoggedPlayer::default()), Box::new(LoggedPlayer::default()))
    }

    #[inline]
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    fn active(&mut self) -> Option<&mut Box<dyn MediaPlayer>> {
        match self.source.as_ref()? {
            MediaSource::Audio(_) => Some(&mut self.audio),
            MediaSource::Video { .. } => Some(&mut self.video),
        }
    }

    /// Switches to `src`. On error the previous source stays selected.
    pub fn set_source(&mut self, src: &str) -> Result<()> {
        let source = MediaSource::parse(src)?;

        self.audio.pause();
        self.video.pause();

        let backend = if source.is_video() {
            &mut self.video
        } else {
            &mut self.audio
        };
        backend.load(&source)?;

        self.source = Some(source);
        Ok(())
    }

    /// Starts playback. Returns `false` if nothing could be played.
    pub fn play(&mut self) -> bool {
        let Some(player) = self.active() else {
            log::warn!("No track selected.");
            return false;
        };

        match player.play() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Playback failed: {}", e);
                false
            }
        }
    }

    pub fn pause(&mut self) {
        if let Some(player) = self.active() {
            player.pause();
        }
    }

    /// Plays if paused, pauses if playing. Returns whether it is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    pub fn is_playing(&self) -> bool {
        match &self.source {
            Some(MediaSource::Audio(_)) => self.audio.is_playing(),
            Some(MediaSource::Video { .. }) => self.video.is_playing(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BlockedPlayer;

    impl MediaPlayer for BlockedPlayer {
        fn load(&mut self, _: &MediaSource) -> Result<()> {
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            Err(Error::Media("autoplay rejected".to_string()))
        }

        fn pause(&mut self) {}

        fn is_playing(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_parse_recognizes_video_links() {
        let video = |id: &str| MediaSource::Video { id: id.to_string() };

        assert_eq!(MediaSource::parse("https://youtu.be/dQw4w9WgXcQ").unwrap(), video("dQw4w9WgXcQ"));
        assert_eq!(
            MediaSource::parse("https://www.youtube.com/watch?v=abc&t=3").unwrap(),
            video("abc")
        );
        assert_eq!(MediaSource::parse("https://youtube.com/shorts/xyz").unwrap(), video("xyz"));
        assert!(MediaSource::parse("https://www.youtube.com/").is_err());
    }

    #[test]
    fn test_parse_defaults_to_audio() {
        assert_eq!(
            MediaSource::parse("music.mp3").unwrap(),
            MediaSource::Audio("music.mp3".to_string())
        );
        assert_eq!(
            MediaSource::parse("https://cdn.example/song.ogg").unwrap(),
            MediaSource::Audio("https://cdn.example/song.ogg".to_string())
        );
        assert!(MediaSource::parse("  ").is_err());
    }

    #[test]
    fn test_jukebox_routes_by_source_kind() {
        let mut jukebox = Jukebox::new(Box::new(BlockedPlayer), Box::new(LoggedPlayer::default()));

        assert!(!jukebox.play());
        jukebox.set_source(DEFAULT_TRACK).unwrap();
        assert!(!jukebox.play());
        assert!(!jukebox.is_playing());

        jukebox.set_source("https://youtu.be/abc").unwrap();
        assert!(jukebox.toggle());
        assert!(jukebox.is_playing());
        assert!(!jukebox.toggle());

        assert!(jukebox.set_source("https://youtube.com/").is_err());
        assert!(jukebox.source().is_some_and(MediaSource::is_video));
    }
}
