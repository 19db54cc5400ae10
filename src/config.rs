//! Command-line configuration of the card.

use crate::card::{greeting_from_link, track_from_link, Greeting, DEFAULT_TRACK};
use crate::error::Result;
use crate::tree::SceneParameters;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Base of the links built when a card is shared without `--link`.
pub const DEFAULT_SHARE_BASE: &str = "https://yule3d.local/card";

#[derive(Parser, Debug, Clone)]
#[command(name = "yule3d")]
#[command(about = "A New Year greeting card with a glowing 3D tree", long_about = None)]
pub struct AppConfig {
    /// Width of the tree view, in logical pixels.
    #[arg(long, default_value_t = 420)]
    pub width: u32,

    /// Height of the tree view, in logical pixels.
    #[arg(long, default_value_t = 380)]
    pub height: u32,

    /// Uniform scale of the tree.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Whether clicks toggle the spin speed.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub interactive: bool,

    /// Music track: a file path or a YouTube link.
    #[arg(long, default_value = DEFAULT_TRACK)]
    pub track: String,

    /// A shared card link whose `name`, `msg` and `track` seed this card.
    #[arg(long)]
    pub link: Option<Url>,

    /// File keeping the saved message.
    #[arg(long, default_value = "yule3d-store.json")]
    pub store: PathBuf,

    /// Seed of the ornament placement; random when absent.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width: 420,
            height: 380,
            scale: 1.0,
            interactive: true,
            track: DEFAULT_TRACK.to_string(),
            link: None,
            store: PathBuf::from("yule3d-store.json"),
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn scene_parameters(&self) -> SceneParameters {
        SceneParameters::new(self.width, self.height, self.scale, self.interactive)
    }

    /// The track to play: the one carried by `--link` wins over `--track`.
    pub fn track(&self) -> String {
        self.link
            .as_ref()
            .and_then(track_from_link)
            .unwrap_or_else(|| self.track.clone())
    }

    /// The greeting carried by `--link`, if any.
    pub fn linked_greeting(&self) -> Option<Greeting> {
        self.link.as_ref().and_then(greeting_from_link)
    }

    /// The link new share links are built from.
    pub fn share_base(&self) -> Result<Url> {
        match &self.link {
            Some(link) => {
                let mut base = link.clone();
                base.set_query(None);
                Ok(base)
            }
            None => Ok(Url::parse(DEFAULT_SHARE_BASE)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_card() {
        let config = AppConfig::parse_from(["yule3d"]);

        assert_eq!(config.width, 420);
        assert_eq!(config.height, 380);
        assert!(config.interactive);
        assert_eq!(config.track(), DEFAULT_TRACK);
        assert!(config.linked_greeting().is_none());

        let params = config.scene_parameters();
        assert_eq!(params.width(), 420);
        assert!(params.interactive());
    }

    #[test]
    fn test_link_seeds_greeting_and_track() {
        let config = AppConfig::parse_from([
            "yule3d",
            "--interactive",
            "false",
            "--link",
            "https://cards.example/tree?name=Ana&msg=Cheers&track=jingle.mp3",
        ]);

        assert!(!config.interactive);
        assert_eq!(config.track(), "jingle.mp3");
        let greeting = config.linked_greeting().unwrap();
        assert_eq!(greeting.name, "Ana");
        assert_eq!(greeting.message, "Cheers");
        assert_eq!(config.share_base().unwrap().as_str(), "https://cards.example/tree");
    }
}
