use glamx::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use yule3d::card::{
    greeting_from_link, is_clear_gesture, quip_chain, share_chain, share_link, share_text,
    AudioEngine, ClipboardBackend, Greeting, JsonFileStore, KeyValueStore, MediaSource,
    SnowAccumulation, SnowSettings, DEFAULT_MESSAGE,
};
use yule3d::Result;
use url::Url;

#[test]
fn shared_links_carry_the_greeting() {
    let base = Url::parse("https://cards.example/tree?theme=snow").unwrap();
    let link = share_link(&base, "  Ana ", "Cheers!");

    let greeting = greeting_from_link(&link).unwrap();
    assert_eq!(greeting.name, "Ana");
    assert_eq!(greeting.message, "Cheers!");
    assert!(link.query_pairs().any(|(k, v)| k == "theme" && v == "snow"));

    let unsigned = share_link(&link, "", "Cheers!");
    assert!(!unsigned.query_pairs().any(|(k, _)| k == "name"));
    assert_eq!(share_text("", "Cheers!"), "Cheers!");
}

#[test]
fn json_store_survives_reopening() {
    let path = std::env::temp_dir().join(format!("yule3d-card-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let mut store = JsonFileStore::open(&path).unwrap();
    assert_eq!(Greeting::load(&store).message, DEFAULT_MESSAGE);

    let mut greeting = Greeting::default();
    assert!(greeting.save(&mut store, "See you next year"));

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(Greeting::load(&reopened).message, "See you next year");
    assert!(reopened.get("missing").unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

struct Clipboard(Vec<String>);

impl ClipboardBackend for Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.0.push(text.to_string());
        Ok(())
    }
}

#[test]
fn notifier_chains_degrade_in_order() {
    let notice = yule3d::card::Notice::new("Hi", "Cheers").with_link(
        Url::parse("https://cards.example/tree?msg=Cheers").unwrap(),
    );

    let mut with_clipboard = share_chain(None, Some(Box::new(Clipboard(Vec::new()))));
    assert_eq!(with_clipboard.notify(&notice), Some("clipboard"));

    let mut bare = share_chain(None, None);
    assert_eq!(bare.notify(&notice), Some("prompt"));
    assert_eq!(quip_chain(None).notify(&notice), Some("prompt"));
}

#[test]
fn media_sources_are_recognized() {
    assert_eq!(
        MediaSource::parse("https://youtu.be/abc123").unwrap(),
        MediaSource::Video {
            id: "abc123".to_string()
        }
    );
    assert_eq!(
        MediaSource::parse("https://www.youtube.com/watch?v=xyz").unwrap(),
        MediaSource::Video {
            id: "xyz".to_string()
        }
    );
    assert_eq!(
        MediaSource::parse("https://youtube.com/shorts/s1").unwrap(),
        MediaSource::Video {
            id: "s1".to_string()
        }
    );
    assert_eq!(
        MediaSource::parse("music.mp3").unwrap(),
        MediaSource::Audio("music.mp3".to_string())
    );
    assert!(MediaSource::parse("https://www.youtube.com/").is_err());
}

#[test]
fn audio_engine_lives_while_used() {
    let first = AudioEngine::acquire();
    let second = AudioEngine::acquire();
    assert_eq!(first.generation(), second.generation());
    assert_eq!(AudioEngine::users(), 2);

    drop(first);
    assert!(AudioEngine::is_initialized());
    drop(second);
    assert!(!AudioEngine::is_initialized());

    let again = AudioEngine::acquire();
    assert!(AudioEngine::is_initialized());
    drop(again);
}

#[test]
fn snow_fills_and_clears() {
    let settings = SnowSettings::default();
    let mut snow = SnowAccumulation::new(200.0, 100.0, settings);
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..60 {
        snow.update(1.0 / 60.0, &mut rng);
    }
    assert!(snow.is_full());
    assert!(snow.flakes().len() <= settings.max_flakes);

    assert!(is_clear_gesture(2, false, false));
    assert!(is_clear_gesture(0, true, false));
    assert!(is_clear_gesture(0, false, true));
    assert!(!is_clear_gesture(0, false, false));
    assert!(!is_clear_gesture(1, true, false));

    let _ = snow.clear_at(&[Vec2::new(100.0, 90.0)]);
    assert!(!snow.is_full());
    assert!(snow.level() < 1.0);
}
