use super::*;
use crate::scene::model::{ImageSlot, ImageTextContent, LayoutContent, TextFields};

const INLINE_PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

fn text_scene(id: &str, narration: &str) -> Scene {
    Scene::new(id, narration, 3.0, LayoutContent::TitleBody(TextFields::titled(id)))
}

fn image_scene(id: &str, url: &str) -> Scene {
    Scene::new(
        id,
        "",
        3.0,
        LayoutContent::ImageRight(ImageTextContent {
            image: ImageSlot::from_url(url),
            ..ImageTextContent::default()
        }),
    )
}

#[test]
fn classifies_each_kind_of_work() {
    assert_eq!(
        classify_scene(&text_scene("a", "hello")),
        vec![WorkItem::SynthesizeAudio]
    );
    assert!(classify_scene(&text_scene("b", "   ")).is_empty());

    let mut recorded = text_scene("c", "hello");
    recorded.recorded_audio_ref = Some("/audio/mine.webm".to_string());
    assert!(classify_scene(&recorded).is_empty());

    let mut inline_audio = text_scene("d", "hello");
    inline_audio.audio_ref = Some("data:audio/mpeg;base64,AAAA".to_string());
    assert_eq!(classify_scene(&inline_audio), vec![WorkItem::PersistAudio]);

    assert_eq!(
        classify_scene(&image_scene("e", INLINE_PNG)),
        vec![WorkItem::PersistImage]
    );
    assert!(classify_scene(&image_scene("f", "images/f.png")).is_empty());
}

#[test]
fn scan_rejects_malformed_input() {
    let dup = vec![text_scene("a", ""), text_scene("a", "")];
    assert!(matches!(scan(&dup), Err(SlideReelError::Scan(_))));

    let bad = vec![image_scene("x", "data:image/png,notbase64")];
    let err = scan(&bad).unwrap_err();
    assert!(err.to_string().contains("scene 'x'"));
    assert!(err.is_fatal());
}

#[test]
fn scan_counts_work_per_scene() {
    let scenes = vec![
        text_scene("a", "one"),
        image_scene("b", INLINE_PNG),
        image_scene("c", "images/c.png"),
    ];
    let plan = scan(&scenes).unwrap();
    assert_eq!(plan.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 1, 0]);
}

#[test]
fn image_references_drop_leading_separator() {
    assert_eq!(image_reference("/images/a.png"), "images/a.png");
    assert_eq!(image_reference("images/a.png"), "images/a.png");
}

#[test]
fn cancel_flag_is_shared() {
    let flag = CancelFlag::new();
    let clone = flag.clone();
    assert!(!flag.is_cancelled());
    clone.cancel();
    assert!(flag.is_cancelled());
}
