use super::*;
use crate::scene::model::LayoutContent;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "slidereel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[tokio::test]
async fn media_store_writes_under_kind_dir() {
    let root = temp_dir("fs_media");
    let store = FsMediaStore::new(&root);
    let media = InlineMedia::new("audio/mpeg", vec![7, 7, 7]);
    let reference = store
        .persist_inline_media(&media, "s1-abc.mp3", MediaKind::Audio)
        .await
        .unwrap();
    assert_eq!(reference, "/audio/s1-abc.mp3");
    assert_eq!(std::fs::read(store.resolve(&reference)).unwrap(), vec![7, 7, 7]);

    let err = store
        .persist_inline_media(&media, "../escape.mp3", MediaKind::Audio)
        .await
        .unwrap_err();
    assert!(matches!(err, SlideReelError::Storage(_)));
    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn json_store_rewrites_file_on_patch() {
    let dir = temp_dir("fs_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("project.json");
    let project = Project {
        id: "p".to_string(),
        name: String::new(),
        scenes: vec![Scene::new("a", "hello", 2.0, LayoutContent::Blank)],
        theme: Default::default(),
        video_settings: Default::default(),
    };
    std::fs::write(&path, serde_json::to_vec(&project).unwrap()).unwrap();

    let store = JsonProjectStore::new(&path);
    store
        .update_scene(
            "a",
            &ScenePatch {
                audio_ref: Some("/audio/a.mp3".to_string()),
                duration_seconds: Some(4.25),
                ..ScenePatch::default()
            },
        )
        .await
        .unwrap();

    let reloaded: Project = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(reloaded.scenes[0].audio_ref.as_deref(), Some("/audio/a.mp3"));
    assert_eq!(reloaded.scenes[0].duration_seconds, 4.25);
    assert!(store.get_project("other").await.is_err());
    assert!(store.update_scene("ghost", &ScenePatch::default()).await.is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
