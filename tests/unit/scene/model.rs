use super::*;

fn image_left(url: &str) -> LayoutContent {
    LayoutContent::ImageLeft(ImageTextContent {
        text: TextFields::titled("Hello"),
        image: ImageSlot::from_url(url),
        image_bleed: None,
    })
}

#[test]
fn recorded_audio_wins_over_generated() {
    let mut scene = Scene::new("s0", "hi", 2.0, LayoutContent::Blank);
    scene.recorded_audio_ref = Some("a".to_string());
    scene.audio_ref = Some("b".to_string());
    assert_eq!(scene.playback_audio(), Some("a"));

    scene.recorded_audio_ref = None;
    assert_eq!(scene.playback_audio(), Some("b"));

    scene.audio_ref = None;
    assert_eq!(scene.playback_audio(), None);
}

#[test]
fn empty_content_reports_its_layout() {
    for layout in Layout::ALL {
        assert_eq!(LayoutContent::empty(layout).layout(), layout);
    }
}

#[test]
fn primary_image_follows_layout() {
    let content = image_left("media/a.png");
    assert_eq!(
        content.primary_image().and_then(|i| i.url.as_deref()),
        Some("media/a.png")
    );
    assert!(LayoutContent::empty(Layout::Quote).primary_image().is_none());
    assert!(
        LayoutContent::empty(Layout::ImageGrid4)
            .primary_image()
            .is_none()
    );

    let mut grid = LayoutContent::ImageGrid2(GridContent {
        text: TextFields::default(),
        images: vec![ImageSlot::from_url("one.png"), ImageSlot::from_url("two.png")],
    });
    grid.primary_image_mut().unwrap().url = Some("first.png".to_string());
    let LayoutContent::ImageGrid2(g) = &grid else {
        panic!("layout changed");
    };
    assert_eq!(g.images[0].url.as_deref(), Some("first.png"));
    assert_eq!(g.images[1].url.as_deref(), Some("two.png"));
}

#[test]
fn visibility_flags_default_to_visible() {
    let mut text = TextFields::titled("t");
    assert!(text.title_visible());
    assert!(text.subtitle_visible());
    assert!(text.body_visible());
    text.show_body = Some(false);
    assert!(!text.body_visible());
}

#[test]
fn animation_is_created_on_first_reference_and_replaced_wholesale() {
    let mut scene = Scene::new("s0", "", 1.0, LayoutContent::Blank);
    let anim = scene.animation_mut(ElementName::Title);
    assert_eq!(anim.kind, AnimationKind::Fade);
    assert_eq!(anim.duration_seconds, 0.5);
    anim.delay_seconds = 0.2;

    scene.set_animation(
        ElementName::Title,
        ElementAnimation::new(AnimationKind::ScaleIn, 1.0, 0.0, Easing::BackOut),
    );
    let anim = scene.animation_config[&ElementName::Title];
    assert_eq!(anim.kind, AnimationKind::ScaleIn);
    assert_eq!(anim.delay_seconds, 0.0);
}

#[test]
fn scene_json_uses_layout_tag_and_camel_case() {
    let json = serde_json::json!({
        "id": "s1",
        "narration": "Welcome aboard",
        "duration": 4.5,
        "layoutContent": {
            "layout": "imageBulletsBleedLeft",
            "content": {
                "title": "Agenda",
                "showSubtitle": false,
                "bulletPoints": ["one", "two"],
                "image": { "url": "images/a.png" }
            }
        },
        "animationConfig": {
            "title": { "type": "slideInLeft", "duration": 0.8, "delay": 0.1, "easing": "backOut" },
            "bulletPoints": { "type": "sparkle" }
        },
        "audioUrl": "audio/s1.mp3"
    });
    let scene: Scene = serde_json::from_value(json).unwrap();
    assert_eq!(scene.layout(), Layout::ImageBulletsBleedLeft);
    assert_eq!(scene.duration_seconds, 4.5);
    assert_eq!(scene.audio_ref.as_deref(), Some("audio/s1.mp3"));
    let title = scene.animation_config[&ElementName::Title];
    assert_eq!(title.kind, AnimationKind::SlideInLeft);
    assert_eq!(title.easing, Easing::BackOut);
    assert_eq!(
        scene.animation_config[&ElementName::BulletPoints].kind,
        AnimationKind::Unknown
    );
    let LayoutContent::ImageBulletsBleedLeft(c) = &scene.layout_content else {
        panic!("wrong variant");
    };
    assert_eq!(c.bullet_points.len(), 2);
    assert!(!c.text.subtitle_visible());

    let back = serde_json::to_value(&scene).unwrap();
    assert_eq!(back["layoutContent"]["layout"], "imageBulletsBleedLeft");
    assert_eq!(back["durationSeconds"], 4.5);
}

#[test]
fn blank_layout_needs_no_content() {
    let scene: Scene = serde_json::from_value(serde_json::json!({
        "id": "b",
        "durationSeconds": 1.0,
        "layoutContent": { "layout": "blank" }
    }))
    .unwrap();
    assert_eq!(scene.layout(), Layout::Blank);
    assert!(!scene.has_narration());
}

#[test]
fn theme_override_merges_field_wise() {
    let base = Theme::default();
    let over = ThemeOverride {
        accent_color: Some("#FF0000".to_string()),
        ..ThemeOverride::default()
    };
    let merged = base.merged(Some(&over));
    assert_eq!(merged.accent_color, "#FF0000");
    assert_eq!(merged.background_color, base.background_color);
    assert_eq!(base.merged(None), base);
}

#[test]
fn validate_rejects_duplicate_and_empty_ids() {
    let mut project = Project {
        id: "p".to_string(),
        name: String::new(),
        scenes: vec![
            Scene::new("a", "", 1.0, LayoutContent::Blank),
            Scene::new("b", "", 1.0, LayoutContent::Blank),
        ],
        theme: Theme::default(),
        video_settings: VideoSettings::default(),
    };
    assert!(project.validate().is_ok());
    assert!(project.scene("b").is_some());

    project.scenes[1].id = "a".to_string();
    assert!(project.validate().is_err());

    project.scenes[1].id = " ".to_string();
    assert!(project.validate().is_err());
}
