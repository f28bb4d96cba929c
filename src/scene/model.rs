use std::collections::{BTreeMap, HashSet};

use crate::{
    foundation::error::{SlideReelError, SlideReelResult},
    scene::settings::VideoSettings,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
/// Closed set of visual arrangements a scene can use.
pub enum Layout {
    Cover,
    ImageLeft,
    ImageRight,
    ImageBullets,
    FullImage,
    TwoColumn,
    TitleBody,
    Blank,
    CenteredChart,
    Comparison,
    Quote,
    Steps2,
    Steps3,
    Steps5,
    ImageGrid2,
    ImageGrid4,
    ImageGrid6,
    CenteredImageMedium,
    CenteredImageLarge,
    ImageBulletsBleedLeft,
    ImageBulletsBleedRight,
}

impl Layout {
    pub const ALL: [Layout; 21] = [
        Layout::Cover,
        Layout::ImageLeft,
        Layout::ImageRight,
        Layout::ImageBullets,
        Layout::FullImage,
        Layout::TwoColumn,
        Layout::TitleBody,
        Layout::Blank,
        Layout::CenteredChart,
        Layout::Comparison,
        Layout::Quote,
        Layout::Steps2,
        Layout::Steps3,
        Layout::Steps5,
        Layout::ImageGrid2,
        Layout::ImageGrid4,
        Layout::ImageGrid6,
        Layout::CenteredImageMedium,
        Layout::CenteredImageLarge,
        Layout::ImageBulletsBleedLeft,
        Layout::ImageBulletsBleedRight,
    ];

    /// Layouts whose image always fills its box edge-to-edge.
    pub fn is_bleed(self) -> bool {
        matches!(
            self,
            Layout::ImageBulletsBleedLeft | Layout::ImageBulletsBleedRight | Layout::FullImage
        )
    }

    pub fn step_count(self) -> Option<usize> {
        match self {
            Layout::Steps2 => Some(2),
            Layout::Steps3 => Some(3),
            Layout::Steps5 => Some(5),
            _ => None,
        }
    }

    pub fn grid_cells(self) -> Option<usize> {
        match self {
            Layout::ImageGrid2 => Some(2),
            Layout::ImageGrid4 => Some(4),
            Layout::ImageGrid6 => Some(6),
            _ => None,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
/// Logical content element an [`ElementAnimation`] can target.
pub enum ElementName {
    Title,
    Subtitle,
    Body,
    Image,
    LeftColumn,
    RightColumn,
    BulletPoints,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    None,
    #[default]
    Fade,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
    SlideInDown,
    ScaleIn,
    RotateIn,
    /// Any kind this build does not know. Rendered like [`AnimationKind::None`].
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    BackOut,
    Anticipate,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Entrance effect for one content element. Value type, replaced wholesale on edit.
pub struct ElementAnimation {
    #[serde(rename = "type", alias = "kind")]
    pub kind: AnimationKind,
    #[serde(default = "default_animation_duration", alias = "duration")]
    pub duration_seconds: f64,
    #[serde(default, alias = "delay")]
    pub delay_seconds: f64,
    #[serde(default)]
    pub easing: Easing,
}

fn default_animation_duration() -> f64 {
    0.5
}

impl Default for ElementAnimation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Fade,
            duration_seconds: default_animation_duration(),
            delay_seconds: 0.0,
            easing: Easing::default(),
        }
    }
}

impl ElementAnimation {
    pub fn new(kind: AnimationKind, duration_seconds: f64, delay_seconds: f64, easing: Easing) -> Self {
        Self {
            kind,
            duration_seconds,
            delay_seconds,
            easing,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Text fields shared by most layouts. `show_*` flags default to visible when unset.
pub struct TextFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_title: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_subtitle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_body: Option<bool>,
}

impl TextFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn title_visible(&self) -> bool {
        self.show_title.unwrap_or(true)
    }

    pub fn subtitle_visible(&self) -> bool {
        self.show_subtitle.unwrap_or(true)
    }

    pub fn body_visible(&self) -> bool {
        self.show_body.unwrap_or(true)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSlot {
    /// Durable path, remote URL or inline `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Generation prompt used when no `url` is set yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl ImageSlot {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default)]
    pub image: ImageSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_bleed: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBulletsContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default)]
    pub bullet_points: Vec<String>,
    #[serde(default)]
    pub image: ImageSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_bleed: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_left_column: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_right_column: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default)]
    pub chart_type: ChartKind,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default)]
    pub steps: Vec<StepItem>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridContent {
    #[serde(flatten)]
    pub text: TextFields,
    #[serde(default)]
    pub images: Vec<ImageSlot>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "layout", content = "content", rename_all = "camelCase")]
/// Layout-specific payload. The variant is the scene's layout.
pub enum LayoutContent {
    Cover(TextFields),
    ImageLeft(ImageTextContent),
    ImageRight(ImageTextContent),
    ImageBullets(ImageBulletsContent),
    FullImage(ImageTextContent),
    TwoColumn(ColumnsContent),
    TitleBody(TextFields),
    Blank,
    CenteredChart(ChartContent),
    Comparison(ColumnsContent),
    Quote(QuoteContent),
    Steps2(StepsContent),
    Steps3(StepsContent),
    Steps5(StepsContent),
    ImageGrid2(GridContent),
    ImageGrid4(GridContent),
    ImageGrid6(GridContent),
    CenteredImageMedium(ImageTextContent),
    CenteredImageLarge(ImageTextContent),
    ImageBulletsBleedLeft(ImageBulletsContent),
    ImageBulletsBleedRight(ImageBulletsContent),
}

impl LayoutContent {
    /// Placeholder content for `layout`: every field absent.
    pub fn empty(layout: Layout) -> Self {
        match layout {
            Layout::Cover => Self::Cover(TextFields::default()),
            Layout::ImageLeft => Self::ImageLeft(ImageTextContent::default()),
            Layout::ImageRight => Self::ImageRight(ImageTextContent::default()),
            Layout::ImageBullets => Self::ImageBullets(ImageBulletsContent::default()),
            Layout::FullImage => Self::FullImage(ImageTextContent::default()),
            Layout::TwoColumn => Self::TwoColumn(ColumnsContent::default()),
            Layout::TitleBody => Self::TitleBody(TextFields::default()),
            Layout::Blank => Self::Blank,
            Layout::CenteredChart => Self::CenteredChart(ChartContent::default()),
            Layout::Comparison => Self::Comparison(ColumnsContent::default()),
            Layout::Quote => Self::Quote(QuoteContent::default()),
            Layout::Steps2 => Self::Steps2(StepsContent::default()),
            Layout::Steps3 => Self::Steps3(StepsContent::default()),
            Layout::Steps5 => Self::Steps5(StepsContent::default()),
            Layout::ImageGrid2 => Self::ImageGrid2(GridContent::default()),
            Layout::ImageGrid4 => Self::ImageGrid4(GridContent::default()),
            Layout::ImageGrid6 => Self::ImageGrid6(GridContent::default()),
            Layout::CenteredImageMedium => Self::CenteredImageMedium(ImageTextContent::default()),
            Layout::CenteredImageLarge => Self::CenteredImageLarge(ImageTextContent::default()),
            Layout::ImageBulletsBleedLeft => {
                Self::ImageBulletsBleedLeft(ImageBulletsContent::default())
            }
            Layout::ImageBulletsBleedRight => {
                Self::ImageBulletsBleedRight(ImageBulletsContent::default())
            }
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::Cover(_) => Layout::Cover,
            Self::ImageLeft(_) => Layout::ImageLeft,
            Self::ImageRight(_) => Layout::ImageRight,
            Self::ImageBullets(_) => Layout::ImageBullets,
            Self::FullImage(_) => Layout::FullImage,
            Self::TwoColumn(_) => Layout::TwoColumn,
            Self::TitleBody(_) => Layout::TitleBody,
            Self::Blank => Layout::Blank,
            Self::CenteredChart(_) => Layout::CenteredChart,
            Self::Comparison(_) => Layout::Comparison,
            Self::Quote(_) => Layout::Quote,
            Self::Steps2(_) => Layout::Steps2,
            Self::Steps3(_) => Layout::Steps3,
            Self::Steps5(_) => Layout::Steps5,
            Self::ImageGrid2(_) => Layout::ImageGrid2,
            Self::ImageGrid4(_) => Layout::ImageGrid4,
            Self::ImageGrid6(_) => Layout::ImageGrid6,
            Self::CenteredImageMedium(_) => Layout::CenteredImageMedium,
            Self::CenteredImageLarge(_) => Layout::CenteredImageLarge,
            Self::ImageBulletsBleedLeft(_) => Layout::ImageBulletsBleedLeft,
            Self::ImageBulletsBleedRight(_) => Layout::ImageBulletsBleedRight,
        }
    }

    /// The image the asset pipeline persists for this scene, if the layout has one.
    pub fn primary_image(&self) -> Option<&ImageSlot> {
        match self {
            Self::ImageLeft(c)
            | Self::ImageRight(c)
            | Self::FullImage(c)
            | Self::CenteredImageMedium(c)
            | Self::CenteredImageLarge(c) => Some(&c.image),
            Self::ImageBullets(c)
            | Self::ImageBulletsBleedLeft(c)
            | Self::ImageBulletsBleedRight(c) => Some(&c.image),
            Self::ImageGrid2(c) | Self::ImageGrid4(c) | Self::ImageGrid6(c) => c.images.first(),
            Self::Cover(_)
            | Self::TitleBody(_)
            | Self::Blank
            | Self::TwoColumn(_)
            | Self::Comparison(_)
            | Self::CenteredChart(_)
            | Self::Quote(_)
            | Self::Steps2(_)
            | Self::Steps3(_)
            | Self::Steps5(_) => None,
        }
    }

    pub fn primary_image_mut(&mut self) -> Option<&mut ImageSlot> {
        match self {
            Self::ImageLeft(c)
            | Self::ImageRight(c)
            | Self::FullImage(c)
            | Self::CenteredImageMedium(c)
            | Self::CenteredImageLarge(c) => Some(&mut c.image),
            Self::ImageBullets(c)
            | Self::ImageBulletsBleedLeft(c)
            | Self::ImageBulletsBleedRight(c) => Some(&mut c.image),
            Self::ImageGrid2(c) | Self::ImageGrid4(c) | Self::ImageGrid6(c) => c.images.first_mut(),
            Self::Cover(_)
            | Self::TitleBody(_)
            | Self::Blank
            | Self::TwoColumn(_)
            | Self::Comparison(_)
            | Self::CenteredChart(_)
            | Self::Quote(_)
            | Self::Steps2(_)
            | Self::Steps3(_)
            | Self::Steps5(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#0F172A".to_string(),
            text_color: "#F8FAFC".to_string(),
            accent_color: "#38BDF8".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-scene partial theme; set fields win over the project theme.
pub struct ThemeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Theme {
    pub fn merged(&self, over: Option<&ThemeOverride>) -> Theme {
        let Some(over) = over else {
            return self.clone();
        };
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Theme {
            background_color: pick(&over.background_color, &self.background_color),
            text_color: pick(&over.text_color, &self.text_color),
            accent_color: pick(&over.accent_color, &self.accent_color),
            font_family: pick(&over.font_family, &self.font_family),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One slide of the video.
pub struct Scene {
    pub id: String,
    #[serde(default)]
    pub narration: String,
    /// Authoritative timing unit; all frame math derives from it.
    #[serde(alias = "duration")]
    pub duration_seconds: f64,
    pub layout_content: LayoutContent,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub animation_config: BTreeMap<ElementName, ElementAnimation>,
    #[serde(default, alias = "audioUrl", skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
    #[serde(
        default,
        alias = "recordedAudioUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub recorded_audio_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_override: Option<ThemeOverride>,
}

impl Scene {
    pub fn new(
        id: impl Into<String>,
        narration: impl Into<String>,
        duration_seconds: f64,
        layout_content: LayoutContent,
    ) -> Self {
        Self {
            id: id.into(),
            narration: narration.into(),
            duration_seconds,
            layout_content,
            animation_config: BTreeMap::new(),
            audio_ref: None,
            recorded_audio_ref: None,
            theme_override: None,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout_content.layout()
    }

    pub fn has_narration(&self) -> bool {
        !self.narration.trim().is_empty()
    }

    /// Audio the player mounts for this scene. A user recording beats generated narration.
    pub fn playback_audio(&self) -> Option<&str> {
        self.recorded_audio_ref
            .as_deref()
            .or(self.audio_ref.as_deref())
    }

    /// Animation for `element`, created with defaults on first reference.
    pub fn animation_mut(&mut self, element: ElementName) -> &mut ElementAnimation {
        self.animation_config.entry(element).or_default()
    }

    /// Replaces the animation for `element` wholesale.
    pub fn set_animation(&mut self, element: ElementName, animation: ElementAnimation) {
        self.animation_config.insert(element, animation);
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub video_settings: VideoSettings,
}

impl Project {
    pub fn validate(&self) -> SlideReelResult<()> {
        validate_scene_ids(&self.scenes)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }
}

pub(crate) fn validate_scene_ids(scenes: &[Scene]) -> SlideReelResult<()> {
    let mut seen = HashSet::with_capacity(scenes.len());
    for scene in scenes {
        if scene.id.trim().is_empty() {
            return Err(SlideReelError::validation("scene id must be non-empty"));
        }
        if !seen.insert(scene.id.as_str()) {
            return Err(SlideReelError::validation(format!(
                "duplicate scene id '{}'",
                scene.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
