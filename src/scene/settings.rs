#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionStyle {
    #[default]
    FullText,
    WordByWord,
    LineByLine,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Vertical placement of the caption block. Never affects timing.
pub enum CaptionPosition {
    #[default]
    Bottom,
    Top,
    Center,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub style: CaptionStyle,
    #[serde(default)]
    pub position: CaptionPosition,
    #[serde(default = "default_max_lines")]
    pub max_lines: u32,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
}

fn default_max_lines() -> u32 {
    2
}

fn default_highlight_color() -> String {
    "#FACC15".to_string()
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            style: CaptionStyle::default(),
            position: CaptionPosition::default(),
            max_lines: default_max_lines(),
            highlight_color: default_highlight_color(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Inter-scene transition, global for a preview or export session.
pub enum TransitionType {
    #[default]
    Fade,
    Slide,
    Wipe,
    Flip,
    ClockWipe,
    Iris,
    None,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionDirection {
    FromLeft,
    #[default]
    FromRight,
    FromTop,
    FromBottom,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    #[serde(default)]
    pub captions: CaptionSettings,
    #[serde(default)]
    pub transition_type: TransitionType,
    #[serde(default)]
    pub transition_direction: TransitionDirection,
}
