use std::collections::BTreeMap;

use crate::{
    animation::style::VisualStyle,
    scene::model::{
        ChartKind, ChartSeries, ColumnsContent, ElementName, GridContent, ImageBulletsContent,
        ImageSlot, ImageTextContent, Layout, LayoutContent, QuoteContent, StepsContent,
        TextFields, Theme,
    },
};

/// Aspect ratio of the boxed (non-bleed) image frame.
pub const BOXED_ASPECT_RATIO: f64 = 16.0 / 9.0;
/// Corner radius of the boxed image frame, in pixels.
pub const BOXED_CORNER_RADIUS_PX: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// How the renderer arranges the root's children.
pub enum Arrangement {
    Centered,
    Stack,
    Split { image_side: Side },
    Columns,
    Row,
    Grid { columns: u32 },
    FullBleed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    Title,
    Subtitle,
    Body,
    Heading,
    Quote,
    Attribution,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "fit", rename_all = "camelCase")]
pub enum ImageFit {
    /// No container padding; the image fills its box edge-to-edge.
    Bleed,
    #[serde(rename_all = "camelCase")]
    Boxed {
        aspect_ratio: f64,
        corner_radius: f64,
    },
}

impl ImageFit {
    pub fn boxed() -> Self {
        Self::Boxed {
            aspect_ratio: BOXED_ASPECT_RATIO,
            corner_radius: BOXED_CORNER_RADIUS_PX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum RenderNode {
    Text {
        role: TextRole,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
    Bullets {
        items: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
    /// `src` is `None` when the slot is still a placeholder.
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        fit: ImageFit,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
    Column {
        #[serde(skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
    Chart {
        kind: ChartKind,
        labels: Vec<String>,
        series: Vec<ChartSeries>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
    Step {
        number: usize,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<VisualStyle>,
    },
}

impl RenderNode {
    pub fn style(&self) -> Option<&VisualStyle> {
        match self {
            Self::Text { style, .. }
            | Self::Bullets { style, .. }
            | Self::Image { style, .. }
            | Self::Column { style, .. }
            | Self::Chart { style, .. }
            | Self::Step { style, .. } => style.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Concrete visual tree for one scene at one frame.
pub struct RenderTree {
    pub layout: Layout,
    pub theme: Theme,
    pub arrangement: Arrangement,
    pub children: Vec<RenderNode>,
}

impl RenderTree {
    pub fn images(&self) -> impl Iterator<Item = &RenderNode> {
        self.children
            .iter()
            .filter(|n| matches!(n, RenderNode::Image { .. }))
    }
}

struct Builder<'a> {
    styles: &'a BTreeMap<ElementName, VisualStyle>,
    children: Vec<RenderNode>,
}

impl Builder<'_> {
    fn style(&self, element: ElementName) -> Option<VisualStyle> {
        self.styles.get(&element).copied()
    }

    fn text(&mut self, role: TextRole, text: Option<&String>, element: ElementName) {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            let style = self.style(element);
            self.children.push(RenderNode::Text {
                role,
                text: text.clone(),
                style,
            });
        }
    }

    fn headline(&mut self, fields: &TextFields) {
        if fields.title_visible() {
            self.text(TextRole::Title, fields.title.as_ref(), ElementName::Title);
        }
        if fields.subtitle_visible() {
            self.text(
                TextRole::Subtitle,
                fields.subtitle.as_ref(),
                ElementName::Subtitle,
            );
        }
    }

    fn body(&mut self, fields: &TextFields) {
        if fields.body_visible() {
            self.text(TextRole::Body, fields.body.as_ref(), ElementName::Body);
        }
    }

    fn all_text(&mut self, fields: &TextFields) {
        self.headline(fields);
        self.body(fields);
    }

    fn image(&mut self, slot: &ImageSlot, fit: ImageFit) {
        let style = self.style(ElementName::Image);
        self.children.push(RenderNode::Image {
            src: slot.url.clone().filter(|u| !u.is_empty()),
            alt: slot.alt.clone(),
            fit,
            style,
        });
    }

    fn bullets(&mut self, items: &[String]) {
        if !items.is_empty() {
            let style = self.style(ElementName::BulletPoints);
            self.children.push(RenderNode::Bullets {
                items: items.to_vec(),
                style,
            });
        }
    }

    fn image_text(&mut self, layout: Layout, c: &ImageTextContent) {
        self.all_text(&c.text);
        self.image(&c.image, image_fit(layout, c.image_bleed));
    }

    fn image_bullets(&mut self, layout: Layout, c: &ImageBulletsContent) {
        self.all_text(&c.text);
        self.bullets(&c.bullet_points);
        self.image(&c.image, image_fit(layout, c.image_bleed));
    }

    fn columns(&mut self, c: &ColumnsContent) {
        self.all_text(&c.text);
        if c.show_left_column.unwrap_or(true) {
            let style = self.style(ElementName::LeftColumn);
            self.children.push(RenderNode::Column {
                heading: c.left_heading.clone(),
                body: c.left_column.clone(),
                style,
            });
        }
        if c.show_right_column.unwrap_or(true) {
            let style = self.style(ElementName::RightColumn);
            self.children.push(RenderNode::Column {
                heading: c.right_heading.clone(),
                body: c.right_column.clone(),
                style,
            });
        }
    }

    fn quote(&mut self, c: &QuoteContent) {
        self.text(TextRole::Quote, c.quote.as_ref(), ElementName::Body);
        self.text(
            TextRole::Attribution,
            c.attribution.as_ref(),
            ElementName::Subtitle,
        );
    }

    fn steps(&mut self, c: &StepsContent, count: usize) {
        self.headline(&c.text);
        let style = self.style(ElementName::Body);
        self.children
            .extend(c.steps.iter().take(count).enumerate().map(|(i, step)| {
                RenderNode::Step {
                    number: i + 1,
                    title: step.title.clone(),
                    body: step.body.clone(),
                    style,
                }
            }));
    }

    fn grid(&mut self, c: &GridContent, cells: usize) {
        self.headline(&c.text);
        let empty = ImageSlot::default();
        for i in 0..cells {
            self.image(c.images.get(i).unwrap_or(&empty), ImageFit::boxed());
        }
    }
}

/// Bleed when the layout always bleeds or the content asks for it explicitly.
pub fn image_fit(layout: Layout, image_bleed: Option<bool>) -> ImageFit {
    if layout.is_bleed() || image_bleed == Some(true) {
        ImageFit::Bleed
    } else {
        ImageFit::boxed()
    }
}

fn grid_columns(cells: usize) -> u32 {
    if cells <= 4 { 2 } else { 3 }
}

/// Maps a scene's content plus its element styles onto a [`RenderTree`].
///
/// Unset `show*` flags mean visible. Absent text fields are skipped; absent image
/// references render as placeholders so the layout keeps its shape.
pub fn render_layout(
    content: &LayoutContent,
    styles: &BTreeMap<ElementName, VisualStyle>,
    theme: &Theme,
) -> RenderTree {
    let layout = content.layout();
    let mut b = Builder {
        styles,
        children: Vec::new(),
    };
    let arrangement = match content {
        LayoutContent::Cover(t) => {
            b.all_text(t);
            Arrangement::Centered
        }
        LayoutContent::TitleBody(t) => {
            b.all_text(t);
            Arrangement::Stack
        }
        LayoutContent::Blank => Arrangement::Centered,
        LayoutContent::ImageLeft(c) => {
            b.image_text(layout, c);
            Arrangement::Split {
                image_side: Side::Left,
            }
        }
        LayoutContent::ImageRight(c) => {
            b.image_text(layout, c);
            Arrangement::Split {
                image_side: Side::Right,
            }
        }
        LayoutContent::FullImage(c) => {
            b.image_text(layout, c);
            Arrangement::FullBleed
        }
        LayoutContent::CenteredImageMedium(c) | LayoutContent::CenteredImageLarge(c) => {
            b.image_text(layout, c);
            Arrangement::Centered
        }
        LayoutContent::ImageBullets(c) => {
            b.image_bullets(layout, c);
            Arrangement::Split {
                image_side: Side::Right,
            }
        }
        LayoutContent::ImageBulletsBleedLeft(c) => {
            b.image_bullets(layout, c);
            Arrangement::Split {
                image_side: Side::Left,
            }
        }
        LayoutContent::ImageBulletsBleedRight(c) => {
            b.image_bullets(layout, c);
            Arrangement::Split {
                image_side: Side::Right,
            }
        }
        LayoutContent::TwoColumn(c) | LayoutContent::Comparison(c) => {
            b.columns(c);
            Arrangement::Columns
        }
        LayoutContent::CenteredChart(c) => {
            b.all_text(&c.text);
            let style = b.style(ElementName::Image);
            b.children.push(RenderNode::Chart {
                kind: c.chart_type,
                labels: c.labels.clone(),
                series: c.series.clone(),
                style,
            });
            Arrangement::Centered
        }
        LayoutContent::Quote(c) => {
            b.quote(c);
            Arrangement::Centered
        }
        LayoutContent::Steps2(c) | LayoutContent::Steps3(c) | LayoutContent::Steps5(c) => {
            b.steps(c, layout.step_count().unwrap_or(c.steps.len()));
            Arrangement::Row
        }
        LayoutContent::ImageGrid2(c) | LayoutContent::ImageGrid4(c) | LayoutContent::ImageGrid6(c) => {
            let cells = layout.grid_cells().unwrap_or(c.images.len());
            b.grid(c, cells);
            Arrangement::Grid {
                columns: grid_columns(cells),
            }
        }
    };
    RenderTree {
        layout,
        theme: theme.clone(),
        arrangement,
        children: b.children,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
