use crate::foundation::core::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Px,
    Percent,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// 2D transform in the renderer's coordinate space. Translation is in `unit`.
pub struct Transform {
    pub translate: Vec2,
    pub unit: LengthUnit,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl Transform {
    pub fn translate_px(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            unit: LengthUnit::Px,
            scale: 1.0,
            rotate_deg: 0.0,
        }
    }

    pub fn translate_percent(x: f64, y: f64) -> Self {
        Self {
            unit: LengthUnit::Percent,
            ..Self::translate_px(x, y)
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::translate_px(0.0, 0.0)
        }
    }

    pub fn rotate(deg: f64) -> Self {
        Self {
            rotate_deg: deg,
            ..Self::translate_px(0.0, 0.0)
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translate == Vec2::ZERO && self.scale == 1.0 && self.rotate_deg == 0.0
    }

    /// Linear blend toward the identity transform; `t` in `[0, 1]`.
    pub fn toward_identity(&self, t: f64) -> Self {
        let k = 1.0 - t;
        Self {
            translate: self.translate * k,
            unit: self.unit,
            scale: self.scale + (1.0 - self.scale) * t,
            rotate_deg: self.rotate_deg * k,
        }
    }

    /// CSS `transform` value, omitting identity components.
    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if self.translate != Vec2::ZERO {
            let u = self.unit.suffix();
            parts.push(format!(
                "translate({}{u}, {}{u})",
                fmt_num(self.translate.x),
                fmt_num(self.translate.y)
            ));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({})", fmt_num(self.scale)));
        }
        if self.rotate_deg != 0.0 {
            parts.push(format!("rotate({}deg)", fmt_num(self.rotate_deg)));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }
}

fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { r.to_string() }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Instantaneous opacity and transform for a scene container or a content element.
pub struct VisualStyle {
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VisualStyle {
    pub const IDENTITY: VisualStyle = VisualStyle {
        opacity: 1.0,
        transform: None,
    };

    pub fn hidden(transform: Option<Transform>) -> Self {
        Self {
            opacity: 0.0,
            transform,
        }
    }

    /// Blend from `self` toward [`VisualStyle::IDENTITY`]; identity transforms collapse to `None`.
    pub fn toward_identity(&self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let transform = self
            .transform
            .map(|tr| tr.toward_identity(t))
            .filter(|tr| !tr.is_identity());
        Self {
            opacity: self.opacity + (1.0 - self.opacity) * t,
            transform,
        }
    }
}
