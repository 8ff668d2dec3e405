use crate::{Error, Result};
use crate::component::ComponentSourceOptions;
use crate::markup::SvgMarkupOptions;
use crate::native::NativeRenderOptions;
use serde::{Deserialize, Serialize};

/// Widest indent step the serializers honor; wider settings are clamped.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Upper bound on the leading spaces of any one output line.
const MAX_INDENT_COLUMNS: usize = 4096;

/// Leading spaces for nesting `level` at `width` spaces per level.
pub(crate) fn indent_columns(level: usize, width: usize) -> usize {
    level
        .saturating_mul(width.min(MAX_INDENT_WIDTH))
        .min(MAX_INDENT_COLUMNS)
}

/// Options for every output target, loadable from JSON. Missing sections keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub component: ComponentSourceOptions,
    pub markup: SvgMarkupOptions,
    pub native: NativeRenderOptions,
}

impl RenderConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects indent widths above [`MAX_INDENT_WIDTH`].
    pub fn validate(&self) -> Result<()> {
        for (section, width) in [
            ("component", self.component.indent_width),
            ("markup", self.markup.indent_width),
        ] {
            if width > MAX_INDENT_WIDTH {
                return Err(Error::InvalidConfig {
                    message: format!(
                        "{section}.indent_width is {width}, at most {MAX_INDENT_WIDTH} is allowed"
                    ),
                });
            }
        }
        Ok(())
    }
}
