use std::fmt;
use std::path::Path;
use std::time::Duration;

use dropcursor_config::{Config, ConfigError};

use crate::lifecycle::Timeouts;
use crate::overlay::CursorStyle;
use crate::EditorView;

/// Decides per view whether dragged content should be fitted to the
/// document structure before showing the cursor.
pub type DropPointPredicate = Box<dyn Fn(&dyn EditorView) -> bool>;

pub struct DropCursorOptions {
    /// Cursor colour; `None` relies on `class` alone. Defaults to black.
    pub color: Option<String>,
    /// Cursor thickness in pixels. Defaults to 1.
    pub width: f64,
    pub class: Option<String>,
    /// Class applied while the cursor is hidden mid-drag.
    pub inactive_class: Option<String>,
    /// Defaults to always computing the drop point.
    pub should_compute_drop_point: Option<DropPointPredicate>,
    pub timeouts: Timeouts,
}

impl Default for DropCursorOptions {
    fn default() -> Self {
        Self {
            color: Some("black".to_string()),
            width: 1.0,
            class: None,
            inactive_class: None,
            should_compute_drop_point: None,
            timeouts: Timeouts::default(),
        }
    }
}

impl fmt::Debug for DropCursorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropCursorOptions")
            .field("color", &self.color)
            .field("width", &self.width)
            .field("class", &self.class)
            .field("inactive_class", &self.inactive_class)
            .field(
                "should_compute_drop_point",
                &self.should_compute_drop_point.as_ref().map(|_| ".."),
            )
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl DropCursorOptions {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn without_color(mut self) -> Self {
        self.color = None;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_inactive_class(mut self, class: impl Into<String>) -> Self {
        self.inactive_class = Some(class.into());
        self
    }

    pub fn with_drop_point_predicate(
        mut self,
        predicate: impl Fn(&dyn EditorView) -> bool + 'static,
    ) -> Self {
        self.should_compute_drop_point = Some(Box::new(predicate));
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Options from the user's config file, or the defaults when there is
    /// none.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Config::load()?.map_or_else(Self::default, |config| Self::from(&config)))
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config = Config::load_from_path(config_path)?;
        Ok(config.map_or_else(Self::default, |config| Self::from(&config)))
    }

    pub fn should_compute_drop_point(&self, view: &dyn EditorView) -> bool {
        self.should_compute_drop_point
            .as_ref()
            .is_none_or(|predicate| predicate(view))
    }

    pub fn style(&self) -> CursorStyle {
        CursorStyle {
            color: self.color.clone(),
            class: self.class.clone(),
            inactive_class: self.inactive_class.clone(),
        }
    }
}

impl From<&Config> for DropCursorOptions {
    fn from(config: &Config) -> Self {
        let mut options = Self {
            color: config.color().map(str::to_string),
            width: config.width,
            class: config.class.clone(),
            inactive_class: config.inactive_class.clone(),
            should_compute_drop_point: None,
            timeouts: Timeouts {
                idle: Duration::from_millis(config.idle_timeout_ms),
                drop: Duration::from_millis(config.drop_timeout_ms),
            },
        };
        if !config.compute_drop_point {
            options = options.with_drop_point_predicate(|_| false);
        }
        options
    }
}
