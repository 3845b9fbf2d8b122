#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOptions {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 1.5,
            step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomStyle {
    pub transform: String,
    pub transform_origin: &'static str,
}

/// Zoom level for the rendered grid, kept on one decimal place.
#[derive(Debug, Clone)]
pub struct ZoomController {
    options: ZoomOptions,
    level: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomOptions::default())
    }
}

impl ZoomController {
    pub fn new(options: ZoomOptions) -> Self {
        Self {
            options,
            level: 1.0,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.level = round_tenth(self.level + self.options.step).min(self.options.max);
        self.level
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.level = round_tenth(self.level - self.options.step).max(self.options.min);
        self.level
    }

    pub fn set_zoom(&mut self, level: f64) -> f64 {
        let clamped = level.min(self.options.max).max(self.options.min);
        self.level = round_tenth(clamped);
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 1.0;
    }

    pub fn style(&self) -> ZoomStyle {
        ZoomStyle {
            transform: format!("scale({})", self.level),
            transform_origin: "top left",
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
