//! Slider windows adjusting the visibility of layers or object types

use crate::error::ApplyError;
use crate::frame::WindowFrame;
use crate::window::{PersistableWindow, SubWindow};

pub const MAX_SLIDER_VALUE: u32 = 100;

/// Visibility levels held by the graphics context, each between 0.0 and 1.0.
pub trait VisibilitySource: Send {
    fn count(&self) -> usize;

    fn label(&self, index: usize) -> String;

    fn level(&self, index: usize) -> f64;

    fn set_level(&mut self, index: usize, level: f64);
}

pub struct VisibilityWindow<S: VisibilitySource> {
    kind: &'static str,
    frame: WindowFrame,
    source: S,
    sliders: Vec<u32>,
}

impl<S: VisibilitySource> VisibilityWindow<S> {
    pub fn new(kind: &'static str, title: impl Into<String>, source: S) -> Self {
        let mut window = Self {
            kind,
            frame: WindowFrame::new(title),
            source,
            sliders: Vec::new(),
        };
        window.refresh();
        window
    }

    pub fn slider(&self, index: usize) -> Option<u32> {
        self.sliders.get(index).copied()
    }

    pub fn sliders(&self) -> &[u32] {
        &self.sliders
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.source.count())
            .map(|index| self.source.label(index))
            .collect()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Moves a slider to show `level` without writing it back.
    pub fn set_slider_value(&mut self, index: usize, level: f64) -> Result<(), ApplyError> {
        let count = self.sliders.len();
        let slider = self
            .sliders
            .get_mut(index)
            .ok_or(ApplyError::NoSuchSlider { index, count })?;
        *slider = to_slider(level);
        Ok(())
    }

    /// A slider was moved by the user: store the new level in the source.
    pub fn slider_changed(&mut self, index: usize, value: u32) -> Result<(), ApplyError> {
        let value = value.min(MAX_SLIDER_VALUE);
        self.set_slider_value(index, f64::from(value) / f64::from(MAX_SLIDER_VALUE))?;
        self.source
            .set_level(index, f64::from(value) / f64::from(MAX_SLIDER_VALUE));
        Ok(())
    }

    pub fn set_all_minimum(&mut self) {
        self.set_all(0.0);
    }

    pub fn set_all_maximum(&mut self) {
        self.set_all(1.0);
    }

    fn set_all(&mut self, level: f64) {
        for index in 0..self.sliders.len() {
            self.sliders[index] = to_slider(level);
            self.source.set_level(index, level);
        }
    }
}

fn to_slider(level: f64) -> u32 {
    (level.clamp(0.0, 1.0) * f64::from(MAX_SLIDER_VALUE)).round() as u32
}

impl<S: VisibilitySource> SubWindow for VisibilityWindow<S> {
    fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WindowFrame {
        &mut self.frame
    }
}

impl<S: VisibilitySource> PersistableWindow for VisibilityWindow<S> {
    fn kind(&self) -> &'static str {
        self.kind
    }

    /// Slider positions follow the graphics context, so they are re-read rather
    /// than persisted.
    fn refresh(&mut self) {
        self.sliders = (0..self.source.count())
            .map(|index| to_slider(self.source.level(index)))
            .collect();
    }
}
