//! The narrow seams between the simulation and the outside world.

use crate::entities::{Rect, Rgb, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Quit,
}

/// A source of discrete input events, polled once per tick.
pub trait InputSource {
    /// Every event that arrived since the previous poll, in arrival order.
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Draw calls issued once per tick, in every phase.
pub trait Renderer {
    type Error;

    fn clear(&mut self, color: Rgb) -> Result<(), Self::Error>;
    fn draw_entity(&mut self, rect: &Rect, sprite: Sprite) -> Result<(), Self::Error>;
    /// `position` is the top-left corner of the text, in world units.
    fn draw_text(&mut self, text: &str, position: (f32, f32), color: Rgb)
        -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}
