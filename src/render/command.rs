//! Draw commands handed to the external rendering surface.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pose::{Coord, Pixel};

/// One primitive to paint, in surface pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Point { x: f64, y: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { x: f64, y: f64, text: String },
}

impl DrawCommand {
    pub fn point(at: Coord<Pixel>) -> Self {
        DrawCommand::Point { x: at.x, y: at.y }
    }

    pub fn line(from: Coord<Pixel>, to: Coord<Pixel>) -> Self {
        DrawCommand::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        }
    }

    pub fn text(at: Coord<Pixel>, text: impl Into<String>) -> Self {
        DrawCommand::Text {
            x: at.x,
            y: at.y,
            text: text.into(),
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Point { x, y } => write!(f, "point ({:.1}, {:.1})", x, y),
            DrawCommand::Line { x1, y1, x2, y2 } => {
                write!(f, "line  ({:.1}, {:.1}) -> ({:.1}, {:.1})", x1, y1, x2, y2)
            }
            DrawCommand::Text { x, y, text } => write!(f, "text  ({:.1}, {:.1}) {:?}", x, y, text),
        }
    }
}
