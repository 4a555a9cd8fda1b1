use rayon::prelude::*;
use thiserror::Error;

use crate::core::data::colour::Colour;

const BYTES_PER_PIXEL: usize = 3;

fn canvas_to_buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("pixel at x:{x}, y:{y} outside of {width}x{height} canvas")]
    PixelOutsideBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// RGB backing store of a subwindow, 3 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Colour) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }

        let mut canvas = Self {
            width,
            height,
            buffer: vec![0; canvas_to_buffer_size(width, height)],
        };
        canvas.fill(background);

        Ok(canvas)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Paints every pixel, one row per rayon task.
    pub fn fill(&mut self, colour: Colour) {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;

        self.buffer.par_chunks_mut(row_bytes).for_each(|row| {
            for pixel in row.chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel[0] = colour.r;
                pixel[1] = colour.g;
                pixel[2] = colour.b;
            }
        });
    }

    fn index_of(&self, x: i32, y: i32) -> Result<usize, CanvasError> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(CanvasError::PixelOutsideBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Result<Colour, CanvasError> {
        let index = self.index_of(x, y)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Colour) -> Result<(), CanvasError> {
        let index = self.index_of(x, y)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }
}
