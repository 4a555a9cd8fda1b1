//! Pixel format conversion helpers for presentation backends.

use crate::core::data::canvas::Canvas;

/// Copies `canvas` (RGB) into an RGBA `frame` of `frame_width` x
/// `frame_height` pixels, setting alpha to 255.
///
/// Only the overlapping region is written; frame pixels outside the canvas
/// keep their contents. Sizes may differ while a resize is in flight.
///
/// # Panics
/// Panics if `frame.len()` is not `frame_width * frame_height * 4`.
pub fn blit_canvas_to_rgba(canvas: &Canvas, frame: &mut [u8], frame_width: u32, frame_height: u32) {
    let expected_len = frame_width as usize * frame_height as usize * 4;
    assert_eq!(
        frame.len(),
        expected_len,
        "frame length {} does not match expected {} for {}x{}",
        frame.len(),
        expected_len,
        frame_width,
        frame_height
    );

    let copy_width = canvas.width().min(frame_width) as usize;
    let copy_height = canvas.height().min(frame_height) as usize;
    let src_stride = canvas.width() as usize * 3;
    let dst_stride = frame_width as usize * 4;

    for row in 0..copy_height {
        let src_row = &canvas.buffer()[row * src_stride..][..copy_width * 3];
        let dst_row = &mut frame[row * dst_stride..][..copy_width * 4];

        for (src_pixel, dst_pixel) in src_row.chunks_exact(3).zip(dst_row.chunks_exact_mut(4)) {
            dst_pixel[0] = src_pixel[0];
            dst_pixel[1] = src_pixel[1];
            dst_pixel[2] = src_pixel[2];
            dst_pixel[3] = 255;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    #[test]
    fn test_blit_same_size() {
        let mut canvas = Canvas::new(2, 1, Colour::RED).unwrap();
        canvas.set_pixel(1, 0, Colour::rgb(10, 20, 30)).unwrap();
        let mut frame = vec![0; 2 * 4];

        blit_canvas_to_rgba(&canvas, &mut frame, 2, 1);

        assert_eq!(frame, vec![255, 0, 0, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn test_blit_into_larger_frame_leaves_margin() {
        let canvas = Canvas::new(1, 1, Colour::WHITE).unwrap();
        let mut frame = vec![7; 2 * 2 * 4];

        blit_canvas_to_rgba(&canvas, &mut frame, 2, 2);

        assert_eq!(&frame[0..4], &[255, 255, 255, 255]);
        assert!(frame[4..].iter().all(|&b| b == 7));
    }

    #[test]
    fn test_blit_into_smaller_frame_crops() {
        let mut canvas = Canvas::new(3, 3, Colour::BLACK).unwrap();
        canvas.set_pixel(1, 1, Colour::GREEN).unwrap();
        let mut frame = vec![0; 2 * 2 * 4];

        blit_canvas_to_rgba(&canvas, &mut frame, 2, 2);

        // pixel (1,1) lands at offset (1 * 2 + 1) * 4
        assert_eq!(&frame[12..16], &[0, 255, 0, 255]);
    }

    #[test]
    #[should_panic(expected = "does not match expected")]
    fn test_blit_rejects_wrong_frame_length() {
        let canvas = Canvas::new(1, 1, Colour::WHITE).unwrap();
        let mut frame = vec![0; 3];

        blit_canvas_to_rgba(&canvas, &mut frame, 1, 1);
    }
}
