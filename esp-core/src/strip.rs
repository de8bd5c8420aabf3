//! Gepufferter LED-Strip
//!
//! Hält die Pixel-Farben im RAM und schickt sie erst bei `show()` an den
//! SmartLedWriter. Die Helligkeit wird nur beim Senden angewendet, gelesen
//! wird immer die gesetzte (unskalierte) Farbe.

use rgb::RGB8;

use crate::color::scale_brightness;
use crate::traits::{DriverError, LedStrip, SmartLedWriter};

pub struct BufferedStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W: SmartLedWriter, const N: usize> BufferedStrip<W, N> {
    /// Erstellt einen Strip mit allen Pixeln auf `#000000`
    ///
    /// Der Buffer wird noch nicht gesendet, dafür `clear()` aufrufen.
    pub fn new(writer: W, brightness: u8) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness,
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Schaltet alle Pixel aus und sendet den Buffer
    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.pixels = [RGB8::default(); N];
        self.show()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: SmartLedWriter, const N: usize> LedStrip for BufferedStrip<W, N> {
    fn len(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<(), DriverError> {
        let pixel = self.pixels.get_mut(index).ok_or(DriverError::WriteFailed)?;
        *pixel = color;
        Ok(())
    }

    fn pixel(&self, index: usize) -> Result<RGB8, DriverError> {
        self.pixels.get(index).copied().ok_or(DriverError::ReadFailed)
    }

    fn show(&mut self) -> Result<(), DriverError> {
        let brightness = self.brightness;
        self.writer.write(
            self.pixels
                .iter()
                .map(move |&color| scale_brightness(color, brightness)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Merkt sich den letzten Frame (max. 4 Pixel)
    #[derive(Default)]
    struct FrameRecorder {
        frame: [RGB8; 4],
        len: usize,
        shows: usize,
    }

    impl SmartLedWriter for FrameRecorder {
        fn write<I: Iterator<Item = RGB8>>(&mut self, pixels: I) -> Result<(), DriverError> {
            self.len = 0;
            for (slot, color) in self.frame.iter_mut().zip(pixels) {
                *slot = color;
                self.len += 1;
            }
            self.shows += 1;
            Ok(())
        }
    }

    #[test]
    fn test_new_strip_is_dark() {
        let strip: BufferedStrip<_, 3> = BufferedStrip::new(FrameRecorder::default(), 255);
        assert_eq!(strip.len(), 3);
        for i in 0..3 {
            assert_eq!(strip.pixel(i), Ok(RGB8::default()));
        }
    }

    #[test]
    fn test_set_pixel_does_not_show() {
        let mut strip: BufferedStrip<_, 3> = BufferedStrip::new(FrameRecorder::default(), 255);
        strip.set_pixel(1, RGB8 { r: 1, g: 2, b: 3 }).unwrap();
        assert_eq!(strip.writer().shows, 0);
        assert_eq!(strip.pixel(1), Ok(RGB8 { r: 1, g: 2, b: 3 }));
    }

    #[test]
    fn test_show_sends_scaled_frame() {
        let mut strip: BufferedStrip<_, 2> = BufferedStrip::new(FrameRecorder::default(), 127);
        strip.set_pixel(0, RGB8 { r: 200, g: 0, b: 0 }).unwrap();
        strip.show().unwrap();

        let writer = strip.writer();
        assert_eq!(writer.shows, 1);
        assert_eq!(writer.len, 2);
        assert_eq!(writer.frame[0], RGB8 { r: 100, g: 0, b: 0 });
        // Gelesen wird die unskalierte Farbe
        assert_eq!(strip.pixel(0), Ok(RGB8 { r: 200, g: 0, b: 0 }));
    }

    #[test]
    fn test_clear_turns_everything_off() {
        let mut strip: BufferedStrip<_, 2> = BufferedStrip::new(FrameRecorder::default(), 255);
        strip.set_pixel(0, RGB8 { r: 9, g: 9, b: 9 }).unwrap();
        strip.clear().unwrap();
        assert_eq!(strip.pixel(0), Ok(RGB8::default()));
        assert_eq!(strip.writer().frame[0], RGB8::default());
        assert_eq!(strip.writer().shows, 1);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut strip: BufferedStrip<_, 2> = BufferedStrip::new(FrameRecorder::default(), 255);
        assert_eq!(
            strip.set_pixel(2, RGB8::default()),
            Err(DriverError::WriteFailed)
        );
        assert_eq!(strip.pixel(5), Err(DriverError::ReadFailed));
    }
}
