use error::Error;
use matrix::Matrix23;
use stream::SwfRead;
use units::{pixels_to_twips, twips_to_pixels, Point};

/// An axis aligned rectangle, in twips when it comes out of a SWF.
///
/// Nothing forces `left <= right` or `top <= bottom`. A rectangle decoded
/// from a broken file can come out inverted, and the intersection and
/// transform functions will then give meaningless answers.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    /// Smallest x.
    pub left: f32,
    /// Smallest y.
    pub top: f32,
    /// Largest x.
    pub right: f32,
    /// Largest y.
    pub bottom: f32
}

impl Rect {
    /// Makes a rectangle out of its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect { left: left, top: top, right: right, bottom: bottom }
    }

    /// A zero sized rectangle sitting on a point.
    pub fn from_point(point: Point) -> Self {
        Rect::new(point.x, point.y, point.x, point.y)
    }

    /// Reads a RECT record.
    ///
    /// After byte aligning, a 5 bit field count is followed by XMin, XMax,
    /// YMin and YMax, each a signed field of that many bits.
    pub fn read<S: SwfRead>(stream: &mut S) -> Result<Self, Error> {
        stream.byte_align();
        let bit_count = stream.get_word(5)?;
        let x_min = stream.get_int(bit_count)?;
        let x_max = stream.get_int(bit_count)?;
        let y_min = stream.get_int(bit_count)?;
        let y_max = stream.get_int(bit_count)?;
        let rect = Rect::new(x_min as f32, y_min as f32, x_max as f32, y_max as f32);
        trace!("Read {:?}", rect);
        Ok(rect)
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Grows the rectangle just enough to hold `point`.
    pub fn expand(&mut self, point: Point) {
        if point.x < self.left {
            self.left = point.x;
        }
        if point.x > self.right {
            self.right = point.x;
        }
        if point.y < self.top {
            self.top = point.y;
        }
        if point.y > self.bottom {
            self.bottom = point.y;
        }
    }

    /// Tests if two rectangles overlap. Rectangles that only share an edge
    /// or a corner count as overlapping.
    pub fn is_intersecting(&self, other: &Rect) -> bool {
        !(self.right < other.left ||
            self.left > other.right ||
            self.top > other.bottom ||
            self.bottom < other.top)
    }

    /// Sets this rectangle to the bounds of `input` after it went through
    /// `matrix`.
    ///
    /// `input` is taken by value so a rectangle can be transformed in place
    /// with `rect.set_rect(&matrix, rect)`.
    pub fn set_rect(&mut self, matrix: &Matrix23, input: Rect) {
        let top_left = matrix.transform_xy(input.left, input.top);
        let top_right = matrix.transform_xy(input.right, input.top);
        let bottom_right = matrix.transform_xy(input.right, input.bottom);
        let bottom_left = matrix.transform_xy(input.left, input.bottom);

        *self = Rect::from_point(top_left);
        self.expand(top_right);
        self.expand(bottom_right);
        self.expand(bottom_left);
    }

    /// Converts all four edges from twips to pixels.
    pub fn twips_to_pixels(&mut self) {
        self.left = twips_to_pixels(self.left);
        self.top = twips_to_pixels(self.top);
        self.right = twips_to_pixels(self.right);
        self.bottom = twips_to_pixels(self.bottom);
    }

    /// Converts all four edges from pixels to twips.
    pub fn pixels_to_twips(&mut self) {
        self.left = pixels_to_twips(self.left);
        self.top = pixels_to_twips(self.top);
        self.right = pixels_to_twips(self.right);
        self.bottom = pixels_to_twips(self.bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use stream::Stream;

    #[test]
    fn reads_fields_in_wire_order() {
        // nbits = 8, then 0x05, 0x50, 0x0A, 0x64 packed behind the 5 bit count
        let data = [0x40, 0x2A, 0x80, 0x53, 0x20];
        let mut stream = Stream::from_slice(&data);
        let rect = Rect::read(&mut stream).unwrap();
        assert_eq!(rect, Rect::new(5.0, 10.0, 80.0, 100.0));
        assert_eq!(stream.position(), 5);
    }

    #[test]
    fn reads_negative_edges() {
        // nbits = 4: -2, 3, -1, 7
        let data = [0x27, 0x1F, 0xB8];
        let mut stream = Stream::from_slice(&data);
        let rect = Rect::read(&mut stream).unwrap();
        assert_eq!(rect, Rect::new(-2.0, -1.0, 3.0, 7.0));
    }

    #[test]
    fn empty_record() {
        let data = [0x00];
        let mut stream = Stream::from_slice(&data);
        assert_eq!(Rect::read(&mut stream).unwrap(), Rect::default());
    }

    #[test]
    fn swf_header_frame_size() {
        // 550x400 pixel stage: nbits = 15, 0, 11000, 0, 8000
        let data = [0x78, 0x00, 0x05, 0x5F, 0x00, 0x00, 0x0F, 0xA0, 0x00];
        let mut stream = Stream::from_slice(&data);
        let rect = Rect::read(&mut stream).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 11000.0, 8000.0));
        assert_eq!(rect.width(), 11000.0);
        assert_eq!(rect.height(), 8000.0);
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(a.is_intersecting(&b));
        assert!(b.is_intersecting(&a));

        let corner = Rect::new(10.0, 10.0, 12.0, 12.0);
        assert!(a.is_intersecting(&corner));
    }

    #[test]
    fn separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.is_intersecting(&Rect::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!a.is_intersecting(&Rect::new(-5.0, 0.0, -0.5, 10.0)));
        assert!(!a.is_intersecting(&Rect::new(0.0, 11.0, 10.0, 20.0)));
        assert!(!a.is_intersecting(&Rect::new(0.0, -9.0, 10.0, -1.0)));
        assert!(a.is_intersecting(&Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn expand_grows_to_fit() {
        let mut rect = Rect::from_point(Point::new(1.0, 1.0));
        rect.expand(Point::new(-1.0, 4.0));
        rect.expand(Point::new(0.0, 0.0));
        assert_eq!(rect, Rect::new(-1.0, 0.0, 1.0, 4.0));
    }

    #[test]
    fn set_rect_bounds_a_scaled_translated_rect() {
        let mut matrix = Matrix23::default();
        matrix.scale_x = 2.0;
        matrix.scale_y = -1.0;
        matrix.translate_x = 5.0;
        let mut rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        rect.set_rect(&matrix, rect);
        assert_eq!(rect, Rect::new(5.0, -20.0, 25.0, 0.0));
    }

    #[test]
    fn unit_conversion() {
        let mut rect = Rect::new(0.0, 20.0, 11000.0, 8000.0);
        rect.twips_to_pixels();
        assert_eq!(rect, Rect::new(0.0, 1.0, 550.0, 400.0));
        rect.pixels_to_twips();
        assert_eq!(rect, Rect::new(0.0, 20.0, 11000.0, 8000.0));
    }

    #[test]
    fn truncated_record_is_eof() {
        // nbits = 15 announces 8 more bytes, only 2 follow
        let data = [0x78, 0x00, 0x05];
        let mut stream = Stream::from_slice(&data);
        match Rect::read(&mut stream) {
            Err(Error::IoError(ref err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected eof, got {:?}", other)
        }
    }
}
