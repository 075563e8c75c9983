/// Twips per pixel. Flash measures everything in twentieths of a pixel.
pub const TWIPS_PER_PIXEL: f32 = 20.0;

/// A point or direction in two dimensions.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32
}

impl Point {
    /// Makes a point out of its two coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Point { x: x, y: y }
    }
}

/// Converts a value from twips to pixels.
pub fn twips_to_pixels(twips: f32) -> f32 {
    twips * (1.0 / TWIPS_PER_PIXEL)
}

/// Converts a value from pixels to twips.
pub fn pixels_to_twips(pixels: f32) -> f32 {
    pixels * TWIPS_PER_PIXEL
}

/// Converts both coordinates of a point from twips to pixels, in place.
pub fn point_twips_to_pixels(point: &mut Point) {
    point.x = twips_to_pixels(point.x);
    point.y = twips_to_pixels(point.y);
}

/// Converts both coordinates of a point from pixels to twips, in place.
pub fn point_pixels_to_twips(point: &mut Point) {
    point.x = pixels_to_twips(point.x);
    point.y = pixels_to_twips(point.y);
}

/// Picks a power of two texture dimension for an image dimension.
///
/// The size is rounded up to the next power of two, unless that would
/// stretch the image by more than 5/3, in which case the next lower power
/// of two is used instead.
///
/// # Examples
///
/// ```rust
/// use swf_primitives::texture_size_power2;
/// assert_eq!(texture_size_power2(400), 512);
/// assert_eq!(texture_size_power2(300), 256);
/// ```
pub fn texture_size_power2(size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let mut result = size.checked_next_power_of_two().unwrap_or(1 << 31);
    // Widened so the 3/5 test can't overflow for large sizes
    if (size as u64) * 5 < (result as u64) * 3 {
        result >>= 1;
    }
    result
}
