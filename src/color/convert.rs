//! Color-depth conversions between truecolor, the 256 palette and the 16
//! basic ANSI colors.

/// xterm default RGB values for the 16 basic colors.
const BASIC_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Channel levels of the 6x6x6 color cube (palette 16..=231).
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = x as i32 - y as i32;
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn nearest_cube_level(v: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (**level as i32 - v as i32).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Nearest 256-palette index for an RGB color, considering both the color
/// cube and the grayscale ramp.
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (
        nearest_cube_level(r),
        nearest_cube_level(g),
        nearest_cube_level(b),
    );
    let cube_index = 16 + 36 * ri + 6 * gi + bi;
    let cube_rgb = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);

    let avg = (r as i32 + g as i32 + b as i32) / 3;
    let gray_step = ((avg - 8 + 5) / 10).clamp(0, 23);
    let gray_value = (8 + 10 * gray_step) as u8;
    let gray_index = 232 + gray_step as usize;

    let target = (r, g, b);
    if distance(target, (gray_value, gray_value, gray_value)) < distance(target, cube_rgb) {
        gray_index as u8
    } else {
        cube_index as u8
    }
}

/// RGB value of a 256-palette index.
pub fn palette_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => BASIC_RGB[n as usize],
        16..=231 => {
            let i = (n - 16) as usize;
            (CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6])
        }
        _ => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

/// Nearest basic SGR code (30-37, 90-97, or the +10 background variants).
pub fn rgb_to_basic(r: u8, g: u8, b: u8, background: bool) -> u8 {
    let index = BASIC_RGB
        .iter()
        .enumerate()
        .min_by_key(|(_, rgb)| distance((r, g, b), **rgb))
        .map(|(i, _)| i as u8)
        .unwrap_or(7);
    let fg = if index < 8 { 30 + index } else { 90 + index - 8 };
    if background {
        fg + 10
    } else {
        fg
    }
}
