//! Color-band analyzer — resistor band detection and value calculation.
//!
//! Detection counts pixels inside fixed HSV ranges (OpenCV scale, H 0–180)
//! for the 12 canonical band colors, after an edge-density check rejects
//! populated circuit boards. Value calculation maps an ordered 3–4 color
//! sequence through the industry digit/multiplier/tolerance tables and
//! fails closed on any unmapped color.
//!
//! The numeric thresholds here are empirically chosen, not derived; they
//! live on [`DetectionParams`] so hosts can tune them.

use image::DynamicImage;
use imageproc::edges::canny;

/// Tunable detection thresholds. Defaults preserve the values the pipeline
/// was calibrated with.
#[derive(Debug, Clone)]
pub struct DetectionParams {
    /// Edge pixels / total area above which the image is judged a PCB.
    pub edge_density_max: f64,
    /// Minimum pixel count for a color to register at all.
    pub pixel_floor: u32,
    /// Maximum fraction of the image one color may cover (background fill).
    pub area_fraction_max: f64,
    /// More distinct colors than this means the image is too noisy to be a
    /// resistor.
    pub max_colors: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            edge_density_max: 0.15,
            pixel_floor: 100,
            area_fraction_max: 0.4,
            max_colors: 6,
        }
    }
}

/// HSV ranges for the canonical band colors, OpenCV scale.
/// Table order breaks pixel-count ties during sorting.
const COLOR_RANGES: [(&str, [u8; 3], [u8; 3]); 12] = [
    ("black", [0, 0, 0], [180, 255, 40]),
    ("brown", [5, 40, 20], [25, 255, 150]),
    ("red", [0, 70, 50], [10, 255, 255]),
    ("orange", [11, 100, 100], [25, 255, 255]),
    ("yellow", [25, 100, 100], [35, 255, 255]),
    ("green", [35, 50, 50], [85, 255, 255]),
    ("blue", [85, 80, 50], [130, 255, 255]),
    ("violet", [130, 50, 50], [160, 255, 255]),
    ("gray", [0, 0, 50], [180, 40, 200]),
    ("white", [0, 0, 200], [180, 25, 255]),
    ("gold", [20, 100, 100], [30, 255, 255]),
    ("silver", [0, 0, 180], [180, 25, 220]),
];

// Red hue wraps at the top of the HSV circle; checked only when the
// primary red range found nothing.
const RED_WRAP_LO: [u8; 3] = [170, 70, 50];
const RED_WRAP_HI: [u8; 3] = [180, 255, 255];

/// Detect candidate resistor band colors, dominant first, at most four.
///
/// Returns `None` when the image looks like a populated board (high edge
/// density), when more than `max_colors` distinct colors pass the filters,
/// or when nothing registers at all.
pub fn detect_bands(image: &DynamicImage, params: &DetectionParams) -> Option<Vec<String>> {
    let rgb = image.to_rgb8();
    let total_pixels = (rgb.width() as u64 * rgb.height() as u64) as f64;
    if total_pixels == 0.0 {
        return None;
    }

    // PCBs have lots of edges; a lone component on a plain background
    // does not.
    let gray = image.to_luma8();
    let edges = canny(&gray, 50.0, 150.0);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
    let edge_density = edge_pixels as f64 / total_pixels;
    if edge_density > params.edge_density_max {
        log::info!(
            "[COLOR] High edge density ({:.3}) - likely a PCB/module, skipping color detection",
            edge_density
        );
        return None;
    }

    let hsv: Vec<[u8; 3]> = rgb
        .pixels()
        .map(|p| rgb_to_hsv(p.0[0], p.0[1], p.0[2]))
        .collect();

    let mut detected: Vec<(&str, u32)> = Vec::new();
    for (name, lo, hi) in COLOR_RANGES {
        let count = count_in_range(&hsv, lo, hi);
        if count > params.pixel_floor && (count as f64 / total_pixels) < params.area_fraction_max {
            detected.push((name, count));
        }
    }

    if !detected.iter().any(|(name, _)| *name == "red") {
        let count = count_in_range(&hsv, RED_WRAP_LO, RED_WRAP_HI);
        if count > params.pixel_floor && (count as f64 / total_pixels) < params.area_fraction_max {
            detected.push(("red", count));
        }
    }

    // Dominant band first; stable sort keeps table order on ties.
    detected.sort_by(|a, b| b.1.cmp(&a.1));

    if detected.len() > params.max_colors {
        log::info!(
            "[COLOR] Too many colors detected ({}) - not a resistor",
            detected.len()
        );
        return None;
    }
    if detected.is_empty() {
        return None;
    }

    Some(
        detected
            .into_iter()
            .take(4)
            .map(|(name, _)| name.to_string())
            .collect(),
    )
}

fn count_in_range(hsv: &[[u8; 3]], lo: [u8; 3], hi: [u8; 3]) -> u32 {
    hsv.iter()
        .filter(|[h, s, v]| {
            (lo[0]..=hi[0]).contains(h)
                && (lo[1]..=hi[1]).contains(s)
                && (lo[2]..=hi[2]).contains(v)
        })
        .count() as u32
}

/// RGB → HSV in OpenCV scale: H in [0,180), S and V in [0,255].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };
    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        let mut h = 30.0 * (gf - bf) / delta;
        if h < 0.0 {
            h += 180.0;
        }
        h
    } else if max == gf {
        60.0 + 30.0 * (bf - rf) / delta
    } else {
        120.0 + 30.0 * (rf - gf) / delta
    };

    [h.round().min(180.0) as u8, s.round() as u8, v.round() as u8]
}

fn digit(color: &str) -> Option<u32> {
    match color {
        "black" => Some(0),
        "brown" => Some(1),
        "red" => Some(2),
        "orange" => Some(3),
        "yellow" => Some(4),
        "green" => Some(5),
        "blue" => Some(6),
        "violet" => Some(7),
        "gray" | "grey" => Some(8),
        "white" => Some(9),
        _ => None,
    }
}

fn multiplier(color: &str) -> Option<f64> {
    match color {
        "black" => Some(1.0),
        "brown" => Some(10.0),
        "red" => Some(100.0),
        "orange" => Some(1_000.0),
        "yellow" => Some(10_000.0),
        "green" => Some(100_000.0),
        "blue" => Some(1_000_000.0),
        "violet" => Some(10_000_000.0),
        "gold" => Some(0.1),
        "silver" => Some(0.01),
        _ => None,
    }
}

fn tolerance(color: &str) -> Option<&'static str> {
    match color {
        "brown" => Some("1%"),
        "red" => Some("2%"),
        "gold" => Some("5%"),
        "silver" => Some("10%"),
        _ => None,
    }
}

/// Compute a formatted resistance from an ordered color sequence.
///
/// Needs at least three colors: digit, digit, multiplier, then an optional
/// tolerance band. Any unmapped digit or multiplier color fails the whole
/// calculation — no partial values. An unmapped fourth band falls back to
/// the "±20%" tolerance class.
pub fn compute_value(colors: &[String]) -> Option<String> {
    if colors.len() < 3 {
        return None;
    }

    let digit1 = digit(&colors[0].to_lowercase())?;
    let digit2 = digit(&colors[1].to_lowercase())?;
    let multiplier = multiplier(&colors[2].to_lowercase())?;

    let value = (digit1 * 10 + digit2) as f64 * multiplier;

    let mut formatted = if value >= 1_000_000.0 {
        format!("{:.1}MΩ", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}kΩ", value / 1_000.0)
    } else {
        format!("{:.1}Ω", value)
    };

    if let Some(fourth) = colors.get(3) {
        let tolerance = tolerance(&fourth.to_lowercase()).unwrap_or("±20%");
        formatted.push(' ');
        formatted.push_str(tolerance);
    }

    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn colors(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn brown_black_red_is_one_kiloohm() {
        assert_eq!(
            compute_value(&colors(&["brown", "black", "red"])),
            Some("1.0kΩ".to_string())
        );
    }

    #[test]
    fn gold_fourth_band_appends_tolerance() {
        assert_eq!(
            compute_value(&colors(&["brown", "black", "red", "gold"])),
            Some("1.0kΩ 5%".to_string())
        );
    }

    #[test]
    fn unmapped_fourth_band_defaults_to_twenty_percent() {
        assert_eq!(
            compute_value(&colors(&["brown", "black", "red", "pink"])),
            Some("1.0kΩ ±20%".to_string())
        );
    }

    #[test]
    fn fewer_than_three_colors_fails() {
        assert_eq!(compute_value(&colors(&["brown", "black"])), None);
        assert_eq!(compute_value(&[]), None);
    }

    #[test]
    fn unmapped_digit_or_multiplier_fails_closed() {
        // gold is a valid multiplier but not a digit
        assert_eq!(compute_value(&colors(&["gold", "black", "red"])), None);
        // white is a valid digit but not a multiplier
        assert_eq!(compute_value(&colors(&["brown", "black", "white"])), None);
    }

    #[test]
    fn gold_multiplier_scales_down() {
        assert_eq!(
            compute_value(&colors(&["green", "blue", "gold"])),
            Some("5.6Ω".to_string())
        );
    }

    #[test]
    fn megaohm_formatting() {
        assert_eq!(
            compute_value(&colors(&["brown", "black", "green"])),
            Some("1.0MΩ".to_string())
        );
    }

    /// White background with solid stripes, widths chosen so the
    /// dominant-first ordering is deterministic.
    fn stripes(bands: &[(Rgb<u8>, u32)], width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut x0 = 5u32;
        for (color, w) in bands {
            for x in x0..(x0 + w) {
                for y in 10..(height - 10) {
                    img.put_pixel(x, y, *color);
                }
            }
            x0 += w + 5;
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn detects_stripe_colors_dominant_first() {
        // brown (widest), black, red on a white background. The white
        // fill exceeds the area-fraction ceiling, so it never registers.
        let image = stripes(
            &[
                (Rgb([90, 45, 15]), 30),
                (Rgb([0, 0, 0]), 25),
                (Rgb([200, 0, 0]), 20),
            ],
            120,
            90,
        );
        let detected = detect_bands(&image, &DetectionParams::default());
        assert_eq!(
            detected,
            Some(vec![
                "brown".to_string(),
                "black".to_string(),
                "red".to_string()
            ])
        );
    }

    #[test]
    fn uniform_image_detects_nothing() {
        let img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let detected = detect_bands(&DynamicImage::ImageRgb8(img), &DetectionParams::default());
        assert_eq!(detected, None);
    }

    #[test]
    fn busy_checkerboard_is_rejected() {
        // Either the edge-density gate or the background-fraction ceiling
        // rejects it; both paths mean "not a lone resistor".
        let mut img = RgbImage::new(100, 100);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            };
        }
        let detected = detect_bands(&DynamicImage::ImageRgb8(img), &DetectionParams::default());
        assert_eq!(detected, None);
    }

    #[test]
    fn hsv_conversion_matches_opencv_scale() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }
}
