//! Unit tests for the glyph ramp and pixel mapping.
//!
//! These tests verify the mapping rules the rendered files depend on:
//! - Ramp contents and reversal
//! - Bucket width and ramp index wraparound
//! - Per-channel weighting and glyph order

use image_to_ascii::ascii::*;

// ==================== Ramp Tests ====================

#[test]
fn test_ramp_length() {
    assert_eq!(NORMAL_RAMP.len(), RAMP_LEN);
    assert_eq!(INVERTED_RAMP.len(), RAMP_LEN);
    assert_eq!(RAMP_LEN, 10);
}

#[test]
fn test_normal_ramp_literal() {
    let s: String = NORMAL_RAMP.iter().collect();
    assert_eq!(s, "█▓▒░$$░▒▓█");
}

#[test]
fn test_inverted_is_reversal_of_normal() {
    for i in 0..RAMP_LEN {
        assert_eq!(INVERTED_RAMP[i], NORMAL_RAMP[RAMP_LEN - 1 - i]);
    }
}

#[test]
fn test_ramp_glyphs_by_variant() {
    assert_eq!(Ramp::Normal.glyphs(), &NORMAL_RAMP);
    assert_eq!(Ramp::Inverted.glyphs(), &INVERTED_RAMP);
    assert_eq!(Ramp::default(), Ramp::Normal);
    assert_eq!(Ramp::from_invert(true), Ramp::Inverted);
    assert_eq!(Ramp::from_invert(false), Ramp::Normal);
}

#[test]
fn test_bucket_width() {
    assert_eq!(BUCKET_WIDTH, 25);
}

// ==================== Ramp Index Tests ====================

#[test]
fn test_zero_intensity_resolves_to_last_glyph() {
    assert_eq!(ramp_index(0.0), RAMP_LEN - 1);
    let black = map_color(0, 0, 0, Ramp::Normal);
    assert_eq!(black.0, [NORMAL_RAMP[RAMP_LEN - 1]; 3]);
    let black = map_color(0, 0, 0, Ramp::Inverted);
    assert_eq!(black.0, [INVERTED_RAMP[RAMP_LEN - 1]; 3]);
}

#[test]
fn test_ramp_index_always_in_range() {
    for v in 0..=255u32 {
        for weight in [RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT, 1.0] {
            assert!(ramp_index(weight * v as f64) < RAMP_LEN);
        }
    }
}

#[test]
fn test_ramp_index_monotonic_above_first_bucket() {
    let mut last = 0;
    for v in 25..255u32 {
        let idx = ramp_index(v as f64);
        assert!(idx >= last, "index went backwards at {}", v);
        last = idx;
    }
}

// ==================== Pixel Mapping Tests ====================

#[test]
fn test_weights_are_preserved() {
    assert_eq!(RED_WEIGHT, 0.330);
    assert_eq!(GREEN_WEIGHT, 0.587);
    assert_eq!(BLUE_WEIGHT, 0.083);
}

#[test]
fn test_pure_red() {
    // 0.330 * 255 = 84.15 -> bucket 3 -> index 2
    let t = map_color(255, 0, 0, Ramp::Normal);
    assert_eq!(t.0, [NORMAL_RAMP[2], NORMAL_RAMP[9], NORMAL_RAMP[9]]);
}

#[test]
fn test_pure_green() {
    // 0.587 * 255 = 149.685 -> bucket 5 -> index 4
    let t = map_color(0, 255, 0, Ramp::Normal);
    assert_eq!(t.0, [NORMAL_RAMP[9], NORMAL_RAMP[4], NORMAL_RAMP[9]]);
}

#[test]
fn test_pure_blue_never_leaves_first_bucket() {
    // 0.083 * 255 = 21.165 < 25
    let t = map_color(0, 0, 255, Ramp::Normal);
    assert_eq!(t.0, [NORMAL_RAMP[9]; 3]);
}

#[test]
fn test_triplet_is_three_chars_in_rgb_order() {
    let t = map_color(255, 128, 0, Ramp::Inverted);
    let s = t.to_string();
    assert_eq!(s.chars().count(), 3);
    let chars: Vec<char> = s.chars().collect();
    assert_eq!(chars[0], INVERTED_RAMP[ramp_index(RED_WEIGHT * 255.0)]);
    assert_eq!(chars[1], INVERTED_RAMP[ramp_index(GREEN_WEIGHT * 128.0)]);
    assert_eq!(chars[2], INVERTED_RAMP[ramp_index(0.0)]);
}

#[test]
fn test_map_pixel_grayscale_skip_is_default() {
    assert_eq!(ScalarPolicy::default(), ScalarPolicy::Skip);
    assert_eq!(
        map_pixel(PixelSample::Grayscale(255), Ramp::Normal, ScalarPolicy::default()),
        None
    );
}

#[test]
fn test_map_pixel_placeholder_is_three_spaces() {
    let t = map_pixel(PixelSample::Grayscale(0), Ramp::Normal, ScalarPolicy::Placeholder);
    assert_eq!(t.map(|t| t.to_string()), Some("   ".to_string()));
}

// ==================== Dimension Tests ====================

#[test]
fn test_target_height_matches_floor_formula() {
    for (w, h) in [(640u32, 480u32), (1920, 1080), (333, 777), (51, 1), (7, 3000)] {
        for target in [50u32, 120, 340] {
            let expected = (h as f64 * (target as f64 / w as f64)).floor() as u32;
            assert_eq!(target_height(w, h, target), expected);
        }
    }
}

#[test]
fn test_target_height_examples() {
    assert_eq!(target_height(640, 480, 50), 37);
    assert_eq!(target_height(1920, 1080, 340), 191);
    assert_eq!(target_height(200, 100, 50), 25);
}
