//! # Pipeline Tests
//!
//! End-to-end checks of preprocess → dither → encode against properties that
//! must hold for any input, plus a few fixed scenarios with known bytes.

use image::{DynamicImage, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tinta::encoder::{self, pack, unpack};
use tinta::pipeline;
use tinta::render::dither::{self, DitherConfig, DitheringAlgorithm};
use tinta::render::mono::MonoImage;
use tinta::render::prepare::{self, LuminanceField, padded_width};

const MAX_WIDTH: u32 = 384;

fn gray(width: u32, height: u32, level: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([level; 3])))
}

fn random_field(rng: &mut StdRng, width: usize, height: usize) -> LuminanceField {
    let samples = (0..width * height)
        .map(|_| rng.random_range(0.0..=255.0))
        .collect();
    LuminanceField::from_samples(width, height, samples)
}

fn random_photo(rng: &mut StdRng, width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |_, _| {
        Rgb([rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>()])
    });
    DynamicImage::ImageRgb8(img)
}

fn config(mode: DitheringAlgorithm, threshold: i32, invert: bool) -> DitherConfig {
    DitherConfig::new(mode, 1.0, threshold, invert, false)
}

/// Black/white image back to a luminance field (black = 0, white = 255).
fn to_field(img: &MonoImage) -> LuminanceField {
    let samples = img
        .pixels()
        .iter()
        .map(|&black| if black { 0.0 } else { 255.0 })
        .collect();
    LuminanceField::from_samples(img.width(), img.height(), samples)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_wide_mid_gray_at_neutral_threshold_is_white() {
    let cfg = config(DitheringAlgorithm::None, 128, false);
    let mono = pipeline::process(&gray(400, 100, 128), &cfg, MAX_WIDTH);

    assert_eq!(mono.width(), 384);
    assert_eq!(mono.height(), 96);
    assert_eq!(mono.count_black(), 0);
}

#[test]
fn test_wide_mid_gray_above_threshold_is_black() {
    let cfg = config(DitheringAlgorithm::None, 129, false);
    let mono = pipeline::process(&gray(400, 100, 128), &cfg, MAX_WIDTH);

    assert_eq!(mono.width(), 384);
    assert_eq!(mono.count_black(), 384 * 96);
}

#[test]
fn test_alternating_row_encodes_as_0xaa() {
    let field = LuminanceField::from_samples(8, 1, vec![0.0, 255.0, 0.0, 255.0, 0.0, 255.0, 0.0, 255.0]);
    let mono = dither::dither(field, &config(DitheringAlgorithm::None, 128, false));
    let job = encoder::encode(&mono);

    let bytes = job.as_bytes();
    assert_eq!(&bytes[5..13], &[0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x01, 0x00]);
    assert_eq!(bytes[13], 0xAA);
}

#[test]
fn test_job_frame_layout() {
    let cfg = DitherConfig::default();
    let job = pipeline::print_job(&gray(100, 40, 200), &cfg, &tinta::PrinterConfig::MM58).unwrap();
    let bytes = job.as_bytes();

    // 100 → 104 dots = 13 bytes per line, 40 rows
    assert_eq!(&bytes[..5], &[0x1B, 0x40, 0x1B, 0x61, 0x01]);
    assert_eq!(&bytes[5..13], &[0x1D, 0x76, 0x30, 0x00, 13, 0, 40, 0]);
    assert_eq!(job.len(), 13 + 13 * 40 + 6);
    assert_eq!(&bytes[job.len() - 6..], &[0x1B, 0x64, 0x02, 0x1B, 0x64, 0x02]);
}

#[test]
fn test_padding_columns_are_white() {
    // 13 black columns, padded to 16 with white
    let cfg = config(DitheringAlgorithm::FloydSteinberg, 128, false);
    let mono = pipeline::process(&gray(13, 5, 0), &cfg, MAX_WIDTH);
    assert_eq!(mono.width(), 16);
    for y in 0..mono.height() {
        assert!((0..13).all(|x| mono.get(x, y)));
        assert!((13..16).all(|x| !mono.get(x, y)));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_padding_invariant_across_widths() {
    let mut rng = StdRng::seed_from_u64(0x7117a);
    let cfg = config(DitheringAlgorithm::Atkinson, 128, false);

    for width in (1..=20).chain([383, 384, 385, 399, 400, 640, 1000]) {
        let height = rng.random_range(1..=12);
        let mono = pipeline::process(&random_photo(&mut rng, width, height), &cfg, MAX_WIDTH);

        let out = mono.width() as u32;
        assert_eq!(out % 8, 0, "source width {}", width);
        assert!(out <= padded_width(MAX_WIDTH), "source width {}", width);
        assert!(out >= width.min(MAX_WIDTH), "source width {}", width);
    }
}

#[test]
fn test_pack_unpack_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let width = rng.random_range(1..=50);
        let height = rng.random_range(1..=10);
        let pixels = (0..width * height).map(|_| rng.random::<bool>()).collect();
        let img = MonoImage::from_pixels(width, height, pixels);

        let raster = pack(&img);
        assert_eq!(raster.len(), width.div_ceil(8) * height);
        assert_eq!(unpack(&raster, width), img);
    }
}

#[test]
fn test_threshold_mode_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = config(DitheringAlgorithm::None, 128, false);

    let once = dither::dither(random_field(&mut rng, 32, 16), &cfg);
    let twice = dither::dither(to_field(&once), &cfg);
    assert_eq!(once, twice);
}

#[test]
fn test_every_mode_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(2);
    let field = random_field(&mut rng, 40, 24);

    for mode in DitheringAlgorithm::ALL {
        let cfg = config(mode, 128, false);
        assert_eq!(
            dither::dither(field.clone(), &cfg),
            dither::dither(field.clone(), &cfg),
            "{}",
            mode
        );
    }
}

#[test]
fn test_invert_is_complement_for_threshold_and_ordered() {
    let mut rng = StdRng::seed_from_u64(3);
    let field = random_field(&mut rng, 24, 24);

    for mode in [DitheringAlgorithm::None, DitheringAlgorithm::Ordered8x8] {
        let normal = dither::dither(field.clone(), &config(mode, 128, false));
        let inverted = dither::dither(field.clone(), &config(mode, 128, true));
        assert_eq!(inverted, normal.inverted(), "{}", mode);
    }
}

#[test]
fn test_error_diffusion_invert_differs_from_negative() {
    // Inverting flips the output bit but keeps diffusing the pre-invert error,
    // so it is not the same as dithering the photographic negative.
    let mut rng = StdRng::seed_from_u64(4);
    let field = random_field(&mut rng, 32, 32);
    let negative = LuminanceField::from_samples(
        32,
        32,
        field.samples().iter().map(|v| 255.0 - v).collect(),
    );

    for mode in [DitheringAlgorithm::FloydSteinberg, DitheringAlgorithm::Atkinson] {
        let inverted = dither::dither(field.clone(), &config(mode, 100, true));
        let of_negative = dither::dither(negative.clone(), &config(mode, 100, false));
        assert_eq!(inverted, dither::dither(field.clone(), &config(mode, 100, false)).inverted());
        assert!(inverted != of_negative, "{}", mode);
    }
}

#[test]
fn test_ordered_dither_tracks_gray_level() {
    let cfg = config(DitheringAlgorithm::Ordered8x8, 128, false);
    let mut previous = usize::MAX;
    for level in [0.0, 64.0, 128.0, 192.0, 255.0] {
        let black = dither::dither(LuminanceField::filled(16, 16, level), &cfg).count_black();
        assert!(black <= previous, "level {}", level);
        previous = black;
    }
    assert_eq!(previous, 0);
}

#[test]
fn test_gamma_darkens_output() {
    let photo = gray(64, 64, 160);
    let light = DitherConfig::new(DitheringAlgorithm::FloydSteinberg, 1.5, 128, false, false);
    let dark = DitherConfig::new(DitheringAlgorithm::FloydSteinberg, 0.3, 128, false, false);

    let light_black = pipeline::process(&photo, &light, MAX_WIDTH).count_black();
    let dark_black = pipeline::process(&photo, &dark, MAX_WIDTH).count_black();
    assert!(dark_black > light_black);
}

#[test]
fn test_sharpen_keeps_geometry() {
    let mut rng = StdRng::seed_from_u64(5);
    let photo = random_photo(&mut rng, 50, 20);
    let field = prepare::prepare(&photo, MAX_WIDTH, 1.0, true);
    assert_eq!((field.width(), field.height()), (56, 20));
    assert!(field.samples().iter().all(|v| (0.0..=255.0).contains(v)));
}
