use std::cell::RefCell;

use featured_images::{ColorStop, GeneratorConfig, GradientSpec, ItemSpec, LossyEncoder};
use image::RgbImage;

/// Color constants for tests
pub const TEST_BLACK: ColorStop = ColorStop::new(0, 0, 0);
pub const TEST_WHITE: ColorStop = ColorStop::new(255, 255, 255);
pub const TEST_GRAY: ColorStop = ColorStop::new(100, 100, 100);

/// Black at the top and bottom, white in the middle
pub fn black_white_black() -> GradientSpec {
    GradientSpec::new(TEST_BLACK, TEST_WHITE, TEST_BLACK)
}

/// A mix of rising and falling channels
pub fn mixed_gradient() -> GradientSpec {
    GradientSpec::new(
        ColorStop::new(230, 126, 34),
        ColorStop::new(231, 76, 60),
        ColorStop::new(192, 57, 43),
    )
}

/// Small-canvas config writing into `output_dir`
pub fn make_test_config(output_dir: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig {
        width: 64,
        height: 36,
        max_file_size: 200 * 1024,
        output_dir: output_dir.to_path_buf(),
        items: vec![
            ItemSpec::new("first-post", "First test post", black_white_black()),
            ItemSpec::new("second-post", "Second test post", mixed_gradient()),
        ],
    }
}

/// Encoder whose output length is `quality * bytes_per_step`.
/// Records every quality it was asked for.
pub struct FakeEncoder {
    pub bytes_per_step: usize,
    pub calls: RefCell<Vec<u8>>,
}

impl FakeEncoder {
    pub fn new(bytes_per_step: usize) -> Self {
        Self {
            bytes_per_step,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<u8> {
        self.calls.borrow().clone()
    }
}

impl LossyEncoder for &FakeEncoder {
    fn encode_at(&self, _image: &RgbImage, quality: u8) -> anyhow::Result<Vec<u8>> {
        self.calls.borrow_mut().push(quality);
        Ok(vec![0u8; quality as usize * self.bytes_per_step])
    }
}
