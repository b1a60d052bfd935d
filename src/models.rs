use serde::Deserialize;

/// A single gradient anchor color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct ColorStop {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorStop {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for ColorStop {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<ColorStop> for image::Rgb<u8> {
    fn from(stop: ColorStop) -> Self {
        image::Rgb(stop.channels())
    }
}

/// Ordered first / middle / last stops of a vertical gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<ColorStop>")]
pub struct GradientSpec(pub [ColorStop; 3]);

impl GradientSpec {
    pub const fn new(first: ColorStop, middle: ColorStop, last: ColorStop) -> Self {
        Self([first, middle, last])
    }

    pub fn stops(&self) -> &[ColorStop; 3] {
        &self.0
    }
}

impl TryFrom<&[ColorStop]> for GradientSpec {
    type Error = anyhow::Error;

    fn try_from(stops: &[ColorStop]) -> Result<Self, Self::Error> {
        match stops {
            [first, middle, last] => Ok(Self::new(*first, *middle, *last)),
            _ => Err(anyhow::anyhow!(
                "A gradient needs exactly 3 color stops, got {}",
                stops.len()
            )),
        }
    }
}

impl TryFrom<Vec<ColorStop>> for GradientSpec {
    type Error = anyhow::Error;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::try_from(stops.as_slice())
    }
}

/// One post that gets a featured image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSpec {
    /// Identifier used to name the output file
    pub slug: String,

    /// Descriptive text for the image; not used while rendering
    #[serde(default)]
    pub alt: String,

    #[serde(rename = "colors")]
    pub gradient: GradientSpec,
}

impl ItemSpec {
    pub fn new(slug: impl Into<String>, alt: impl Into<String>, gradient: GradientSpec) -> Self {
        Self {
            slug: slug.into(),
            alt: alt.into(),
            gradient,
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}-featured.jpg", self.slug)
    }
}

/// Compressed image bytes together with the quality they were encoded at
#[derive(Debug, Clone)]
pub struct EncodedBlob {
    pub bytes: Vec<u8>,
    pub quality: u8,
}

impl EncodedBlob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn fits(&self, ceiling: usize) -> bool {
        self.len() <= ceiling
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
