use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::{
    codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding},
    ColorType, ImageEncoder, Rgb32FImage, RgbImage,
};
use raycast::renderer::RenderOutput;

use super::FinalOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Binary portable pixmap
    Ppm,
    /// 32 bit float, colors are not clamped
    Hdr,
    /// 8 bit per channel, in whatever format `image` infers from the extension
    Ldr,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("ppm" | "pnm") => Self::Ppm,
            Some("exr") => Self::Hdr,
            _ => Self::Ldr,
        }
    }
}

/// Writes the rendered image to a single file.
pub struct FileOutput {
    pub path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn quantize(output: &RenderOutput) -> Vec<u8> {
    output
        .pixels
        .iter()
        .flat_map(|pixel| pixel.to_byte_array())
        .collect()
}

fn write_ppm<W: Write>(output: &RenderOutput, writer: W) -> Result<()> {
    let encoder =
        PnmEncoder::new(writer).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
    encoder.write_image(
        &quantize(output),
        output.dimensions.width,
        output.dimensions.height,
        ColorType::Rgb8,
    )?;
    Ok(())
}

fn hdr_image(output: &RenderOutput) -> Result<Rgb32FImage> {
    Rgb32FImage::from_raw(
        output.dimensions.width,
        output.dimensions.height,
        bytemuck::cast_slice(&output.pixels).to_vec(),
    )
    .context("pixel buffer does not match the image dimensions")
}

fn ldr_image(output: &RenderOutput) -> Result<RgbImage> {
    RgbImage::from_raw(
        output.dimensions.width,
        output.dimensions.height,
        quantize(output),
    )
    .context("pixel buffer does not match the image dimensions")
}

impl FinalOutput for FileOutput {
    fn commit(&self, output: &RenderOutput) -> Result<()> {
        let path = self.path.as_path();
        let format = OutputFormat::from_path(path);
        log::info!("Saving {format:?} image to {path:?}...");

        match format {
            OutputFormat::Ppm => {
                let file = File::create(path).with_context(|| format!("cannot create {path:?}"))?;
                let mut writer = BufWriter::new(file);
                write_ppm(output, &mut writer)?;
                writer.flush()?;
            }
            OutputFormat::Hdr => hdr_image(output)?.save(path)?,
            OutputFormat::Ldr => ldr_image(output)?.save(path)?,
        }

        log::info!("Image saved");
        Ok(())
    }
}
