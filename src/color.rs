use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

/// Parse a CSS color (`#007bff`, `#fff`, ...) into an RGBA pixel.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow!("Invalid CSS color: {value:?}"))?;

    Ok(Rgba([
        to_channel(color.red),
        to_channel(color.green),
        to_channel(color.blue),
        to_channel(color.alpha),
    ]))
}

fn to_channel(v: f32) -> u8 {
    (v * 255.).round().clamp(0., 255.) as u8
}
