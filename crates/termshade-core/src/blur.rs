use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Applies a separable gaussian blur to the pixmap in place. Channel math
/// happens on premultiplied values, so translucent shadow layers blur
/// without fringing. `radius` roughly bounds the visible spread.
pub(crate) fn gaussian_blur(pixmap: &mut Pixmap, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let kernel = gaussian_kernel(radius);
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;

    let mut channels = vec![0.0f32; width * height * 4];
    for (i, px) in pixmap.pixels().iter().enumerate() {
        channels[i * 4] = px.red() as f32;
        channels[i * 4 + 1] = px.green() as f32;
        channels[i * 4 + 2] = px.blue() as f32;
        channels[i * 4 + 3] = px.alpha() as f32;
    }

    let horizontal = blur_axis(&channels, width, height, &kernel, true);
    let blurred = blur_axis(&horizontal, width, height, &kernel, false);

    for (i, px) in pixmap.pixels_mut().iter_mut().enumerate() {
        let a = blurred[i * 4 + 3].round().clamp(0.0, 255.0) as u8;
        let clamp_to_alpha =
            |v: f32| (v.round().clamp(0.0, 255.0) as u8).min(a);
        *px = PremultipliedColorU8::from_rgba(
            clamp_to_alpha(blurred[i * 4]),
            clamp_to_alpha(blurred[i * 4 + 1]),
            clamp_to_alpha(blurred[i * 4 + 2]),
            a,
        )
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
}

fn gaussian_kernel(radius: f32) -> Vec<f32> {
    let sigma = radius / 2.0;
    let extent = radius.ceil() as i32;
    let mut kernel = Vec::with_capacity((2 * extent + 1) as usize);
    let denom = 2.0 * sigma * sigma;
    for i in -extent..=extent {
        kernel.push((-(i * i) as f32 / denom).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

/// One blur pass along an axis. Samples beyond the edge clamp to the
/// border pixel.
fn blur_axis(
    channels: &[f32],
    width: usize,
    height: usize,
    kernel: &[f32],
    horizontal: bool,
) -> Vec<f32> {
    let extent = (kernel.len() / 2) as i32;
    let mut out = vec![0.0f32; channels.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let offset = k as i32 - extent;
                let (sx, sy) = if horizontal {
                    ((x as i32 + offset).clamp(0, width as i32 - 1), y as i32)
                } else {
                    (x as i32, (y as i32 + offset).clamp(0, height as i32 - 1))
                };
                let base = (sy as usize * width + sx as usize) * 4;
                for (c, slot) in acc.iter_mut().enumerate() {
                    *slot += channels[base + c] * weight;
                }
            }
            let base = (y * width + x) * 4;
            out[base..base + 4].copy_from_slice(&acc);
        }
    }
    out
}
