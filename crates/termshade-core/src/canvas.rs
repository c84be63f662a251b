use tiny_skia::Pixmap;

/// Crops a pixmap to the bounding box of its non-transparent pixels. A
/// fully transparent pixmap (and any allocation failure) comes back as an
/// unmodified copy.
pub(crate) fn trim_transparent(pixmap: &Pixmap) -> Pixmap {
    let width = pixmap.width() as usize;
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;
    let mut found = false;

    for (i, px) in pixmap.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let (x, y) = (i % width, i / width);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
        found = true;
    }
    if !found {
        return pixmap.clone();
    }

    let out_width = (max_x - min_x + 1) as u32;
    let out_height = (max_y - min_y + 1) as u32;
    let Some(mut out) = Pixmap::new(out_width, out_height) else {
        return pixmap.clone();
    };

    let src = pixmap.data();
    let dst = out.data_mut();
    let src_stride = width * 4;
    let dst_stride = out_width as usize * 4;
    for row in 0..out_height as usize {
        let src_start = (min_y + row) * src_stride + min_x * 4;
        let dst_start = row * dst_stride;
        dst[dst_start..dst_start + dst_stride]
            .copy_from_slice(&src[src_start..src_start + dst_stride]);
    }
    out
}
