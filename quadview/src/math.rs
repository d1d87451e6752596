use cgmath::Matrix4;

/// Orthographic projection from pixel coordinates to clip space, with pixel
/// row 0 at the top of the screen. Z and W pass through unchanged.
#[rustfmt::skip]
pub fn pixel_projection(width: f32, height: f32) -> Matrix4<f32> {
    Matrix4::new(
        2.0 / width, 0.0,          0.0, 0.0,
        0.0,         -2.0 / height, 0.0, 0.0,
        0.0,         0.0,          1.0, 0.0,
        -1.0,        1.0,          0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn corners_map_to_clip_space() {
        // powers of two keep the arithmetic exact
        let m = pixel_projection(1024.0, 512.0);

        let top_left = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(top_left, Vector4::new(-1.0, 1.0, 0.0, 1.0));

        let bottom_right = m * Vector4::new(1024.0, 512.0, 0.0, 1.0);
        assert_eq!(bottom_right, Vector4::new(1.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn arbitrary_viewport_maps_corners() {
        let m = pixel_projection(1280.0, 720.0);

        let top_left = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = m * Vector4::new(1280.0, 720.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn z_and_w_pass_through() {
        let m = pixel_projection(100.0, 100.0);

        let v = m * Vector4::new(50.0, 50.0, 0.25, 1.0);
        assert_eq!(v.z, 0.25);
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn column_major_cells_match_upload_layout() {
        let m = pixel_projection(200.0, 100.0);
        let cells: &[f32; 16] = m.as_ref();

        assert_eq!(cells[0], 0.01);
        assert_eq!(cells[5], -0.02);
        assert_eq!(cells[10], 1.0);
        assert_eq!(cells[12], -1.0);
        assert_eq!(cells[13], 1.0);
        assert_eq!(cells[15], 1.0);
    }
}
