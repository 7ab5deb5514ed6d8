//! Corner Pin Example
//!
//! Fits a 4:3 clip onto a 1080p stage, drags two corners like an operator
//! would and prints the resulting homography and CSS transform.

use immersive_mapping::{fullscreen_quad, Alignment, FitMode, PerspectiveWarp, Point2D};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("Corner Pin Example");
    println!("==================\n");

    let (content_w, content_h) = (1024.0, 768.0);
    let target = fullscreen_quad(
        1920.0,
        1080.0,
        content_w,
        content_h,
        FitMode::Contain,
        Alignment::Center,
    );
    println!("Contain target: {:?}\n", target.points);

    let mut warp = PerspectiveWarp::with_corners(content_w, content_h, target)?;

    // Keystone: pull the top corners inward
    warp.move_corner(0, Point2D::new(80.0, 30.0))?;
    warp.move_corner(1, Point2D::new(-80.0, 30.0))?;

    // An operator overshoot that would fold the quad is refused
    if let Err(e) = warp.set_corner(3, Point2D::new(1900.0, 100.0)) {
        println!("Rejected drag: {}\n", e);
    }

    let h = warp.homography()?;
    println!("Homography (row-major): {:?}", h.to_row_major());
    println!("CSS: {}\n", warp.render_matrix()?.to_css_matrix3d());

    for (name, p) in [
        ("center", Point2D::new(content_w / 2.0, content_h / 2.0)),
        ("top-left", Point2D::ZERO),
    ] {
        let out = warp.map_point(p)?;
        println!("{:>8}: ({:.1}, {:.1}) -> ({:.2}, {:.2})", name, p.x, p.y, out.x, out.y);
    }

    Ok(())
}
