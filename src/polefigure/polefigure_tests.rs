use approx::assert_abs_diff_eq;

use super::*;
use crate::color::{alpha, WHITE};
use crate::laue::LaueClass;

fn small_config() -> PoleFigureConfiguration {
    PoleFigureConfigurationBuilder::default()
        .lambert_dim(24)
        .image_dim(64)
        .num_colors(16)
        .build()
        .unwrap()
}

#[test]
fn test_builder_defaults() {
    let config = PoleFigureConfigurationBuilder::default().build().unwrap();
    assert_eq!(config.lambert_dim, 64);
    assert_eq!(config.image_dim, 512);
    assert_eq!(config.num_colors, 32);
    assert_abs_diff_eq!(config.sphere_radius, 1.0);
    assert_eq!(config.order, [0, 1, 2]);
    assert!(config.labels.is_none());
    assert!(!config.discrete);
}

#[test]
fn test_cubic_pole_figures_default_labels_and_shapes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let eulers = [
        Euler::new(0.0, 0.0, 0.0),
        Euler::new(0.3, 0.5, 0.1),
        Euler::new(1.2, 0.8, 2.0),
    ];
    let config = small_config();
    let set = generate_pole_figures(LaueClass::Cubic, &eulers, &config);

    assert_eq!(set.figures.len(), 3);
    assert_eq!(set.figures[0].name, "<001>");
    assert_eq!(set.figures[1].name, "<011>");
    assert_eq!(set.figures[2].name, "<111>");
    assert!(set.min_scale <= set.max_scale);
    for figure in &set.figures {
        assert_eq!(figure.intensities.dim(), (64, 64));
        assert_eq!(figure.image.dim(), (64, 64));
        // Pixels outside the circle are white, inside opaque.
        assert_eq!(figure.image[(0, 0)], WHITE);
        assert_eq!(alpha(figure.image[(32, 32)]), 255);
    }
}

#[test]
fn test_identity_texture_concentrates_the_axis_family() {
    // A single cube-oriented crystal puts a <001> pole at the projection
    // centre.
    let eulers = [Euler::new(0.0, 0.0, 0.0)];
    let config = small_config();
    let set = generate_pole_figures(LaueClass::Cubic, &eulers, &config);
    let axis_figure = &set.figures[0];
    assert!(axis_figure.intensities[(32, 32)] > 0.0);
}

#[test]
fn test_order_permutes_output_slots() {
    let eulers = [Euler::new(0.2, 0.4, 0.6)];
    let config = PoleFigureConfigurationBuilder::default()
        .lambert_dim(24)
        .image_dim(32)
        .num_colors(8)
        .order([2, 0, 1])
        .build()
        .unwrap();
    let set = generate_pole_figures(LaueClass::Cubic, &eulers, &config);
    // Family 0 (<001>) was routed to slot 2.
    assert_eq!(set.figures[2].name, "<001>");
    assert_eq!(set.figures[0].name, "<011>");
    assert_eq!(set.figures[1].name, "<111>");
}

#[test]
fn test_label_override() {
    let eulers = [Euler::new(0.1, 0.1, 0.1)];
    let config = PoleFigureConfigurationBuilder::default()
        .lambert_dim(16)
        .image_dim(32)
        .num_colors(8)
        .labels(Some([
            "basal".to_string(),
            "prismatic".to_string(),
            "pyramidal".to_string(),
        ]))
        .build()
        .unwrap();
    let set = generate_pole_figures(LaueClass::Hexagonal, &eulers, &config);
    assert_eq!(set.figures[0].name, "basal");
    assert_eq!(set.figures[2].name, "pyramidal");
}

#[test]
fn test_hexagonal_uses_class_defaults() {
    let eulers = [Euler::new(0.5, 0.7, 0.9)];
    let set = generate_pole_figures(LaueClass::Hexagonal, &eulers, &small_config());
    assert_eq!(set.figures[0].name, "<0001>");
}
