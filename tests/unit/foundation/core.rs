use super::*;

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::NAN).is_err());
    assert!(Viewport::new(1280.0, 720.0).is_ok());
}

#[test]
fn surface_size_never_zero() {
    let vp = Viewport {
        width: 0.2,
        height: 0.0,
    };
    assert_eq!(vp.surface_size(), (1, 1));
    let vp = Viewport {
        width: 1280.4,
        height: 719.6,
    };
    assert_eq!(vp.surface_size(), (1280, 720));
}

#[test]
fn lengths_parse_and_resolve() {
    let vp = Viewport::new(1000.0, 500.0).unwrap();
    assert_eq!("-20vw".parse::<Length>().unwrap().to_px(vp), -200.0);
    assert_eq!("50vh".parse::<Length>().unwrap().to_px(vp), 250.0);
    assert_eq!("12px".parse::<Length>().unwrap(), Length::Px(12.0));
    assert_eq!("7".parse::<Length>().unwrap(), Length::Px(7.0));
    assert!("vw".parse::<Length>().is_err());
    assert_eq!(Length::Vw(120.0).to_string(), "120vw");
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::from_hex("#FFD700").unwrap(), palette::GOLD);
    assert_eq!(Rgba8::from_hex("#fff").unwrap(), palette::WHITE);
    assert_eq!(Rgba8::from_hex("#00000080").unwrap().a, 0x80);
    assert!(Rgba8::from_hex("FFD700").is_err());
    assert!(Rgba8::from_hex("#12").is_err());
    assert_eq!(palette::INK.to_css(), "#1A1A1A");
}
