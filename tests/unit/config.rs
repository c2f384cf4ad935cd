use super::*;

#[test]
fn empty_object_is_default_config() {
    let cfg = Config::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!((cfg.raster.width, cfg.raster.height), (1024, 768));
    assert_eq!(cfg.engine.program, PathBuf::from("vg2svg"));
    cfg.validate().unwrap();
}

#[test]
fn partial_config_keeps_other_defaults() {
    let cfg = Config::from_reader(
        r#"{"raster": {"width": 320, "background": [0, 0, 0, 0]}, "engine": {"program": "/opt/vega/vg2svg"}}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.raster.width, 320);
    assert_eq!(cfg.raster.height, 768);
    assert_eq!(cfg.raster.background, [0, 0, 0, 0]);
    assert_eq!(cfg.engine.program, PathBuf::from("/opt/vega/vg2svg"));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::from_reader(r#"{"rastr": {}}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse config JSON"));
}

#[test]
fn validation_catches_bad_raster_values() {
    let bad = [
        RasterOpts {
            width: 0,
            ..RasterOpts::default()
        },
        RasterOpts {
            height: Surface::MAX_DIM + 1,
            ..RasterOpts::default()
        },
        RasterOpts {
            scale: 0.0,
            ..RasterOpts::default()
        },
    ];
    for opts in bad {
        assert!(opts.validate().is_err(), "{opts:?}");
    }
}

#[test]
fn raster_surface_uses_configured_background() {
    let opts = RasterOpts {
        width: 2,
        height: 2,
        background: [0, 0, 0, 255],
        ..RasterOpts::default()
    };
    let surface = opts.surface().unwrap();
    assert_eq!(&surface.data()[..4], &[0, 0, 0, 255]);
}

#[test]
fn build_engine_validates_first() {
    let mut cfg = Config::default();
    cfg.raster.system_fonts = false;
    cfg.build_engine().unwrap();

    cfg.raster.scale = -2.0;
    assert!(cfg.build_engine().is_err());
}

#[test]
fn missing_config_file_is_reported() {
    let err = Config::from_path("target/no-such-config.json").unwrap_err();
    assert!(err.to_string().contains("open config JSON"));
}
