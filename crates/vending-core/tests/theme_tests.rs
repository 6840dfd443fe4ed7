use vending_core::*;

#[test]
fn day_is_the_default() {
    assert_eq!(Theme::default(), Theme::Day);
    assert!(Theme::default().is_day());
}

#[test]
fn toggle_flips_between_two_states() {
    let mut t = Theme::Day;
    t.toggle();
    assert_eq!(t, Theme::Night);
    assert_eq!(t.name(), "night");
    t.toggle();
    assert_eq!(t, Theme::Day);
    assert_eq!(Theme::Night.toggled().toggled(), Theme::Night);
}

#[test]
fn palettes_match_presentation_table() {
    let day = Theme::Day.palette();
    assert_eq!(day.clear_color, 0x87CEEB);
    assert_eq!(day.directional_intensity, 1.5);
    assert_eq!(day.ambient_intensity, 1.0);
    assert_eq!(day.ambient_color, 0xFFFFFF);

    let night = Theme::Night.palette();
    assert_eq!(night.clear_color, 0x000033);
    assert_eq!(night.directional_intensity, 0.8);
    assert_eq!(night.ambient_intensity, 0.4);
    assert_eq!(night.ambient_color, 0x555555);
}

#[test]
fn lighting_follows_palette() {
    let mut lighting = Lighting::new(Theme::Day.palette());
    let spot = lighting.spot;
    lighting.apply_palette(Theme::Night.palette());
    assert_eq!(lighting.directional.intensity, 0.8);
    assert_eq!(lighting.ambient.intensity, 0.4);
    assert_eq!(lighting.ambient.color, 0x555555);
    assert_eq!(lighting.spot, spot);
}

#[test]
fn shadow_camera_looks_at_the_scene() {
    let lighting = Lighting::new(Theme::Day.palette());
    let vp = lighting.directional.shadow_view_projection();
    // The light target lands inside the shadow map's clip volume
    let clip = vp.project_point3(lighting.directional.target);
    assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0);
    assert!((0.0..=1.0).contains(&clip.z));
}

#[test]
fn night_then_day_restores_the_rig() {
    let day = Lighting::new(Theme::Day.palette());
    let mut lighting = day.clone();
    lighting.apply_palette(Theme::Night.palette());
    lighting.apply_palette(Theme::Day.palette());
    assert_eq!(lighting, day);
    assert_eq!(lighting.spot, day.spot);
}
