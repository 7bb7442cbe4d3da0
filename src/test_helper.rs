use crate::Color;

/// Colors are equal up to one step per 8-bit channel.
pub fn assert_almost_equal(c1: &Color, c2: &Color) {
    let c1 = c1.to_srgb();
    let c2 = c2.to_srgb();

    assert!(
        (c1.r as i32 - c2.r as i32).abs() <= 1
            && (c1.g as i32 - c2.g as i32).abs() <= 1
            && (c1.b as i32 - c2.b as i32).abs() <= 1,
        "{} is not almost equal to {}",
        c1,
        c2
    );
}
