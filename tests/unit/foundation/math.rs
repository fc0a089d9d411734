use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn premul_scales_by_alpha() {
    assert_eq!(premul_u8(255, 0), 0);
    assert_eq!(premul_u8(200, 255), 200);
}

#[test]
fn ceil_len_rounds_up_and_clamps() {
    assert_eq!(ceil_len(0.0), 0);
    assert_eq!(ceil_len(-3.0), 0);
    assert_eq!(ceil_len(f64::NAN), 0);
    assert_eq!(ceil_len(0.01), 1);
    assert_eq!(ceil_len(10.0), 10);
    assert_eq!(ceil_len(10.2), 11);
    assert_eq!(ceil_len(1e20), u32::MAX);
}
