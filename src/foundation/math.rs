pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn premul_u8(c: u8, a: u8) -> u8 {
    mul_div255_u16(u16::from(c), u16::from(a)) as u8
}

/// Round a non-negative length up to a whole pixel budget.
///
/// NaN and negative inputs collapse to 0.
pub(crate) fn ceil_len(len: f64) -> u32 {
    if len.is_nan() || len <= 0.0 {
        return 0;
    }
    let c = len.ceil();
    if c >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        c as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
