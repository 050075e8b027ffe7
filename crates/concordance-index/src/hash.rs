//! Digit-positional polynomial hash over normalized keys.

use num_bigint::BigUint;

/// Map a normalized key to a slot index in `[0, capacity)`.
///
/// Each character's code point is a coefficient in a base-10 positional
/// accumulator: `sum(code(c_i) * 10^i)` over the characters left to right.
/// The accumulator is squared and reduced modulo the capacity. Keys past
/// about six characters push the intermediate value beyond 64 bits, so the
/// whole computation stays in `BigUint`; truncating arithmetic would change
/// the resulting indices.
pub fn slot_index(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "capacity is validated before table construction");

    let mut acc = BigUint::from(0u32);
    let mut weight = BigUint::from(1u32);
    for c in key.chars() {
        acc += BigUint::from(c as u32) * &weight;
        weight *= 10u32;
    }

    let reduced = &acc * &acc % capacity;
    // The remainder is strictly below the capacity, so it fits.
    usize::try_from(&reduced).expect("remainder below capacity")
}
