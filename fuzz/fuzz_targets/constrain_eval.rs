#![no_main]

use libfuzzer_sys::fuzz_target;
use rcprf::{Key, RangePrf, RcPrf16};

// key(32) || height(1) || min(8) || max(8) || leaf(8)
const INPUT_LEN: usize = 32 + 1 + 8 + 8 + 8;

fn read_u64(data: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[at..at + 8]);
    u64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < INPUT_LEN {
        return;
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    let height = data[32];
    let (min, max, leaf) = (read_u64(data, 33), read_u64(data, 41), read_u64(data, 49));

    let Ok(prf) = RcPrf16::new(Key::new(key), height) else {
        return;
    };
    let Ok(constrained) = prf.constrain(min, max) else {
        return;
    };
    match constrained.eval(leaf) {
        Ok(value) => assert_eq!(Some(value), prf.eval(leaf).ok()),
        Err(_) => assert!(leaf < min || leaf > max),
    }
});
