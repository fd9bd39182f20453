// Rolling checksum over the card payload
//
// Two running sums modulo the largest prime below 2^16, combined as
// (b << 16) | a. Identical to Adler-32, so any Adler-32 tool can be used
// to program cards.

const MOD_ADLER: u32 = 65521;

pub fn rolling_checksum(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;

    for &byte in data {
        a = (a + byte as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }

    (b << 16) | a
}
