/// Returns a frequency count of the input data, one bucket per byte value.
pub fn freqs(data: &[u8]) -> [u32; 256] {
    let mut freqs = [0_u32; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn counts_each_value() {
        let f = freqs(b"AAAB");
        assert_eq!(f[b'A' as usize], 3);
        assert_eq!(f[b'B' as usize], 1);
        assert_eq!(f.iter().sum::<u32>(), 4);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert!(freqs(b"").iter().all(|&c| c == 0));
    }
}
