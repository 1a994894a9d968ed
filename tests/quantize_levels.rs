use fastq_quantize::{
    ConfigError, PHRED33_OFFSET, PHRED64_OFFSET, QualityLevels, Quantizer, quantize,
};
use std::collections::BTreeSet;

fn lv(n: i64) -> QualityLevels {
    QualityLevels::new(n).unwrap()
}

/// One character for every Phred+33 quality from 0 to 41.
fn every_quality() -> Vec<u8> {
    (0..=41u8).map(|v| v + PHRED33_OFFSET).collect()
}

fn phred(qual: &[u8]) -> Vec<u8> {
    qual.iter().map(|q| q - PHRED33_OFFSET).collect()
}

#[test]
fn levels_must_be_between_1_and_40() {
    assert!(QualityLevels::new(1).is_ok());
    assert!(QualityLevels::new(40).is_ok());
    assert_eq!(QualityLevels::new(0), Err(ConfigError::LevelsOutOfRange(0)));
    assert_eq!(QualityLevels::new(41), Err(ConfigError::LevelsOutOfRange(41)));
    assert_eq!("12".parse::<QualityLevels>().unwrap().get(), 12);
    assert_eq!(
        "x".parse::<QualityLevels>(),
        Err(ConfigError::NotAnInteger("x".to_string()))
    );
}

#[test]
fn length_is_preserved() {
    let qual = b"!#+5?IIIJ";
    for n in 1..=40 {
        assert_eq!(quantize(qual, lv(n), PHRED33_OFFSET).len(), qual.len());
    }
    assert!(quantize(b"", lv(4), PHRED33_OFFSET).is_empty());
}

#[test]
fn single_level_is_constant() {
    assert_eq!(quantize(b"!5?II", lv(1), PHRED33_OFFSET), b"JJJJJ");
    assert_eq!(quantize(b"@@hh", lv(1), PHRED64_OFFSET), b"iiii");
}

#[test]
fn four_levels_on_q40() {
    assert_eq!(quantize(b"IIII", lv(4), PHRED33_OFFSET), b"IIII");
}

#[test]
fn bins_use_truncated_width_for_the_representative() {
    // 40 / 3 = 13.33: bin index uses 13.33, representative uses 13
    assert_eq!(
        phred(&quantize(&[33, 33 + 13, 33 + 14, 33 + 27, 33 + 40], lv(3), 33)),
        vec![0, 0, 13, 26, 39]
    );
    // 40 / (40 / 29) lands just below 29 in f64
    assert_eq!(phred(&quantize(&[33 + 40, 33 + 41], lv(29), 33)), vec![28, 29]);
    assert_eq!(phred(&quantize(&[33 + 40, 33 + 41], lv(40), 33)), vec![40, 41]);
    assert_eq!(
        phred(&quantize(&[33 + 6, 33 + 7, 33 + 13, 33 + 40], lv(6), 33)),
        vec![0, 6, 6, 36]
    );
}

#[test]
fn lookup_table_matches_formula() {
    let all: Vec<u8> = (0..=255u8).collect();
    for offset in [PHRED33_OFFSET, PHRED64_OFFSET] {
        for n in 1..=40 {
            let q = Quantizer::new(lv(n), offset);
            assert_eq!(q.quantize(&all), quantize(&all, lv(n), offset), "levels {n}");
            let mut inplace = all.clone();
            q.apply(&mut inplace);
            assert_eq!(inplace, quantize(&all, lv(n), offset));
        }
    }
}

#[test]
fn requantizing_is_stable_when_40_divides_evenly() {
    let input = every_quality();
    for n in [1, 2, 4, 5, 8, 10, 20, 40] {
        let once = quantize(&input, lv(n), PHRED33_OFFSET);
        let twice = quantize(&once, lv(n), PHRED33_OFFSET);
        assert_eq!(once, twice, "levels {n}");
    }
}

#[test]
fn fewer_levels_never_add_symbols_over_full_range() {
    let input = every_quality();
    let distinct = |n: i64| {
        quantize(&input, lv(n), PHRED33_OFFSET)
            .into_iter()
            .collect::<BTreeSet<u8>>()
            .len()
    };
    for n in 2..=40 {
        assert!(distinct(n - 1) <= distinct(n), "levels {} vs {n}", n - 1);
    }
    assert_eq!(distinct(1), 1);
}

#[test]
fn characters_below_offset_stay_in_byte_range() {
    // malformed input; only the absence of overflow is guaranteed
    let out = quantize(b"\x00\x10 ", lv(4), PHRED33_OFFSET);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|&c| c <= PHRED33_OFFSET));
}
