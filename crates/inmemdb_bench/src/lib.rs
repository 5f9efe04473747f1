//! Benchmark utilities.

#![warn(missing_docs)]

use rand::Rng;

/// Generate `count` random `(name, value)` pairs.
///
/// Values are drawn from `distinct_values` choices so the count index
/// sees realistic sharing.
pub fn random_pairs(count: usize, distinct_values: usize) -> Vec<(String, String)> {
    let mut rng = rand::thread_rng();
    let distinct = distinct_values.max(1);
    (0..count)
        .map(|i| (format!("k{i}"), format!("v{}", rng.gen_range(0..distinct))))
        .collect()
}

/// Generate a command script of `count` random lines, ending with `END`.
pub fn random_script(count: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut script = String::new();
    for _ in 0..count {
        let name = rng.gen_range(0..64);
        let value = rng.gen_range(0..8);
        let line = match rng.gen_range(0..10) {
            0..=3 => format!("SET k{name} v{value}"),
            4 => format!("UNSET k{name}"),
            5 | 6 => format!("GET k{name}"),
            7 => format!("NUMEQUALTO v{value}"),
            8 => "BEGIN".to_string(),
            _ => "ROLLBACK".to_string(),
        };
        script.push_str(&line);
        script.push('\n');
    }
    script.push_str("END\n");
    script
}
