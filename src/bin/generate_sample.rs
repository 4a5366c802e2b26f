use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

const MARITAL: &[(&str, u32)] = &[
    ("Married", 45),
    ("Single", 38),
    ("Divorced", 9),
    ("Widowed", 5),
    ("Separated", 3),
];

const LANGUAGE: &[(&str, u32)] = &[
    ("Hindi", 40),
    ("English", 25),
    ("Marathi", 12),
    ("Tamil", 9),
    ("Bengali", 8),
    ("Telugu", 6),
];

const EMPLOYMENT: &[(&str, u32)] = &[
    ("Employed", 42),
    ("Self-employed", 18),
    ("Unemployed", 15),
    ("Student", 17),
    ("Retired", 8),
];

const CITIES: &[&str] = &["Mumbai", "Delhi", "Pune", "Chennai", "Kolkata", "Hyderabad"];

/// Chance that a required cell is left missing.
const MISSING_RATE: f64 = 0.08;

/// What a blank-ish required cell looks like in the generated sheet.
const NULLISH: &[Option<&str>] = &[None, None, Some("NA"), Some("")];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Pick a label with probability proportional to its weight.
    fn weighted<'a>(&mut self, choices: &[(&'a str, u32)]) -> &'a str {
        let total: u32 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total as f64;
        for &(label, weight) in choices {
            if roll < weight as f64 {
                return label;
            }
            roll -= weight as f64;
        }
        choices[choices.len() - 1].0
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_users.xlsx".to_string());
    let rows: u32 = 500;
    let mut rng = SimpleRng::new(42);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let header = [
        "UserId",
        "Age",
        "MaritalStatus",
        "BoloAppLanguage",
        "EmploymentStatus",
        "City",
    ];
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    let mut incomplete = 0;
    for row in 1..=rows {
        let required = [
            rng.weighted(MARITAL),
            rng.weighted(LANGUAGE),
            rng.weighted(EMPLOYMENT),
        ];

        sheet.write_number(row, 0, 1000 + row)?;
        sheet.write_number(row, 1, 18 + rng.below(50) as u32)?;

        let mut complete = true;
        for (i, value) in required.iter().enumerate() {
            let col = 2 + i as u16;
            if rng.next_f64() < MISSING_RATE {
                complete = false;
                if let Some(marker) = NULLISH[rng.below(NULLISH.len())] {
                    sheet.write_string(row, col, marker)?;
                }
            } else {
                sheet.write_string(row, col, *value)?;
            }
        }
        if !complete {
            incomplete += 1;
        }

        // City is optional and never gates cleaning.
        if rng.next_f64() > 0.1 {
            sheet.write_string(row, 5, CITIES[rng.below(CITIES.len())])?;
        }
    }

    workbook
        .save(&output_path)
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {rows} users ({incomplete} with a missing required field) to {output_path}"
    );
    Ok(())
}
