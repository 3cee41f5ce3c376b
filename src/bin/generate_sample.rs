use anyhow::{Context, Result};
use serde::Serialize;

/// One fitness measurement session. Column names are the CSV header.
#[derive(Debug, Serialize)]
struct Measurement {
    #[serde(rename = "측정ID")]
    id: u32,
    #[serde(rename = "성별")]
    sex: &'static str,
    #[serde(rename = "age_years")]
    age: u32,
    #[serde(rename = "height_cm")]
    height: f64,
    #[serde(rename = "weight_kg")]
    weight: f64,
    bmi: f64,
    #[serde(rename = "body_fat_pct")]
    body_fat: Option<f64>,
    #[serde(rename = "grip_strength_kg")]
    grip: f64,
    #[serde(rename = "sit_and_reach_cm")]
    sit_and_reach: Option<f64>,
    #[serde(rename = "shuttle_run_laps")]
    shuttle_run: u32,
    #[serde(rename = "resting_hr_bpm")]
    resting_hr: u32,
    #[serde(rename = "test_center")]
    center: &'static str,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// `Some(value)` except for roughly `missing_rate` of the calls.
    fn maybe(&mut self, value: f64, missing_rate: f64) -> Option<f64> {
        (self.next_f64() >= missing_rate).then_some(value)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let centers = ["Seoul", "Busan", "Daegu", "Gwangju"];
    let n_rows = 500;

    let output_path = "fitness_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for id in 1..=n_rows {
        let male = rng.next_f64() < 0.5;
        let age = 19 + (rng.next_f64() * 50.0) as u32;
        let age_f = age as f64;

        // (height, body fat, grip, sit-and-reach, shuttle laps) at age 40
        let (height0, fat0, grip0, flex0, laps0) = if male {
            (173.5, 14.0, 42.0, 8.0, 55.0)
        } else {
            (160.5, 24.0, 26.0, 13.0, 40.0)
        };

        let height = rng.gauss(height0, 6.0);
        let bmi = rng.gauss(23.0 + 0.04 * (age_f - 40.0), 2.8).max(16.0);
        let weight = bmi * (height / 100.0).powi(2);
        let body_fat = rng.gauss(fat0 + 0.9 * (bmi - 23.0), 3.0);
        let grip = rng.gauss(grip0 - 0.15 * (age_f - 40.0), 5.0);
        let flexibility = rng.gauss(flex0 - 0.1 * (age_f - 40.0), 6.0);
        let shuttle = rng.gauss(laps0 - 0.6 * (age_f - 40.0) - 1.5 * (bmi - 23.0), 8.0);
        let resting_hr = rng.gauss(72.0 - 0.25 * (shuttle - 45.0), 6.0);

        let record = Measurement {
            id,
            sex: if male { "M" } else { "F" },
            age,
            height: round1(height),
            weight: round1(weight),
            bmi: round1(bmi),
            body_fat: rng.maybe(round1(body_fat), 0.05),
            grip: round1(grip.max(5.0)),
            sit_and_reach: rng.maybe(round1(flexibility), 0.03),
            shuttle_run: shuttle.max(5.0).round() as u32,
            resting_hr: resting_hr.round() as u32,
            center: centers[(rng.next_u64() % centers.len() as u64) as usize],
        };
        writer
            .serialize(&record)
            .with_context(|| format!("writing row {id}"))?;
    }

    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_rows} measurements to {output_path}");
    Ok(())
}
