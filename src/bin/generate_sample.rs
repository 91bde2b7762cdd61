//! Write a synthetic `sample_interest.csv` snapshot covering every state.
//!
//! Open it from the dashboard with File → Open snapshot… to work offline.

use chrono::{Duration, Local};

#[allow(dead_code)]
#[path = "../regions.rs"]
mod regions;

const DAYS: i64 = 90;

/// splitmix64, enough for repeatable noise.
struct Noise(u64);

impl Noise {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Base level and daily slope per state; every third state rises.
fn shape(index: usize) -> (f64, f64) {
    let base = 20.0 + (index % 5) as f64 * 8.0;
    let slope = match index % 3 {
        0 => 0.45,
        1 => 0.0,
        _ => -0.15,
    };
    (base, slope)
}

fn main() -> anyhow::Result<()> {
    let mut noise = Noise(42);
    let end = Local::now().date_naive();
    let start = end - Duration::days(DAYS);

    let output_path = "sample_interest.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["date", "geo", "state", "interest"])?;

    let states = regions::REGIONS.iter().flat_map(|r| r.states.iter().copied());
    let mut rows = 0usize;
    for (index, state) in states.enumerate() {
        let Some(geo) = regions::geo_code(state) else {
            continue;
        };
        let (base, slope) = shape(index);
        for day in 0..=DAYS {
            let date = start + Duration::days(day);
            // Roughly one day in twenty has no data.
            let interest = if noise.next_unit() < 0.05 {
                String::new()
            } else {
                let v = base + slope * day as f64 + (noise.next_unit() - 0.5) * 10.0;
                format!("{:.0}", v.clamp(0.0, 100.0))
            };
            writer.write_record([
                date.format("%Y-%m-%d").to_string(),
                geo.to_string(),
                state.to_string(),
                interest,
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} rows ({} days per state) to {output_path}", DAYS + 1);
    Ok(())
}
