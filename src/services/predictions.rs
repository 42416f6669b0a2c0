//! Prediction composition.
//!
//! Turns a transit list (plus an optional natal chart) into the thematic
//! prediction buckets. Purely textual: every number that feeds a sentence
//! was already computed upstream, except the lucky number/color flourishes,
//! which draw from an injected random source so tests stay deterministic.

use rand::Rng;

use crate::astro::{aspect_between, house_meaning};
use crate::models::{HoroscopePrediction, NatalChart, TimeFrame, Transit};

/// Orb, in degrees within the sign, for the transit-to-transit conjunction scan.
const CONJUNCTION_ORB_DEG: f64 = 8.0;

/// Fixed palette for the lucky color flourish.
const LUCKY_COLORS: [&str; 4] = ["Blue", "Red", "Green", "Yellow"];

/// Thematic bucket keys in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    General,
    Career,
    Love,
    Health,
    Finances,
}

impl Bucket {
    const fn label(self) -> &'static str {
        match self {
            Bucket::General => "general",
            Bucket::Career => "career",
            Bucket::Love => "love",
            Bucket::Health => "health",
            Bucket::Finances => "finances",
        }
    }
}

/// Themed buckets for a house number. Every transit additionally lands in
/// `general`; houses 3, 4, 9 and 11 contribute nowhere else.
fn themed_buckets(house: u8) -> &'static [Bucket] {
    match house {
        2 | 8 => &[Bucket::Finances],
        6 | 12 => &[Bucket::Health],
        5 | 7 => &[Bucket::Love],
        1 | 10 => &[Bucket::Career],
        _ => &[],
    }
}

/// One transit's sentence fragment.
fn transit_fragment(transit: &Transit, all: &[Transit], natal: Option<&NatalChart>) -> String {
    let mut fragment = format!(
        "Transiting {} in {} ({}th house)",
        transit.body, transit.sign, transit.house
    );

    // Same-sign conjunction scan against every other transit. The relation
    // is mutual: both partners mention each other.
    let conjunct: Vec<&str> = all
        .iter()
        .filter(|other| {
            other.body != transit.body
                && other.sign == transit.sign
                && (other.degree_in_sign - transit.degree_in_sign).abs() <= CONJUNCTION_ORB_DEG
        })
        .map(|other| other.body.name())
        .collect();
    if !conjunct.is_empty() {
        fragment.push_str(&format!(" conjunct {}", conjunct.join(", ")));
    }

    if let Some(natal_longitude) = natal.and_then(|chart| chart.longitude_of(transit.body)) {
        if let Some(aspect) = aspect_between(natal_longitude, transit.longitude) {
            fragment.push_str(&format!(" is {} your natal {}", aspect, transit.body));
        }
    }

    fragment.push_str(&format!(", affecting {}", house_meaning(transit.house)));

    if transit.is_retrograde {
        fragment.push_str(" (retrograde)");
    }

    fragment
}

fn render_bucket(bucket: Bucket, fragments: &[String]) -> String {
    if fragments.is_empty() {
        format!("No significant {} transits at this time.", bucket.label())
    } else {
        fragments.join(". ")
    }
}

/// Assemble the full prediction record from transits and an optional natal
/// chart.
pub fn build_predictions<R: Rng + ?Sized>(
    time_frame: TimeFrame,
    transits: &[Transit],
    natal_chart: Option<&NatalChart>,
    rng: &mut R,
) -> HoroscopePrediction {
    let mut general = Vec::new();
    let mut career = Vec::new();
    let mut love = Vec::new();
    let mut health = Vec::new();
    let mut finances = Vec::new();

    for transit in transits {
        let fragment = transit_fragment(transit, transits, natal_chart);
        for bucket in themed_buckets(transit.house) {
            match bucket {
                Bucket::Career => career.push(fragment.clone()),
                Bucket::Love => love.push(fragment.clone()),
                Bucket::Health => health.push(fragment.clone()),
                Bucket::Finances => finances.push(fragment.clone()),
                Bucket::General => unreachable!("general is implicit"),
            }
        }
        general.push(fragment);
    }

    HoroscopePrediction {
        time_frame,
        general: render_bucket(Bucket::General, &general),
        career: render_bucket(Bucket::Career, &career),
        love: render_bucket(Bucket::Love, &love),
        health: render_bucket(Bucket::Health, &health),
        finances: render_bucket(Bucket::Finances, &finances),
        lucky_number: rng.gen_range(1..=9),
        lucky_color: LUCKY_COLORS[rng.gen_range(0..LUCKY_COLORS.len())].to_string(),
        transits: transits.to_vec(),
        natal_chart: natal_chart.cloned(),
        timestamp: chrono::Utc::now(),
    }
}
