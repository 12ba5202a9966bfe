use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

use crate::models::{Certificate, PricePoint, ProductRecord, Risk, Verdict};

const BASE_SCORE: i32 = 88;
const TRUST_FLOOR: i32 = 10;
const TRUST_CEILING: i32 = 99;

/// Case-sensitive substrings that mark a platform-operated seller.
const PLATFORM_SELLERS: [&str; 2] = ["Appario", "Amazon"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Score a record using process randomness and the current clock.
pub fn score(record: &ProductRecord) -> Verdict {
    score_with(record, &mut rand::rng(), Utc::now())
}

/// Deterministic core of the scorer. RNG and clock are parameters so
/// tests can pin the synthetic history and month labels.
///
/// Heuristics run in a fixed order; the order decides how pros and
/// cons accumulate but not the clamped score.
pub fn score_with(record: &ProductRecord, rng: &mut impl Rng, now: DateTime<Utc>) -> Verdict {
    let discount = discount_percent(record.price, record.mrp);

    let mut score = BASE_SCORE;
    let mut pros = vec![
        "SSL Encryption Verified".to_string(),
        "Secure Checkout Path".to_string(),
    ];
    let mut cons = Vec::new();

    if PLATFORM_SELLERS.iter().any(|s| record.seller.contains(s)) {
        pros.push("Platform-Verified Seller".to_string());
    } else {
        score -= 12;
        cons.push("Independent 3rd Party".to_string());
    }

    if discount > 65 {
        score -= 15;
        cons.push("Suspiciously High Discount".to_string());
    } else if discount > 20 {
        pros.push(format!("Competitive Pricing (-{discount}%)"));
    }

    // Malformed rating text scores as zero rather than failing the request.
    let rating: f64 = record.rating.trim().parse().unwrap_or(0.0);
    if rating < 3.8 {
        score -= 20;
        cons.push("Below-Average Ratings".to_string());
    }

    let trust_score = clamp_trust(score);
    let risk = if trust_score > 75 {
        Risk::Low
    } else {
        Risk::Moderate
    };
    // Thresholds for risk and certificate intentionally differ (75 vs 70),
    // both read off the clamped score.
    let certificate = if trust_score > 70 {
        Certificate::Valid
    } else {
        Certificate::Warning
    };

    Verdict {
        title: record.title.clone(),
        price: record.price,
        mrp: record.mrp,
        discount,
        image: record.image.clone(),
        seller: record.seller.clone(),
        rating: record.rating.clone(),
        reviews: record.reviews.clone(),
        features: record.features.clone(),
        score: trust_score,
        risk,
        pros,
        cons,
        price_history: price_history(record.price, rng, now),
        certificate,
    }
}

fn discount_percent(price: u64, mrp: u64) -> u64 {
    if mrp > price {
        (mrp - price) * 100 / mrp
    } else {
        0
    }
}

fn clamp_trust(score: i32) -> i32 {
    score.clamp(TRUST_FLOOR, TRUST_CEILING)
}

/// Display-only trend: five jittered points around 110% of the current
/// price, with the most recent point pinned to the current price. Not
/// derived from any observed data.
fn price_history(price: u64, rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<PricePoint> {
    month_labels(now)
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let value = if i == 5 {
                price
            } else {
                (price as f64 * 1.1 * rng.random_range(0.95..=1.05)).round() as u64
            };
            PricePoint {
                month: month.to_string(),
                price: value,
            }
        })
        .collect()
}

/// Six month abbreviations ending at the current month.
fn month_labels(now: DateTime<Utc>) -> [&'static str; 6] {
    std::array::from_fn(|i| MONTHS[(now.month0() as usize + 7 + i) % 12])
}
