//! Demo sales seeded into a fresh dashboard.

use crate::validation::ValidSale;
use chrono::NaiveDate;

const DEMO_SALES: [((i32, u32, u32), &str, &str, f64); 6] = [
    ((2025, 4, 25), "North America", "Laptop", 120.0),
    ((2025, 4, 25), "Europe", "Smartphone", 95.0),
    ((2025, 4, 26), "Asia", "Tablet", 75.0),
    ((2025, 4, 26), "North America", "Monitor", 30.0),
    ((2025, 4, 27), "Europe", "Headphones", 45.0),
    ((2025, 4, 27), "Asia", "Camera", 60.0),
];

/// The six demo sales, in seeding order.
pub fn demo_records() -> Vec<ValidSale> {
    DEMO_SALES
        .iter()
        .filter_map(|&((y, m, d), region, product, sales)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| ValidSale {
                date,
                region: region.to_string(),
                product: product.to_string(),
                sales,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_records() {
        let records = demo_records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].product, "Laptop");
        assert_eq!(records[5].region, "Asia");
        assert_eq!(records.iter().map(|r| r.sales).sum::<f64>(), 425.0);
    }
}
