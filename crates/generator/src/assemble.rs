use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;

/// A record that was skipped, with the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub source: PathBuf,
    pub reason: String,
}

impl Rejected {
    pub fn new(source: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(source: impl Into<PathBuf>, field: &str) -> Self {
        Self::new(source, format!("missing required field '{}'", field))
    }
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.reason)
    }
}

/// Validated items of one content type plus everything that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled<T> {
    pub items: Vec<T>,
    pub rejected: Vec<Rejected>,
}

/// Keep the valid records in discovery order and log every rejected one
pub fn partition<T, I>(results: I, kind: &str) -> Assembled<T>
where
    I: IntoIterator<Item = Result<T, Rejected>>,
{
    let mut items = Vec::new();
    let mut rejected = Vec::new();

    for result in results {
        match result {
            Ok(item) => items.push(item),
            Err(reason) => {
                tracing::warn!(
                    kind,
                    source = %reason.source.display(),
                    reason = %reason.reason,
                    "skipping record"
                );
                rejected.push(reason);
            }
        }
    }

    Assembled { items, rejected }
}

/// Ascending by `order`; equal keys keep their relative order.
pub fn sort_by_order<T>(items: &mut [T], order: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| order(a).total_cmp(&order(b)));
}

/// Newest first; equal dates keep their relative order.
pub fn sort_by_date_desc<T>(items: &mut [T], date: impl Fn(&T) -> NaiveDate) {
    items.sort_by(|a, b| date(b).cmp(&date(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_drops_exactly_the_rejected() {
        let results = vec![
            Ok(1),
            Err(Rejected::missing_field("b.md", "author")),
            Ok(3),
            Err(Rejected::missing_field("d.md", "quote")),
        ];
        let assembled = partition(results, "testimonials");
        assert_eq!(assembled.items, vec![1, 3]);
        assert_eq!(assembled.rejected.len(), 2);
        assert_eq!(
            assembled.rejected[0].to_string(),
            "b.md: missing required field 'author'"
        );
    }

    #[test]
    fn test_sort_by_order_is_stable() {
        let mut items = vec![("a", 100.0), ("b", 1.0), ("c", 100.0), ("d", 1.0), ("e", -2.5)];
        sort_by_order(&mut items, |i| i.1);
        let names: Vec<&str> = items.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["e", "b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_date_desc_is_stable() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let mut items = vec![
            ("old", d(2020, 1, 1)),
            ("tie-first", d(2024, 5, 1)),
            ("new", d(2025, 1, 1)),
            ("tie-second", d(2024, 5, 1)),
        ];
        sort_by_date_desc(&mut items, |i| i.1);
        let names: Vec<&str> = items.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["new", "tie-first", "tie-second", "old"]);

        for pair in items.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
