/// Ordered monthly observations of the normality metric. Months and values
/// are parallel sequences, one pair per spreadsheet row.
#[derive(Debug, Clone)]
pub struct MonthlySeries {
    pub months: Vec<String>,
    pub values: Vec<f64>,
}

impl MonthlySeries {
    pub fn new(months: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(months.len(), values.len());
        Self { months, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> MonthlySeries {
        let months = (1..=values.len()).map(|i| format!("M{}", i)).collect();
        MonthlySeries::new(months, values.to_vec())
    }

    #[test]
    fn mean_of_equal_values() {
        let s = series(&[92.0; 12]);
        assert_eq!(s.mean(), 92.0);
    }

    #[test]
    fn min_max_span_the_data() {
        let s = series(&[88.5, 91.2, 90.0, 93.4]);
        assert_eq!(s.min_value(), 88.5);
        assert_eq!(s.max_value(), 93.4);
    }
}
