//! Canonical metric name formatting.

use std::fmt;

use metrics::SharedString;

/// A single component of a metric name.
///
/// Parts are either freeform labels or numeric indexes (such as a worker number). Labels may
/// contain `.` and `-`, which get escaped during formatting so that the joined name remains
/// unambiguous.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum MetricPart {
    /// A freeform label, such as a runner or method name.
    Label(String),

    /// A numeric index, stringified in decimal.
    Index(u64),
}

impl From<&str> for MetricPart {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for MetricPart {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<u64> for MetricPart {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

/// A canonical metric name.
///
/// The string key under which a measurement series is registered and exported. Produced by
/// [`metric_name`]; convertible into the `metrics` facade's key types for registration.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MetricName(String);

impl MetricName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetricName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `From<MetricName> for KeyName` is covered by the `metrics` blanket
// `impl<T: Into<SharedString>> From<T> for KeyName` via the impl below.
impl From<MetricName> for SharedString {
    fn from(name: MetricName) -> Self {
        SharedString::from(name.0)
    }
}

// `.` and `-` map to strings that never contain the `_` joiner, so distinct part sequences can
// never collide after joining.
fn write_escaped(output: &mut String, label: &str) {
    for c in label.chars() {
        match c {
            '.' => output.push_str("::"),
            '-' => output.push(':'),
            c => output.push(c),
        }
    }
}

/// Formats a canonical metric name from the given parts.
///
/// Label parts have `.` replaced with `::` and `-` replaced with `:`, index parts are stringified
/// in decimal, and all parts are then joined with `_`. The mapping is deterministic and
/// collision-resistant: the joiner never appears unescaped inside an individual part's escaped
/// form, so no two distinct part sequences produce the same output.
///
/// The [`metric_name!`](macro@crate::metric_name) macro provides a variadic front-end over this
/// function that accepts a mixed list of label and index expressions.
pub fn metric_name(parts: &[MetricPart]) -> MetricName {
    let mut output = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            output.push('_');
        }

        match part {
            MetricPart::Label(label) => write_escaped(&mut output, label),
            MetricPart::Index(index) => output.push_str(&index.to_string()),
        }
    }

    MetricName(output)
}

/// Formats a canonical metric name from a mixed list of label and index expressions.
///
/// Each expression must be convertible into [`MetricPart`](crate::name::MetricPart): string
/// slices, owned strings, and `u64` indexes are all accepted.
///
/// # Example
///
/// ```
/// use bucketeer::metric_name;
///
/// let name = metric_name!("runner_name", 1u64, "method_name", "metric_name");
/// assert_eq!(name.as_str(), "runner_name_1_method_name_metric_name");
/// ```
#[macro_export]
macro_rules! metric_name {
    ($($part:expr),+ $(,)?) => {
        $crate::name::metric_name(&[$($crate::name::MetricPart::from($part)),+])
    };
}

#[cfg(test)]
mod tests {
    use metrics::KeyName;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plain_labels_pass_through() {
        let name = metric_name(&["runner_name".into(), "metric_name".into()]);
        assert_eq!(name.as_str(), "runner_name_metric_name");
    }

    #[test]
    fn dots_escape_to_double_colon() {
        let name = metric_name(&["runner.name".into(), "metric_name".into()]);
        assert_eq!(name.as_str(), "runner::name_metric_name");

        let name = metric_name(&["runner_name".into(), "metric.name".into()]);
        assert_eq!(name.as_str(), "runner_name_metric::name");
    }

    #[test]
    fn dashes_escape_to_single_colon() {
        let name = metric_name(&["runner-name".into(), "metric_name".into()]);
        assert_eq!(name.as_str(), "runner:name_metric_name");

        let name = metric_name(&["runner_name".into(), "metric-name".into()]);
        assert_eq!(name.as_str(), "runner_name_metric:name");
    }

    #[test]
    fn index_parts_stringify_in_decimal() {
        let name = metric_name(&["runner_name".into(), 1u64.into(), "metric_name".into()]);
        assert_eq!(name.as_str(), "runner_name_1_metric_name");

        let name = metric_name!("runner_name", 1u64, "method_name", "metric_name");
        assert_eq!(name.as_str(), "runner_name_1_method_name_metric_name");
    }

    #[test]
    fn single_part_has_no_joiner() {
        let name = metric_name(&["metric_name".into()]);
        assert_eq!(name.as_str(), "metric_name");
    }

    #[test]
    fn converts_into_metrics_key_types() {
        let name = metric_name!("runner_name", "metric_name");
        assert_eq!(name.to_string(), "runner_name_metric_name");

        let key: KeyName = name.clone().into();
        assert_eq!(key.as_str(), "runner_name_metric_name");

        let shared: SharedString = name.into();
        assert_eq!(&*shared, "runner_name_metric_name");
    }

    fn arb_parts() -> impl Strategy<Value = Vec<MetricPart>> {
        let part = prop_oneof![
            "[a-z0-9._-]{0,12}".prop_map(MetricPart::from),
            any::<u64>().prop_map(MetricPart::from),
        ];
        proptest::collection::vec(part, 1..6)
    }

    proptest! {
        #[test]
        fn property_test_deterministic(parts in arb_parts()) {
            prop_assert_eq!(metric_name(&parts), metric_name(&parts));
        }

        #[test]
        fn property_test_joiner_count(parts in arb_parts()) {
            // Escaping never adds or removes underscores, so the output carries exactly one
            // joiner per part boundary on top of the underscores already inside label parts.
            let inner_underscores: usize = parts
                .iter()
                .map(|part| match part {
                    MetricPart::Label(label) => label.matches('_').count(),
                    MetricPart::Index(_) => 0,
                })
                .sum();

            let name = metric_name(&parts);
            let total_underscores = name.as_str().matches('_').count();
            prop_assert_eq!(total_underscores, inner_underscores + parts.len() - 1);
        }

        #[test]
        fn property_test_separators_fully_escaped(parts in arb_parts()) {
            let name = metric_name(&parts);
            prop_assert!(!name.as_str().contains('.'));
            prop_assert!(!name.as_str().contains('-'));
        }
    }
}
