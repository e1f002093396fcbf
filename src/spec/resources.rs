//! Aggregable compute-requirement descriptor.

use serde::{Deserialize, Serialize};

/// Compute requirements for one task, or an aggregate over several.
///
/// A field absent on both sides of an addition stays absent, so a total
/// never reports a requirement no task declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// CPU cores (fractional allowed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,

    /// Memory in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,

    /// Accelerator count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<u64>,
}

impl Resources {
    /// Field-wise sum of two descriptors.
    pub fn add(&self, other: &Resources) -> Resources {
        Resources {
            cpu: add_field(self.cpu, other.cpu),
            memory: add_field(self.memory, other.memory),
            gpu: add_field(self.gpu, other.gpu),
        }
    }
}

fn add_field<T: std::ops::Add<Output = T>>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Fold one more (possibly undeclared) per-task descriptor into a running
/// total.
pub(crate) fn accumulate(total: Option<Resources>, extra: Option<&Resources>) -> Option<Resources> {
    match (total, extra) {
        (Some(total), Some(extra)) => Some(total.add(extra)),
        (None, Some(extra)) => Some(extra.clone()),
        (total, None) => total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn res(cpu: Option<f64>, memory: Option<f64>, gpu: Option<u64>) -> Resources {
        Resources { cpu, memory, gpu }
    }

    #[test]
    fn addition_is_field_wise() {
        let total = res(Some(2.0), Some(1024.0), Some(1)).add(&res(Some(0.5), Some(512.0), None));
        assert_eq!(total, res(Some(2.5), Some(1536.0), Some(1)));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let total = res(None, Some(256.0), None).add(&res(None, None, None));
        assert_eq!(total.cpu, None);
        assert_eq!(total.memory, Some(256.0));
        assert_eq!(total.gpu, None);
    }

    #[test]
    fn accumulate_skips_undeclared_tasks() {
        let total = accumulate(None, None);
        assert_eq!(total, None);

        let total = accumulate(total, Some(&res(Some(1.0), None, None)));
        let total = accumulate(total, None);
        let total = accumulate(total, Some(&res(Some(2.0), Some(128.0), None)));
        assert_eq!(total, Some(res(Some(3.0), Some(128.0), None)));
    }
}
